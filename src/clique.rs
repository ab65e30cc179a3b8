use crate::utils::argsort;
use ndarray::{Array1, Array2};

/// A group of treatments of which no two are significantly different
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clique {
    members: Vec<usize>,
}
impl Clique {
    pub fn new(members: Vec<usize>) -> Self {
        Self { members }
    }

    /// Treatment indices, from the lowest to the highest average rank
    pub fn members(&self) -> &[usize] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, treatment: usize) -> bool {
        self.members.contains(&treatment)
    }

    pub fn is_subset(&self, other: &Clique) -> bool {
        self.members.iter().all(|t| other.contains(*t))
    }
}

/// Derives the maximal cliques of indistinguishable treatments.
///
/// Treatments are ordered by average rank and every clique is a run of that order in
/// which all pairs are linked, i.e. not flagged as significantly different. A run is
/// kept only if no longer valid run contains it. Linkage is not transitive, so cliques
/// may overlap, and a treatment linked to no neighbour forms a clique of its own.
#[derive(Debug)]
pub struct Cliques<'a> {
    average_ranks: &'a Array1<f64>,
    significant: &'a Array2<bool>,
}

impl<'a> Cliques<'a> {
    pub fn new(average_ranks: &'a Array1<f64>, significant: &'a Array2<bool>) -> Self {
        Self {
            average_ranks,
            significant,
        }
    }

    pub fn fit(&self) -> Vec<Clique> {
        let order = argsort(self.average_ranks);
        let ends = self.maximal_ends(&order);

        let mut cliques = ends
            .iter()
            .enumerate()
            .filter(|(lo, hi)| *lo == 0 || **hi > ends[lo - 1])
            .map(|(lo, hi)| Clique::new(order[lo..=*hi].to_vec()))
            .collect::<Vec<Clique>>();

        cliques.sort_by(|a, b| {
            let rank_a = self.average_ranks[a.members[0]];
            let rank_b = self.average_ranks[b.members[0]];
            rank_a.total_cmp(&rank_b).then(b.len().cmp(&a.len()))
        });
        cliques
    }

    /// For every start position in the rank order, the last position of the longest
    /// run from it in which all pairs are linked.
    ///
    /// The end never moves backwards as the start advances, since dropping the first
    /// member of a valid run keeps it valid.
    fn maximal_ends(&self, order: &[usize]) -> Vec<usize> {
        let mut ends = Vec::with_capacity(order.len());
        let mut hi = 0;
        for lo in 0..order.len() {
            hi = hi.max(lo);
            while hi + 1 < order.len() && self.linked_to_run(order, lo, hi, order[hi + 1]) {
                hi += 1;
            }
            ends.push(hi);
        }
        ends
    }

    fn linked_to_run(&self, order: &[usize], lo: usize, hi: usize, candidate: usize) -> bool {
        order[lo..=hi]
            .iter()
            .all(|member| !self.significant[[*member, candidate]])
    }
}
