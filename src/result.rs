use crate::{clique::Clique, friedman::TestResult, pairwise::PairwiseResult};
use ndarray::{Array1, Array2};

/// Outcome of the post-hoc stage
#[derive(Debug, Clone)]
pub enum PostHoc {
    /// The Friedman test did not reject the null hypothesis. No pairwise tests were run
    /// and the treatments form one inconclusive group.
    NotSignificant,

    /// The Friedman test rejected the null hypothesis
    Significant {
        pairwise: PairwiseResult,
        cliques: Vec<Clique>,
    },
}

#[derive(Debug, Clone)]
/// Result struct for the Friedman test, the corrected pairwise tests and the cliques
pub struct CdResult {
    treatments: Vec<String>,
    rank_matrix: Array2<f64>,
    average_ranks: Array1<f64>,
    omnibus: TestResult,
    posthoc: PostHoc,
}
impl CdResult {
    pub fn new(
        treatments: Vec<String>,
        rank_matrix: Array2<f64>,
        average_ranks: Array1<f64>,
        omnibus: TestResult,
        posthoc: PostHoc,
    ) -> Self {
        Self {
            treatments,
            rank_matrix,
            average_ranks,
            omnibus,
            posthoc,
        }
    }

    /// Get the treatment names
    pub fn treatments(&self) -> &[String] {
        &self.treatments
    }

    /// Get the `(n, k)` per-observation ranks
    pub fn rank_matrix(&self) -> &Array2<f64> {
        &self.rank_matrix
    }

    /// Get the average rank of every treatment
    pub fn average_ranks(&self) -> &Array1<f64> {
        &self.average_ranks
    }

    /// Get the average rank of a treatment by name
    pub fn average_rank(&self, treatment: &str) -> Option<f64> {
        self.treatments
            .iter()
            .position(|t| t == treatment)
            .map(|idx| self.average_ranks[idx])
    }

    /// Get the Friedman test result
    pub fn omnibus(&self) -> &TestResult {
        &self.omnibus
    }

    pub fn posthoc(&self) -> &PostHoc {
        &self.posthoc
    }

    /// Whether the Friedman test found any difference between the treatments
    pub fn is_significant(&self) -> bool {
        matches!(self.posthoc, PostHoc::Significant { .. })
    }

    /// Get the pairwise tests, if they were run
    pub fn pairwise(&self) -> Option<&PairwiseResult> {
        match &self.posthoc {
            PostHoc::Significant { pairwise, .. } => Some(pairwise),
            PostHoc::NotSignificant => None,
        }
    }

    /// Get the cliques, if the pairwise tests were run
    pub fn cliques(&self) -> Option<&[Clique]> {
        match &self.posthoc {
            PostHoc::Significant { cliques, .. } => Some(cliques),
            PostHoc::NotSignificant => None,
        }
    }

    /// Get the cliques as treatment names
    pub fn clique_names(&self) -> Option<Vec<Vec<&str>>> {
        self.cliques().map(|cliques| {
            cliques
                .iter()
                .map(|c| {
                    c.members()
                        .iter()
                        .map(|t| self.treatments[*t].as_str())
                        .collect()
                })
                .collect()
        })
    }
}

#[cfg(test)]
mod testing {
    use super::*;
    use ndarray::array;

    fn omnibus(pvalue: f64) -> TestResult {
        TestResult::Chisq {
            statistic: 1.,
            df: 2.,
            pvalue,
        }
    }

    fn names() -> Vec<String> {
        vec!["a", "b", "c"].iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_not_significant() {
        let result = CdResult::new(
            names(),
            Array2::from_elem((2, 3), 2.),
            array![2., 2., 2.],
            omnibus(1.),
            PostHoc::NotSignificant,
        );
        assert!(!result.is_significant());
        assert!(result.pairwise().is_none());
        assert!(result.cliques().is_none());
        assert!(result.clique_names().is_none());
        assert_eq!(result.average_rank("b"), Some(2.));
        assert_eq!(result.average_rank("z"), None);
    }

    #[test]
    fn test_significant() {
        let outcomes = array![[0., 5., 5.], [1., 6., 6.], [2., 8., 8.]];
        let pairwise = PairwiseResult::fit(&outcomes, 0.05).unwrap();
        let cliques = vec![Clique::new(vec![0]), Clique::new(vec![1, 2])];
        let result = CdResult::new(
            names(),
            array![[1., 2.5, 2.5], [1., 2.5, 2.5], [1., 2.5, 2.5]],
            array![1., 2.5, 2.5],
            omnibus(0.01),
            PostHoc::Significant { pairwise, cliques },
        );
        assert!(result.is_significant());
        assert_eq!(result.pairwise().map(|p| p.pairs().len()), Some(3));
        assert_eq!(result.cliques().map(|c| c.len()), Some(2));
        assert_eq!(
            result.clique_names(),
            Some(vec![vec!["a"], vec!["b", "c"]])
        );
        assert_eq!(result.treatments(), &["a", "b", "c"]);
        assert_eq!(result.omnibus().pvalue(), 0.01);
    }
}
