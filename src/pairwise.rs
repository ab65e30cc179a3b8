use crate::{
    error::Result,
    holm::{Holm, HolmResult},
    utils::unordered_pairs,
    wilcoxon::{wilcoxon_signed_rank, Alternative, SignedRankResult},
};
use ndarray::{parallel::prelude::*, Array1, Array2, Axis};

/// Runs a two-sided Wilcoxon signed-rank test on every unordered pair of columns.
///
/// Pairs are returned in lexicographic order. The tests run in parallel but are
/// collected in pair order, so the result does not depend on scheduling.
pub fn pairwise_tests(
    outcomes: &Array2<f64>,
) -> Result<(Vec<(usize, usize)>, Vec<SignedRankResult>)> {
    let pairs = unordered_pairs(outcomes.ncols());
    let tests = pairs
        .par_iter()
        .map(|(a, b)| {
            wilcoxon_signed_rank(
                outcomes.index_axis(Axis(1), *a),
                outcomes.index_axis(Axis(1), *b),
                Alternative::TwoSided,
            )
        })
        .collect::<Result<Vec<SignedRankResult>>>()?;
    Ok((pairs, tests))
}

#[derive(Debug, Clone)]
/// Raw and Holm-corrected outcome of all pairwise signed-rank tests
pub struct PairwiseResult {
    n_treatments: usize,
    pairs: Vec<(usize, usize)>,
    tests: Vec<SignedRankResult>,
    holm: HolmResult,
}
impl PairwiseResult {
    pub fn new(
        n_treatments: usize,
        pairs: Vec<(usize, usize)>,
        tests: Vec<SignedRankResult>,
        alpha: f64,
    ) -> Self {
        let pvalues = tests.iter().map(|t| t.pvalue()).collect::<Array1<f64>>();
        let holm = Holm::new(&pvalues, alpha).fit();
        Self {
            n_treatments,
            pairs,
            tests,
            holm,
        }
    }

    /// Tests every pair of columns of `outcomes` and corrects the family at `alpha`
    pub fn fit(outcomes: &Array2<f64>, alpha: f64) -> Result<Self> {
        let (pairs, tests) = pairwise_tests(outcomes)?;
        Ok(Self::new(outcomes.ncols(), pairs, tests, alpha))
    }

    /// Get the tested pairs
    pub fn pairs(&self) -> &[(usize, usize)] {
        &self.pairs
    }

    /// Get the signed-rank results, aligned with the pairs
    pub fn tests(&self) -> &[SignedRankResult] {
        &self.tests
    }

    /// Get the raw p-values, aligned with the pairs
    pub fn pvalues(&self) -> Array1<f64> {
        self.tests.iter().map(|t| t.pvalue()).collect()
    }

    /// Get the Holm-adjusted p-values, aligned with the pairs
    pub fn adjusted(&self) -> &Array1<f64> {
        self.holm.adjusted()
    }

    /// Get the significance flags after correction, aligned with the pairs
    pub fn significant(&self) -> &Array1<bool> {
        self.holm.significant()
    }

    /// Number of pairs that are significantly different after correction
    pub fn n_significant(&self) -> usize {
        self.holm.n_significant()
    }

    fn index(&self, a: usize, b: usize) -> Option<usize> {
        let (a, b) = if a < b { (a, b) } else { (b, a) };
        if a == b || b >= self.n_treatments {
            return None;
        }
        Some(a * self.n_treatments - a * (a + 1) / 2 + (b - a - 1))
    }

    /// The signed-rank result of a pair in either order
    pub fn test(&self, a: usize, b: usize) -> Option<&SignedRankResult> {
        self.index(a, b).map(|idx| &self.tests[idx])
    }

    /// Whether a pair in either order is significantly different after correction.
    /// A treatment is never different from itself.
    pub fn is_significant(&self, a: usize, b: usize) -> bool {
        self.index(a, b)
            .map(|idx| self.holm.significant()[idx])
            .unwrap_or(false)
    }

    /// Symmetric `(k, k)` matrix of raw p-values with ones on the diagonal
    pub fn pvalue_matrix(&self) -> Array2<f64> {
        let mut matrix = Array2::ones((self.n_treatments, self.n_treatments));
        for ((a, b), test) in self.pairs.iter().zip(self.tests.iter()) {
            matrix[[*a, *b]] = test.pvalue();
            matrix[[*b, *a]] = test.pvalue();
        }
        matrix
    }

    /// Symmetric `(k, k)` matrix of significance flags after correction
    pub fn significance_matrix(&self) -> Array2<bool> {
        let mut matrix = Array2::from_elem((self.n_treatments, self.n_treatments), false);
        for ((a, b), s) in self.pairs.iter().zip(self.holm.significant().iter()) {
            matrix[[*a, *b]] = *s;
            matrix[[*b, *a]] = *s;
        }
        matrix
    }
}
