use crate::utils::argsort;
use ndarray::{Array1, Axis};

#[derive(Debug, Clone)]
pub struct HolmResult {
    adjusted: Array1<f64>,
    significant: Array1<bool>,
}
impl HolmResult {
    pub fn new(adjusted: Array1<f64>, significant: Array1<bool>) -> Self {
        Self {
            adjusted,
            significant,
        }
    }
    /// Holm-adjusted p-values in the order of the input
    pub fn adjusted(&self) -> &Array1<f64> {
        &self.adjusted
    }
    /// Rejection flags in the order of the input
    pub fn significant(&self) -> &Array1<bool> {
        &self.significant
    }
    pub fn n_significant(&self) -> usize {
        self.significant.iter().filter(|x| **x).count()
    }
}

/// Holm's step-down correction of a family of p-values
#[derive(Debug)]
pub struct Holm<'a> {
    pvalues: &'a Array1<f64>,
    alpha: f64,
}

impl<'a> Holm<'a> {
    pub fn new(pvalues: &'a Array1<f64>, alpha: f64) -> Self {
        Self { pvalues, alpha }
    }

    pub fn fit(&self) -> HolmResult {
        let order = argsort(self.pvalues);
        let sorted_pvalues = self.pvalues.select(Axis(0), &order);
        let sorted_adjusted = Self::adjust(&sorted_pvalues);
        let sorted_significant = Self::step_down(&sorted_pvalues, self.alpha);

        let mut adjusted = Array1::zeros(self.pvalues.len());
        let mut significant = Array1::from_elem(self.pvalues.len(), false);
        for (rank, idx) in order.iter().enumerate() {
            adjusted[*idx] = sorted_adjusted[rank];
            significant[*idx] = sorted_significant[rank];
        }
        HolmResult::new(adjusted, significant)
    }

    /// Rejects the j-th smallest p-value while it stays below `alpha / (m - j + 1)`.
    /// The first failure stops every later rejection.
    fn step_down(sorted_pvalues: &Array1<f64>, alpha: f64) -> Array1<bool> {
        let m = sorted_pvalues.len();
        let mut rejecting = true;
        sorted_pvalues
            .iter()
            .enumerate()
            .map(|(j, p)| {
                rejecting = rejecting && *p <= alpha / (m - j) as f64;
                rejecting
            })
            .collect()
    }

    /// Adjusted p-values, made monotone along the sorted order and capped at 1
    fn adjust(sorted_pvalues: &Array1<f64>) -> Array1<f64> {
        let m = sorted_pvalues.len();
        let mut running_max = 0f64;
        sorted_pvalues
            .iter()
            .enumerate()
            .map(|(j, p)| {
                running_max = running_max.max((m - j) as f64 * p).min(1.);
                running_max
            })
            .collect()
    }
}
