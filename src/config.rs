use crate::{
    error::{CdError, Result},
    friedman::FriedmanVariant,
};

/// Configuration shared by every stage of the analysis
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CdConfig {
    /// Significance level of the omnibus and the pairwise tests
    pub alpha: f64,

    /// Rank the largest outcome first instead of the smallest
    pub maximize_outcome: bool,

    /// Distribution the Friedman statistic is compared against
    pub variant: FriedmanVariant,
}

impl Default for CdConfig {
    fn default() -> Self {
        Self {
            alpha: 0.05,
            maximize_outcome: false,
            variant: FriedmanVariant::default(),
        }
    }
}

impl CdConfig {
    pub fn new(alpha: f64, maximize_outcome: bool, variant: FriedmanVariant) -> Self {
        Self {
            alpha,
            maximize_outcome,
            variant,
        }
    }

    pub fn alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn maximize_outcome(mut self, maximize_outcome: bool) -> Self {
        self.maximize_outcome = maximize_outcome;
        self
    }

    pub fn variant(mut self, variant: FriedmanVariant) -> Self {
        self.variant = variant;
        self
    }

    /// Checks that alpha is a usable significance level
    pub fn validate(&self) -> Result<()> {
        if self.alpha > 0.0 && self.alpha < 1.0 {
            Ok(())
        } else {
            Err(CdError::InvalidAlpha(self.alpha))
        }
    }
}
