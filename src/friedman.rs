use crate::error::Result;
use ndarray::Array1;
use statrs::distribution::{ChiSquared, ContinuousCDF, FisherSnedecor};

/// Defines which distribution the Friedman statistic is compared against
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub enum FriedmanVariant {
    /// The Iman-Davenport transform of the statistic, compared against an F distribution
    #[default]
    FDist,

    /// The classic statistic, compared against a Chi-squared distribution
    Chisq,
}

/// Outcome of a Friedman test. Both variants share the same accessors.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TestResult {
    FDist {
        statistic: f64,
        chisq_statistic: f64,
        df1: f64,
        df2: f64,
        pvalue: f64,
    },
    Chisq {
        statistic: f64,
        df: f64,
        pvalue: f64,
    },
}
impl TestResult {
    pub fn variant(&self) -> FriedmanVariant {
        match self {
            Self::FDist { .. } => FriedmanVariant::FDist,
            Self::Chisq { .. } => FriedmanVariant::Chisq,
        }
    }

    pub fn statistic(&self) -> f64 {
        match self {
            Self::FDist { statistic, .. } | Self::Chisq { statistic, .. } => *statistic,
        }
    }

    /// Degrees of freedom of the reference distribution.
    /// The Chi-squared variant has a single parameter.
    pub fn degrees_of_freedom(&self) -> (f64, Option<f64>) {
        match self {
            Self::FDist { df1, df2, .. } => (*df1, Some(*df2)),
            Self::Chisq { df, .. } => (*df, None),
        }
    }

    pub fn pvalue(&self) -> f64 {
        match self {
            Self::FDist { pvalue, .. } | Self::Chisq { pvalue, .. } => *pvalue,
        }
    }

    /// Whether the null hypothesis of equal treatments is rejected at `alpha`
    pub fn rejects(&self, alpha: f64) -> bool {
        self.pvalue() < alpha
    }
}

/// Friedman test over the average ranks of `k` treatments in `n` observations
#[derive(Debug)]
pub struct Friedman<'a> {
    average_ranks: &'a Array1<f64>,
    n_observations: usize,
    variant: FriedmanVariant,
}

impl<'a> Friedman<'a> {
    pub fn new(
        average_ranks: &'a Array1<f64>,
        n_observations: usize,
        variant: FriedmanVariant,
    ) -> Self {
        Self {
            average_ranks,
            n_observations,
            variant,
        }
    }

    pub fn fit(&self) -> Result<TestResult> {
        let n = self.n_observations as f64;
        let k = self.average_ranks.len() as f64;
        let chisq = Self::chisq_statistic(self.average_ranks, n);

        match self.variant {
            FriedmanVariant::Chisq => {
                let df = k - 1.;
                let pvalue = 1. - ChiSquared::new(df)?.cdf(chisq);
                Ok(TestResult::Chisq {
                    statistic: chisq,
                    df,
                    pvalue,
                })
            }
            FriedmanVariant::FDist => {
                let df1 = k - 1.;
                let df2 = (k - 1.) * (n - 1.);
                let statistic = Self::f_statistic(chisq, n, k);
                let pvalue = if statistic.is_finite() {
                    1. - FisherSnedecor::new(df1, df2)?.cdf(statistic)
                } else {
                    0.
                };
                Ok(TestResult::FDist {
                    statistic,
                    chisq_statistic: chisq,
                    df1,
                    df2,
                    pvalue,
                })
            }
        }
    }

    /// Calculates the classic Friedman statistic from the average ranks
    fn chisq_statistic(average_ranks: &Array1<f64>, n: f64) -> f64 {
        let k = average_ranks.len() as f64;
        let squares = average_ranks.mapv(|r| r * r).sum();
        let statistic = (12. * n) / (k * (k + 1.)) * (squares - k * (k + 1.).powi(2) / 4.);
        // guards against tiny negative values from rounding when all ranks are equal
        statistic.max(0.)
    }

    /// Transforms the Chi-squared statistic into an F-distributed statistic.
    /// Perfect agreement between all observations yields an infinite statistic.
    fn f_statistic(chisq: f64, n: f64, k: f64) -> f64 {
        let denominator = n * (k - 1.) - chisq;
        if denominator <= 0. {
            f64::INFINITY
        } else {
            ((n - 1.) * chisq) / denominator
        }
    }
}

#[cfg(test)]
mod testing {
    use super::*;
    use crate::rank::{average_ranks, rank_matrix};
    use ndarray::{array, Array2};
    use ndarray_rand::{
        rand::{rngs::StdRng, SeedableRng},
        rand_distr::Normal,
        RandomExt,
    };

    #[test]
    fn test_chisq_statistic() {
        let ranks = array![1., 2.5, 2.5];
        assert_eq!(Friedman::chisq_statistic(&ranks, 10.), 15.);
    }

    #[test]
    fn test_f_statistic() {
        assert_eq!(Friedman::f_statistic(15., 10., 3.), 27.);
        assert_eq!(Friedman::f_statistic(20., 10., 3.), f64::INFINITY);
    }

    #[test]
    fn test_fdist_variant() {
        let ranks = array![1., 2.5, 2.5];
        let result = Friedman::new(&ranks, 10, FriedmanVariant::FDist).fit().unwrap();
        assert_eq!(result.variant(), FriedmanVariant::FDist);
        assert_eq!(result.statistic(), 27.);
        assert_eq!(result.degrees_of_freedom(), (2., Some(18.)));
        assert!(result.pvalue() < 1e-4);
        assert!(result.rejects(0.05));
    }

    #[test]
    fn test_chisq_variant() {
        let ranks = array![1., 2.5, 2.5];
        let result = Friedman::new(&ranks, 10, FriedmanVariant::Chisq).fit().unwrap();
        assert_eq!(result.variant(), FriedmanVariant::Chisq);
        assert_eq!(result.statistic(), 15.);
        assert_eq!(result.degrees_of_freedom(), (2., None));
        // survival function of chi2(2) is exp(-x/2)
        assert!((result.pvalue() - (-7.5f64).exp()).abs() < 1e-9);
    }

    #[test]
    fn test_perfect_agreement() {
        let ranks = array![1., 2., 3.];
        let result = Friedman::new(&ranks, 5, FriedmanVariant::FDist).fit().unwrap();
        assert_eq!(result.statistic(), f64::INFINITY);
        assert_eq!(result.pvalue(), 0.);
    }

    #[test]
    fn test_identical_treatments() {
        let ranks = array![2.5, 2.5, 2.5, 2.5];
        for variant in [FriedmanVariant::FDist, FriedmanVariant::Chisq] {
            let result = Friedman::new(&ranks, 8, variant).fit().unwrap();
            assert_eq!(result.statistic(), 0.);
            assert_eq!(result.pvalue(), 1.);
            assert!(!result.rejects(0.05));
        }
    }

    #[test]
    fn test_variants_agree_on_planted_effect() {
        let mut rng = StdRng::seed_from_u64(3);
        let (n, k) = (60, 6);
        let noise = Array2::random_using((n, k), Normal::new(0., 1.).unwrap(), &mut rng);
        let outcomes = Array2::from_shape_fn((n, k), |(i, t)| noise[[i, t]] + t as f64);
        let avg = average_ranks(&rank_matrix(&outcomes, false));

        let f = Friedman::new(&avg, n, FriedmanVariant::FDist).fit().unwrap();
        let c = Friedman::new(&avg, n, FriedmanVariant::Chisq).fit().unwrap();
        assert!(f.rejects(0.05));
        assert!(c.rejects(0.05));
    }

    #[test]
    fn test_pvalues_bounded_without_effect() {
        let mut rng = StdRng::seed_from_u64(11);
        let (n, k) = (60, 6);
        let noise = Array2::random_using((n, k), Normal::new(0., 1.).unwrap(), &mut rng);
        let avg = average_ranks(&rank_matrix(&noise, false));

        let f = Friedman::new(&avg, n, FriedmanVariant::FDist).fit().unwrap();
        let c = Friedman::new(&avg, n, FriedmanVariant::Chisq).fit().unwrap();
        assert!(f.pvalue() > 0. && f.pvalue() <= 1.);
        assert!(c.pvalue() > 0. && c.pvalue() <= 1.);
    }
}
