use crate::{
    error::{CdError, Result},
    utils::tie_group_sizes,
};
use ndarray::{Array1, ArrayView1};
use statrs::{
    distribution::{ContinuousCDF, Normal},
    statistics::{Data, OrderStatistics, RankTieBreaker},
};

/// Largest number of non-zero differences for which the exact null distribution is used
pub const EXACT_LIMIT: usize = 50;

/// Defines the alternative hypothesis
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub enum Alternative {
    /// The alternative hypothesis is that the first array is greater than the second array
    Greater,

    /// The alternative hypothesis is that the first array is less than the second array
    Less,

    /// The alternative hypothesis is that the first array is not equal to the second array
    #[default]
    TwoSided,
}

/// Null distribution the p-value was computed from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Exact,
    Approximate,
}

/// Result of a single Wilcoxon signed-rank test
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SignedRankResult {
    w_plus: f64,
    w_minus: f64,
    n_nonzero: usize,
    pvalue: f64,
    method: Method,
}
impl SignedRankResult {
    /// Rank sum of the positive differences
    pub fn w_plus(&self) -> f64 {
        self.w_plus
    }

    /// Rank sum of the negative differences
    pub fn w_minus(&self) -> f64 {
        self.w_minus
    }

    /// The test statistic, `min(W+, W-)`
    pub fn statistic(&self) -> f64 {
        self.w_plus.min(self.w_minus)
    }

    /// Number of differences that were not zero
    pub fn n_nonzero(&self) -> usize {
        self.n_nonzero
    }

    pub fn pvalue(&self) -> f64 {
        self.pvalue
    }

    pub fn method(&self) -> Method {
        self.method
    }
}

/// Mid-ranks of the absolute values of the non-zero differences
fn absolute_ranks(differences: &[f64]) -> Vec<f64> {
    let absolute = differences.iter().map(|d| d.abs()).collect::<Vec<f64>>();
    Data::new(absolute).ranks(RankTieBreaker::Average)
}

/// Sums the ranks of the positive and of the negative differences
///
/// # Arguments
/// * `differences` - The non-zero paired differences
/// * `ranks` - The mid-ranks of their absolute values
///
/// # Returns
/// * `(w_plus, w_minus)` - The rank sums of the positive and the negative differences
fn signed_rank_sums(differences: &[f64], ranks: &[f64]) -> (f64, f64) {
    differences
        .iter()
        .zip(ranks.iter())
        .fold((0f64, 0f64), |(plus, minus), (d, r)| {
            if *d > 0. {
                (plus + r, minus)
            } else {
                (plus, minus + r)
            }
        })
}

/// Mid-ranks are multiples of one half, so doubling them gives integers
fn doubled_ranks(ranks: &[f64]) -> Vec<usize> {
    ranks.iter().map(|r| (2. * r).round() as usize).collect()
}

/// Counts, for every possible value `s` of `2 W+`, the number of sign assignments
/// over the doubled ranks whose positive part sums to `s`.
///
/// # Arguments
/// * `doubled` - The doubled mid-ranks of the absolute differences
///
/// # Returns
/// * `counts` - A vector of length `sum(doubled) + 1` summing to `2^n`
fn exact_counts(doubled: &[usize]) -> Vec<u64> {
    let max_sum: usize = doubled.iter().sum();
    let mut counts = vec![0u64; max_sum + 1];
    counts[0] = 1;
    let mut reachable = 0;
    for rank in doubled {
        reachable += rank;
        for s in (*rank..=reachable).rev() {
            counts[s] += counts[s - rank];
        }
    }
    counts
}

/// Probability that `W+ <= w` under the exact null distribution described by `counts`
fn exact_lower_tail(w: f64, counts: &[u64]) -> f64 {
    if w < 0. {
        return 0.;
    }
    let upto = ((2. * w).round() as usize).min(counts.len() - 1);
    let hits: u64 = counts[..=upto].iter().sum();
    let total: u64 = counts.iter().sum();
    hits as f64 / total as f64
}

/// Calculates the mean of the `W+` null distribution
fn w_mean(n: f64) -> f64 {
    n * (n + 1.) / 4.
}

/// Calculates the standard deviation of the `W+` null distribution,
/// reduced for groups of tied absolute differences
fn w_std(n: f64, tie_sizes: &[usize]) -> f64 {
    let correction: f64 = tie_sizes
        .iter()
        .map(|t| {
            let t = *t as f64;
            t * t * t - t
        })
        .sum();
    (n * (n + 1.) * (2. * n + 1.) / 24. - correction / 48.).sqrt()
}

/// Probability that `W+ <= w` under the normal approximation.
//
// Continuity correction.
// The lower tail always _adds_ 0.5 so the probability mass _at_ w is included.
fn approximate_lower_tail(w: f64, n: f64, tie_sizes: &[usize]) -> Result<f64> {
    let s_w = w_std(n, tie_sizes);
    if s_w <= 0. {
        return Ok(1.);
    }
    let z = (w - w_mean(n) + 0.5) / s_w;
    Ok(Normal::new(0., 1.)?.cdf(z))
}

/// Performs the Wilcoxon signed-rank test on the paired differences `x - y`.
///
/// Zero differences are discarded. If every difference is zero the two samples are
/// indistinguishable and the p-value is 1. For up to [`EXACT_LIMIT`] non-zero differences
/// the p-value comes from enumerating every sign assignment over the mid-ranks, ties
/// included. Larger samples use the tie-corrected normal approximation.
pub fn wilcoxon_signed_rank(
    x: ArrayView1<f64>,
    y: ArrayView1<f64>,
    alternative: Alternative,
) -> Result<SignedRankResult> {
    if x.len() != y.len() {
        return Err(CdError::PairedLengthMismatch {
            x: x.len(),
            y: y.len(),
        });
    }

    let differences = x
        .iter()
        .zip(y.iter())
        .map(|(a, b)| a - b)
        .filter(|d| *d != 0.)
        .collect::<Vec<f64>>();
    let n_nonzero = differences.len();

    if n_nonzero == 0 {
        return Ok(SignedRankResult {
            w_plus: 0.,
            w_minus: 0.,
            n_nonzero,
            pvalue: 1.,
            method: Method::Exact,
        });
    }

    let ranks = absolute_ranks(&differences);
    let (w_plus, w_minus) = signed_rank_sums(&differences, &ranks);
    let total = w_plus + w_minus;

    let method = if n_nonzero <= EXACT_LIMIT {
        Method::Exact
    } else {
        Method::Approximate
    };

    // P(W+ >= w) equals P(W+ <= total - w) by symmetry of the null distribution
    let (lower, upper) = match method {
        Method::Exact => {
            let counts = exact_counts(&doubled_ranks(&ranks));
            (
                exact_lower_tail(w_plus, &counts),
                exact_lower_tail(total - w_plus, &counts),
            )
        }
        Method::Approximate => {
            let n = n_nonzero as f64;
            let absolute = Array1::from_iter(differences.iter().map(|d| d.abs()));
            let tie_sizes = tie_group_sizes(&absolute);
            (
                approximate_lower_tail(w_plus, n, &tie_sizes)?,
                approximate_lower_tail(total - w_plus, n, &tie_sizes)?,
            )
        }
    };

    let pvalue = match alternative {
        Alternative::Less => lower,
        Alternative::Greater => upper,
        Alternative::TwoSided => 2. * lower.min(upper),
    }
    .min(1.);

    Ok(SignedRankResult {
        w_plus,
        w_minus,
        n_nonzero,
        pvalue,
        method,
    })
}
