use ndarray::{Array1, Array2, ArrayView1, Axis};
use statrs::statistics::{Data, OrderStatistics, RankTieBreaker};

/// Mid-ranks of a set of values. Rank 1 is given to the smallest value, or to the largest
/// value when `maximize` is set. Tied values share the mean of the ranks they occupy.
pub fn mid_ranks(values: ArrayView1<f64>, maximize: bool) -> Array1<f64> {
    let values = values
        .iter()
        .map(|x| if maximize { -x } else { *x })
        .collect::<Vec<f64>>();
    Array1::from_vec(Data::new(values).ranks(RankTieBreaker::Average))
}

/// Ranks the treatments (columns) within every observation (row) of an outcome matrix
pub fn rank_matrix(outcomes: &Array2<f64>, maximize: bool) -> Array2<f64> {
    let mut ranks = Array2::zeros(outcomes.raw_dim());
    for (row, mut rank_row) in outcomes
        .axis_iter(Axis(0))
        .zip(ranks.axis_iter_mut(Axis(0)))
    {
        rank_row.assign(&mid_ranks(row, maximize));
    }
    ranks
}

/// Mean rank of every treatment over all observations
pub fn average_ranks(ranks: &Array2<f64>) -> Array1<f64> {
    ranks.sum_axis(Axis(0)) / ranks.nrows() as f64
}
