use anyhow::Result;
use critdiff::{CdConfig, CriticalDifference, OutcomeTable};
use ndarray::Array2;
use ndarray_rand::{rand_distr::Normal, RandomExt};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let (n, k) = (25, 5);
    let treatments = (0..k)
        .map(|x| format!("method.{}", x))
        .collect::<Vec<String>>();
    let noise = Array2::random((n, k), Normal::new(0., 1.)?);
    let outcomes = Array2::from_shape_fn((n, k), |(i, t)| noise[[i, t]] + 0.5 * t as f64);

    let table = OutcomeTable::from_matrix(outcomes, Some(treatments))?;
    let res = CriticalDifference::new(&table, CdConfig::default()).fit()?;

    for (treatment, rank) in res.treatments().iter().zip(res.average_ranks().iter()) {
        println!("{}\t{:.3}", treatment, rank);
    }
    println!(
        "friedman: statistic = {:.4}, p = {:.4e}",
        res.omnibus().statistic(),
        res.omnibus().pvalue()
    );
    match res.clique_names() {
        Some(cliques) => {
            for clique in cliques {
                println!("clique: {}", clique.join(", "));
            }
        }
        None => println!("no significant differences detected"),
    }
    Ok(())
}
