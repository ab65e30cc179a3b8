use crate::{
    clique::Cliques,
    config::CdConfig,
    error::Result,
    friedman::Friedman,
    pairwise::PairwiseResult,
    rank::{average_ranks, rank_matrix},
    result::{CdResult, PostHoc},
    table::OutcomeTable,
};
use tracing::{debug, info};

/// Ranks the treatments of an outcome table and groups those that cannot be told apart.
///
/// A Friedman test first checks whether the treatments differ at all. Only if it rejects
/// are all pairs compared with Holm-corrected Wilcoxon signed-rank tests and the cliques
/// of indistinguishable treatments derived.
#[derive(Debug)]
pub struct CriticalDifference<'a> {
    table: &'a OutcomeTable,
    config: CdConfig,
}

impl<'a> CriticalDifference<'a> {
    pub fn new(table: &'a OutcomeTable, config: CdConfig) -> CriticalDifference<'a> {
        CriticalDifference { table, config }
    }

    pub fn fit(&self) -> Result<CdResult> {
        self.config.validate()?;
        let outcomes = self.table.outcomes();

        // rank the treatments within each observation
        let ranks = rank_matrix(outcomes, self.config.maximize_outcome);
        let avg_ranks = average_ranks(&ranks);
        debug!(
            n_observations = self.table.n_observations(),
            n_treatments = self.table.n_treatments(),
            "computed average ranks {}",
            avg_ranks
        );

        // omnibus test
        let omnibus = Friedman::new(&avg_ranks, self.table.n_observations(), self.config.variant)
            .fit()?;
        debug!(
            variant = ?self.config.variant,
            statistic = omnibus.statistic(),
            pvalue = omnibus.pvalue(),
            "friedman test"
        );

        if !omnibus.rejects(self.config.alpha) {
            info!(
                pvalue = omnibus.pvalue(),
                alpha = self.config.alpha,
                "no significant differences detected, skipping pairwise tests"
            );
            return Ok(CdResult::new(
                self.table.treatments().to_vec(),
                ranks,
                avg_ranks,
                omnibus,
                PostHoc::NotSignificant,
            ));
        }

        // post-hoc tests on every pair
        let pairwise = PairwiseResult::fit(outcomes, self.config.alpha)?;
        debug!(
            n_pairs = pairwise.pairs().len(),
            n_significant = pairwise.n_significant(),
            "holm-corrected signed-rank tests"
        );

        let cliques = Cliques::new(&avg_ranks, &pairwise.significance_matrix()).fit();
        info!(n_cliques = cliques.len(), "derived cliques");

        Ok(CdResult::new(
            self.table.treatments().to_vec(),
            ranks,
            avg_ranks,
            omnibus,
            PostHoc::Significant { pairwise, cliques },
        ))
    }

    /// Analyzes a sequence of named tables with one shared configuration.
    /// Results keep the order and the names of the input.
    pub fn fit_sequence<S>(
        tables: &[(S, OutcomeTable)],
        config: CdConfig,
    ) -> Result<Vec<(String, CdResult)>>
    where
        S: AsRef<str>,
    {
        tables
            .iter()
            .map(|(name, table)| {
                debug!(name = name.as_ref(), "analyzing sequence entry");
                CriticalDifference::new(table, config)
                    .fit()
                    .map(|result| (name.as_ref().to_string(), result))
            })
            .collect()
    }
}
