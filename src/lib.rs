pub mod cd;
pub mod clique;
pub mod config;
pub mod encode;
pub mod error;
pub mod friedman;
pub mod holm;
pub mod pairwise;
pub mod rank;
pub mod result;
pub mod table;
pub mod utils;
pub mod wilcoxon;

pub use cd::CriticalDifference;
pub use clique::{Clique, Cliques};
pub use config::CdConfig;
pub use encode::EncodeIndex;
pub use error::{CdError, Result};
pub use friedman::{Friedman, FriedmanVariant, TestResult};
pub use holm::{Holm, HolmResult};
pub use pairwise::PairwiseResult;
pub use result::{CdResult, PostHoc};
pub use table::OutcomeTable;
pub use wilcoxon::{wilcoxon_signed_rank, Alternative, SignedRankResult};
