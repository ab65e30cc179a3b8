use statrs::StatsError;
use thiserror::Error;

/// Errors raised while building an outcome table or running the analysis
#[derive(Debug, Error)]
pub enum CdError {
    #[error("at least two treatments are required, found {0}")]
    TooFewTreatments(usize),

    #[error("at least two observations are required, found {0}")]
    TooFewObservations(usize),

    #[error("treatment `{0}` is provided more than once")]
    DuplicateTreatment(String),

    #[error("treatment `{treatment}` has {found} outcomes but {expected} were expected")]
    MisalignedTreatment {
        treatment: String,
        expected: usize,
        found: usize,
    },

    #[error("treatment `{treatment}` is missing an outcome for observation `{observation}`")]
    MissingOutcome {
        treatment: String,
        observation: String,
    },

    #[error("treatment `{treatment}` has more than one outcome for observation `{observation}`")]
    DuplicateOutcome {
        treatment: String,
        observation: String,
    },

    #[error("treatment `{treatment}` has a non-finite outcome for observation `{observation}`")]
    NonFiniteOutcome {
        treatment: String,
        observation: String,
    },

    #[error("paired samples differ in length: {x} and {y}")]
    PairedLengthMismatch { x: usize, y: usize },

    #[error("{names} treatment names were provided for a matrix of {columns} columns")]
    NameCount { names: usize, columns: usize },

    #[error("alpha must lie strictly between 0 and 1, found {0}")]
    InvalidAlpha(f64),

    #[error("distribution error: {0}")]
    Distribution(#[from] StatsError),
}

pub type Result<T> = std::result::Result<T, CdError>;
