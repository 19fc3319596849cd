//! Error types for effect estimation.

use thiserror::Error;

/// Errors that can occur when training an outcome model or estimating an
/// effect.
#[derive(Debug, Clone, Error)]
pub enum EstimateError {
    /// A named column is missing from the dataset.
    #[error("unknown column '{name}'")]
    UnknownColumn { name: String },

    /// The dataset has no rows.
    #[error("dataset has no rows")]
    EmptyDataset,

    /// Treatment and outcome columns must contain only 0.0 and 1.0.
    #[error("column '{name}' must be binary (0/1)")]
    NonBinaryColumn { name: String },

    /// Feature rows and labels differ in length.
    #[error("got {rows} feature rows but {labels} labels")]
    LengthMismatch { rows: usize, labels: usize },

    /// Too few bootstrap replicates for a percentile interval.
    #[error("need at least {required} bootstrap replicates, got {got}")]
    TooFewReplicates { got: usize, required: usize },

    /// A statistic on the replicate distribution failed.
    #[error("statistics error: {0}")]
    Stats(#[from] causal_stats::StatsError),

    /// A dataset operation failed.
    #[error("dataset error: {0}")]
    Dataset(#[from] causal_scm::ScmError),
}
