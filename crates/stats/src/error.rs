//! Error types for statistical computations.

use thiserror::Error;

/// Errors that can occur when computing statistics.
#[derive(Debug, Clone, Error)]
pub enum StatsError {
    /// The two input series differ in length.
    #[error("series length mismatch: {x_len} vs {y_len}")]
    LengthMismatch { x_len: usize, y_len: usize },

    /// Not enough observations for the requested statistic.
    #[error("too few samples: got {got}, need at least {required}")]
    TooFewSamples { got: usize, required: usize },

    /// A series has zero variance, so the statistic is undefined.
    ///
    /// Over-aggressive stratification routinely produces such strata; the
    /// instability is the lesson, but it is surfaced as an error rather
    /// than a NaN.
    #[error("input series is constant; statistic is undefined")]
    ConstantInput,

    /// An empty series was supplied.
    #[error("input series is empty")]
    EmptyInput,
}
