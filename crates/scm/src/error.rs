//! Error types for model construction, simulation, and dataset access.

use thiserror::Error;

/// Errors that can occur when declaring a model or working with a dataset.
#[derive(Debug, Clone, Error)]
pub enum ScmError {
    /// An endogenous variable references a parent that is not declared
    /// earlier in the model.
    #[error("variable '{variable}' references unknown parent '{parent}' (parents must be declared first)")]
    UnknownParent { variable: String, parent: String },

    /// The same variable name was declared twice.
    #[error("variable '{name}' is already declared")]
    DuplicateVariable { name: String },

    /// An endogenous variable has a different number of parents and weights.
    #[error("variable '{variable}' has {parents} parents but {weights} weights")]
    ArityMismatch {
        variable: String,
        parents: usize,
        weights: usize,
    },

    /// A distribution or noise parameter is outside its valid range.
    #[error("variable '{variable}' has an invalid parameter: {reason}")]
    InvalidParameter { variable: String, reason: String },

    /// Simulation was requested with zero samples.
    #[error("n_samples must be positive")]
    ZeroSamples,

    /// A dataset operation named a column that does not exist.
    #[error("unknown column '{name}'")]
    UnknownColumn { name: String },

    /// Columns of differing lengths were combined into one dataset.
    #[error("column '{name}' has {got} rows, expected {expected}")]
    ColumnLengthMismatch {
        name: String,
        expected: usize,
        got: usize,
    },
}
