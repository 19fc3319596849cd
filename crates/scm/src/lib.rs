//! # SCM - Structural Causal Model Simulation (Notebook 1)
//!
//! This crate implements the toy data-generating machinery behind the causal
//! inference notebooks: declare a set of variables with their generating
//! mechanisms, sample a synthetic dataset that genuinely exhibits the declared
//! confounding/mediation/collision structure, then "control for" a variable
//! the crude way, by stratifying on it.
//!
//! ## Core Concepts
//!
//! - **Structural causal model**: an ordered list of variables, each either
//!   exogenous (draws from a parametric distribution) or endogenous (a
//!   weighted combination of already-declared parents plus noise)
//! - **Forward references only**: a parent must be declared before its child,
//!   so the model is a DAG by construction and needs no cycle detection
//! - **Stratification**: restricting a dataset to one value of a column
//!   removes that column's variability, and most of your data with it
//!
//! ## Example: Classic Confounding
//!
//! ```rust
//! use causal_scm::{Scm, VariableSpec};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! // Temperature confounds the price -> bookings relationship.
//! let model = Scm::from_specs(vec![
//!     ("temperature", VariableSpec::normal(23.0, 3.0)),
//!     ("price", VariableSpec::linear(&["temperature"], &[2.0], 5.0)),
//!     ("bookings", VariableSpec::linear(&["price", "temperature"], &[-1.0, 5.0], 5.0)),
//! ])
//! .unwrap();
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let data = model.simulate(10_000, &mut rng).unwrap();
//!
//! // Crude adjustment: hold temperature fixed.
//! let narrow = data.stratify_range("temperature", 19.5, 20.5).unwrap();
//! assert!(narrow.n_rows() < data.n_rows());
//! ```

mod dataset;
mod error;
mod model;
mod variable;

pub use dataset::Dataset;
pub use error::ScmError;
pub use model::Scm;
pub use variable::{Exogenous, Link, VariableSpec};
