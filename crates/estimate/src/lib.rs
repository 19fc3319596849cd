//! # Estimate - G-Computation and Refutation (Notebooks 2-3)
//!
//! The crude stratification of notebook 1 throws data away; this crate does
//! adjustment the modeled way. One outcome model (an S-learner) is trained
//! on treatment plus covariates, then queried under `do(T=1)` and `do(T=0)`
//! to produce an average treatment effect, with bootstrap confidence
//! intervals and two robustness checks borrowed from the refutation step of
//! the model/identify/estimate/refute workflow.
//!
//! ## Example
//!
//! ```rust
//! use causal_estimate::{s_learner_ate, TrainConfig};
//! use causal_scm::Dataset;
//!
//! let data = Dataset::new(vec![
//!     ("plan".to_string(), vec![1.0, 1.0, 1.0, 0.0, 0.0, 0.0]),
//!     ("churn".to_string(), vec![1.0, 1.0, 0.0, 0.0, 0.0, 1.0]),
//! ])
//! .unwrap();
//!
//! let estimate = s_learner_ate(&data, "plan", "churn", &[], TrainConfig::default()).unwrap();
//! assert!(estimate.ate > 0.0);
//! ```
//!
//! Graph-based identification (backdoor criteria and friends) is out of
//! scope here; the covariate set is the caller's claim, and the refuters
//! only probe whether the estimate survives stress.

mod error;
mod gcomp;
mod logistic;
mod refute;

pub use error::EstimateError;
pub use gcomp::{bootstrap_ate, s_learner_ate, AteEstimate, AteInterval};
pub use logistic::{LogisticRegression, TrainConfig};
pub use refute::{placebo_treatment, random_common_cause, Refutation};
