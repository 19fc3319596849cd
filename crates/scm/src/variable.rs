//! Variable specifications: the generating rule for one column.
//!
//! A variable is either *exogenous* (independent draws from a parametric
//! distribution) or *endogenous* (a weighted combination of already-realized
//! parent columns, passed through a link function). Representing the rules as
//! a tagged union rather than stored closures lets the model validate parent
//! ordering structurally instead of by runtime duck-typing, and makes a model
//! serializable.

use rand::distributions::{Distribution, Uniform};
use rand::Rng;
use rand_distr::Normal;
use serde::{Deserialize, Serialize};

use crate::error::ScmError;

/// A source distribution for an exogenous (root) variable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Exogenous {
    /// Gaussian draws N(mean, std_dev²).
    Normal { mean: f64, std_dev: f64 },
    /// Bernoulli draws in {0, 1} with success probability p.
    Bernoulli { p: f64 },
    /// Uniform draws over the half-open interval [low, high).
    Uniform { low: f64, high: f64 },
}

impl Exogenous {
    fn validate(&self, variable: &str) -> Result<(), ScmError> {
        let invalid = |reason: &str| ScmError::InvalidParameter {
            variable: variable.to_string(),
            reason: reason.to_string(),
        };
        match *self {
            Exogenous::Normal { std_dev, .. } => {
                if !(std_dev >= 0.0) {
                    return Err(invalid("standard deviation must be non-negative"));
                }
            }
            Exogenous::Bernoulli { p } => {
                if !(0.0..=1.0).contains(&p) {
                    return Err(invalid("probability must be in [0, 1]"));
                }
            }
            Exogenous::Uniform { low, high } => {
                if !(low < high) {
                    return Err(invalid("uniform bounds must satisfy low < high"));
                }
            }
        }
        Ok(())
    }

    /// Draw a column of `n` independent samples.
    pub(crate) fn sample_column<R: Rng>(
        &self,
        variable: &str,
        n: usize,
        rng: &mut R,
    ) -> Result<Vec<f64>, ScmError> {
        self.validate(variable)?;
        let column = match *self {
            Exogenous::Normal { mean, std_dev } => {
                let dist = Normal::new(mean, std_dev).map_err(|e| ScmError::InvalidParameter {
                    variable: variable.to_string(),
                    reason: e.to_string(),
                })?;
                (0..n).map(|_| dist.sample(rng)).collect()
            }
            Exogenous::Bernoulli { p } => (0..n)
                .map(|_| if rng.gen::<f64>() < p { 1.0 } else { 0.0 })
                .collect(),
            Exogenous::Uniform { low, high } => {
                let dist = Uniform::new(low, high);
                (0..n).map(|_| dist.sample(rng)).collect()
            }
        };
        Ok(column)
    }
}

/// Link function applied to the weighted sum of parent columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Link {
    /// Continuous outcome: `weighted_sum + N(0, noise_scale²)`.
    Identity,
    /// Binary outcome: a Bernoulli draw with probability `sigmoid(weighted_sum)`.
    /// The Bernoulli draw is the only stochasticity; no additive noise term.
    Logistic,
}

/// The generating rule for one named variable in a structural causal model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum VariableSpec {
    /// Independent draws from a parametric distribution.
    Exogenous(Exogenous),
    /// A function of already-declared parent variables.
    Endogenous {
        /// Parent variable names, all declared earlier in the model.
        parents: Vec<String>,
        /// One weight per parent, applied elementwise to the realized columns.
        weights: Vec<f64>,
        /// Gaussian noise scale for the identity link (ignored by the
        /// logistic link).
        noise_scale: f64,
        /// How the weighted sum becomes the output column.
        link: Link,
    },
}

impl VariableSpec {
    /// Gaussian root variable: N(mean, std_dev²).
    pub fn normal(mean: f64, std_dev: f64) -> Self {
        VariableSpec::Exogenous(Exogenous::Normal { mean, std_dev })
    }

    /// Bernoulli root variable in {0, 1}.
    pub fn bernoulli(p: f64) -> Self {
        VariableSpec::Exogenous(Exogenous::Bernoulli { p })
    }

    /// Uniform root variable over [low, high).
    pub fn uniform(low: f64, high: f64) -> Self {
        VariableSpec::Exogenous(Exogenous::Uniform { low, high })
    }

    /// Continuous child: `Σ weight_i * parent_i + N(0, noise_scale²)`.
    ///
    /// Mirrors the `linear_model(parents, weights, noise_scale)` helper of
    /// the source notebooks.
    pub fn linear(parents: &[&str], weights: &[f64], noise_scale: f64) -> Self {
        VariableSpec::Endogenous {
            parents: parents.iter().map(|p| p.to_string()).collect(),
            weights: weights.to_vec(),
            noise_scale,
            link: Link::Identity,
        }
    }

    /// Binary child: Bernoulli with probability `sigmoid(Σ weight_i * parent_i)`.
    pub fn logistic(parents: &[&str], weights: &[f64]) -> Self {
        VariableSpec::Endogenous {
            parents: parents.iter().map(|p| p.to_string()).collect(),
            weights: weights.to_vec(),
            noise_scale: 0.0,
            link: Link::Logistic,
        }
    }

    /// Parent names referenced by this spec (empty for exogenous variables).
    pub fn parents(&self) -> &[String] {
        match self {
            VariableSpec::Exogenous(_) => &[],
            VariableSpec::Endogenous { parents, .. } => parents,
        }
    }

    /// Check the spec's own parameters (not the parent ordering, which the
    /// model checks on insertion).
    pub(crate) fn validate(&self, variable: &str) -> Result<(), ScmError> {
        match self {
            VariableSpec::Exogenous(dist) => dist.validate(variable),
            VariableSpec::Endogenous {
                parents,
                weights,
                noise_scale,
                ..
            } => {
                if parents.len() != weights.len() {
                    return Err(ScmError::ArityMismatch {
                        variable: variable.to_string(),
                        parents: parents.len(),
                        weights: weights.len(),
                    });
                }
                if !(*noise_scale >= 0.0) {
                    return Err(ScmError::InvalidParameter {
                        variable: variable.to_string(),
                        reason: "noise scale must be non-negative".to_string(),
                    });
                }
                Ok(())
            }
        }
    }
}

/// Logistic sigmoid: 1 / (1 + e^{-z}).
pub(crate) fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}
