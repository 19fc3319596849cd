//! G-computation with a single outcome model (the S-learner).
//!
//! Fit one model of the outcome given treatment and covariates, then ask it
//! two counterfactual questions: what would the mean outcome be if everyone
//! were treated, and if no one were? The difference is the average treatment
//! effect (ATE).
//!
//! Confidence intervals come from the percentile bootstrap: resample rows
//! with replacement, refit, re-estimate, and take the 2.5th and 97.5th
//! percentiles of the replicate ATEs.

use std::fmt;

use causal_scm::Dataset;
use causal_stats::percentile;
use rand::Rng;

use crate::error::EstimateError;
use crate::logistic::{LogisticRegression, TrainConfig};

/// A point estimate of the average treatment effect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AteEstimate {
    /// `E[Y | do(T=1)] - E[Y | do(T=0)]`.
    pub ate: f64,
    /// Mean predicted outcome with treatment forced on for every row.
    pub mean_treated: f64,
    /// Mean predicted outcome with treatment forced off for every row.
    pub mean_control: f64,
}

impl fmt::Display for AteEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "E[Y | do(T=1)] = {:.3}", self.mean_treated)?;
        writeln!(f, "E[Y | do(T=0)] = {:.3}", self.mean_control)?;
        write!(f, "ATE = {:.3}", self.ate)
    }
}

/// A percentile-bootstrap confidence interval for the ATE.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AteInterval {
    /// 2.5th percentile of the replicate ATEs.
    pub lower: f64,
    /// 97.5th percentile of the replicate ATEs.
    pub upper: f64,
    /// Number of bootstrap replicates.
    pub n_replicates: usize,
}

impl fmt::Display for AteInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "95% CI [{:.3}, {:.3}] ({} bootstrap replicates)",
            self.lower, self.upper, self.n_replicates
        )
    }
}

/// Estimate the ATE of a binary treatment on a binary outcome by
/// g-computation.
///
/// The outcome model is a logistic regression on `[treatment, covariates...]`
/// fit to the whole dataset. Continuous covariates should be standardized
/// first (see `Dataset::standardize_column`) so gradient descent behaves.
///
/// # Errors
///
/// Fails if a column is missing, the dataset is empty, or the treatment or
/// outcome column is not 0/1.
pub fn s_learner_ate(
    dataset: &Dataset,
    treatment: &str,
    outcome: &str,
    covariates: &[&str],
    config: TrainConfig,
) -> Result<AteEstimate, EstimateError> {
    if dataset.n_rows() == 0 {
        return Err(EstimateError::EmptyDataset);
    }

    let labels = binary_column(dataset, outcome)?.to_vec();
    let rows = design_matrix(dataset, treatment, covariates)?;
    let model = LogisticRegression::fit(&rows, &labels, config)?;

    // Counterfactual passes: same rows, treatment forced to 1 then to 0.
    let mut sum_treated = 0.0;
    let mut sum_control = 0.0;
    for row in &rows {
        let mut counterfactual = row.clone();
        counterfactual[0] = 1.0;
        sum_treated += model.predict_proba(&counterfactual);
        counterfactual[0] = 0.0;
        sum_control += model.predict_proba(&counterfactual);
    }

    let n = rows.len() as f64;
    let mean_treated = sum_treated / n;
    let mean_control = sum_control / n;
    Ok(AteEstimate {
        ate: mean_treated - mean_control,
        mean_treated,
        mean_control,
    })
}

/// Bootstrap a 95% percentile interval for the S-learner ATE.
///
/// Requires at least 40 replicates so the 2.5th percentile rests on actual
/// order statistics.
pub fn bootstrap_ate<R: Rng>(
    dataset: &Dataset,
    treatment: &str,
    outcome: &str,
    covariates: &[&str],
    config: TrainConfig,
    n_replicates: usize,
    rng: &mut R,
) -> Result<AteInterval, EstimateError> {
    const MIN_REPLICATES: usize = 40;
    if n_replicates < MIN_REPLICATES {
        return Err(EstimateError::TooFewReplicates {
            got: n_replicates,
            required: MIN_REPLICATES,
        });
    }
    if dataset.n_rows() == 0 {
        return Err(EstimateError::EmptyDataset);
    }

    let n_rows = dataset.n_rows();
    let mut ates = Vec::with_capacity(n_replicates);
    for _ in 0..n_replicates {
        let indices: Vec<usize> = (0..n_rows).map(|_| rng.gen_range(0..n_rows)).collect();
        let replicate = dataset.select_rows(&indices);
        let estimate = s_learner_ate(&replicate, treatment, outcome, covariates, config)?;
        ates.push(estimate.ate);
    }

    Ok(AteInterval {
        lower: percentile(&ates, 2.5)?,
        upper: percentile(&ates, 97.5)?,
        n_replicates,
    })
}

/// Feature rows `[treatment, covariates...]`, treatment first so the
/// counterfactual passes know which cell to overwrite.
pub(crate) fn design_matrix(
    dataset: &Dataset,
    treatment: &str,
    covariates: &[&str],
) -> Result<Vec<Vec<f64>>, EstimateError> {
    let t = binary_column(dataset, treatment)?;
    let mut feature_columns = vec![t];
    for name in covariates {
        feature_columns.push(column(dataset, name)?);
    }

    let n_rows = dataset.n_rows();
    let rows = (0..n_rows)
        .map(|i| feature_columns.iter().map(|col| col[i]).collect())
        .collect();
    Ok(rows)
}

pub(crate) fn column<'a>(dataset: &'a Dataset, name: &str) -> Result<&'a [f64], EstimateError> {
    dataset
        .column(name)
        .map_err(|_| EstimateError::UnknownColumn {
            name: name.to_string(),
        })
}

fn binary_column<'a>(dataset: &'a Dataset, name: &str) -> Result<&'a [f64], EstimateError> {
    let col = column(dataset, name)?;
    if col.iter().any(|&v| v != 0.0 && v != 1.0) {
        return Err(EstimateError::NonBinaryColumn {
            name: name.to_string(),
        });
    }
    Ok(col)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn treated_dataset() -> Dataset {
        // Outcome is 1 far more often under treatment.
        let treatment: Vec<f64> = (0..100).map(|i| (i % 2) as f64).collect();
        let outcome: Vec<f64> = treatment
            .iter()
            .enumerate()
            .map(|(i, &t)| {
                if t == 1.0 {
                    if i % 10 == 1 { 0.0 } else { 1.0 }
                } else if i % 10 == 0 {
                    1.0
                } else {
                    0.0
                }
            })
            .collect();
        Dataset::new(vec![
            ("treatment".to_string(), treatment),
            ("outcome".to_string(), outcome),
        ])
        .unwrap()
    }

    #[test]
    fn test_s_learner_detects_strong_effect() {
        let data = treated_dataset();
        let estimate = s_learner_ate(
            &data,
            "treatment",
            "outcome",
            &[],
            TrainConfig {
                learning_rate: 0.5,
                n_iterations: 2000,
            },
        )
        .unwrap();
        assert!(estimate.ate > 0.5, "ate = {}", estimate.ate);
        assert!(estimate.mean_treated > estimate.mean_control);
    }

    #[test]
    fn test_unknown_column_fails() {
        let data = treated_dataset();
        assert!(matches!(
            s_learner_ate(&data, "nope", "outcome", &[], TrainConfig::default()),
            Err(EstimateError::UnknownColumn { .. })
        ));
    }

    #[test]
    fn test_non_binary_treatment_fails() {
        let data = Dataset::new(vec![
            ("treatment".to_string(), vec![0.0, 0.5, 1.0]),
            ("outcome".to_string(), vec![0.0, 1.0, 1.0]),
        ])
        .unwrap();
        assert!(matches!(
            s_learner_ate(&data, "treatment", "outcome", &[], TrainConfig::default()),
            Err(EstimateError::NonBinaryColumn { .. })
        ));
    }

    #[test]
    fn test_bootstrap_requires_enough_replicates() {
        let data = treated_dataset();
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(
            bootstrap_ate(
                &data,
                "treatment",
                "outcome",
                &[],
                TrainConfig::default(),
                10,
                &mut rng
            ),
            Err(EstimateError::TooFewReplicates { .. })
        ));
    }

    #[test]
    fn test_design_matrix_puts_treatment_first() {
        let data = Dataset::new(vec![
            ("t".to_string(), vec![1.0, 0.0]),
            ("age".to_string(), vec![30.0, 40.0]),
        ])
        .unwrap();
        let rows = design_matrix(&data, "t", &["age"]).unwrap();
        assert_eq!(rows, vec![vec![1.0, 30.0], vec![0.0, 40.0]]);
    }
}
