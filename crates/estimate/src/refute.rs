//! Refutation checks: stress-test an estimate before believing it.
//!
//! Two checks that need no causal graph:
//!
//! - **Placebo treatment**: permute the treatment column and re-estimate.
//!   A real effect should vanish; if the "placebo" ATE survives, the
//!   estimator is picking up something other than the treatment.
//! - **Random common cause**: append an independent random covariate and
//!   re-estimate. The ATE should barely move; if it shifts, the estimate is
//!   fragile to the covariate set.

use std::fmt;

use causal_scm::Dataset;
use rand::seq::SliceRandom;
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

use crate::error::EstimateError;
use crate::gcomp::{column, s_learner_ate};
use crate::logistic::TrainConfig;

/// The before/after of one refutation check.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Refutation {
    /// ATE on the unmodified dataset.
    pub original_ate: f64,
    /// ATE after the refutation transform.
    pub refuted_ate: f64,
}

impl fmt::Display for Refutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "original ATE = {:.3}, refuted ATE = {:.3}",
            self.original_ate, self.refuted_ate
        )
    }
}

/// Re-estimate with the treatment column randomly permuted.
///
/// The permutation breaks any treatment/outcome link while preserving the
/// treatment's marginal distribution, so the refuted ATE should collapse
/// toward zero.
pub fn placebo_treatment<R: Rng>(
    dataset: &Dataset,
    treatment: &str,
    outcome: &str,
    covariates: &[&str],
    config: TrainConfig,
    rng: &mut R,
) -> Result<Refutation, EstimateError> {
    let original = s_learner_ate(dataset, treatment, outcome, covariates, config)?;

    let mut placebo_column = column(dataset, treatment)?.to_vec();
    placebo_column.shuffle(rng);

    let mut placebo = dataset.clone();
    placebo.set_column(treatment, placebo_column)?;
    let refuted = s_learner_ate(&placebo, treatment, outcome, covariates, config)?;

    Ok(Refutation {
        original_ate: original.ate,
        refuted_ate: refuted.ate,
    })
}

/// Re-estimate with an independent standard-normal covariate appended.
///
/// The new column is causally unrelated to everything, so a stable estimate
/// should be essentially unchanged.
pub fn random_common_cause<R: Rng>(
    dataset: &Dataset,
    treatment: &str,
    outcome: &str,
    covariates: &[&str],
    config: TrainConfig,
    rng: &mut R,
) -> Result<Refutation, EstimateError> {
    let original = s_learner_ate(dataset, treatment, outcome, covariates, config)?;

    let noise: Vec<f64> = (0..dataset.n_rows())
        .map(|_| StandardNormal.sample(rng))
        .collect();
    let mut augmented = dataset.clone();
    augmented.push_column("random_common_cause".to_string(), noise)?;

    let mut augmented_covariates: Vec<&str> = covariates.to_vec();
    augmented_covariates.push("random_common_cause");
    let refuted = s_learner_ate(&augmented, treatment, outcome, &augmented_covariates, config)?;

    Ok(Refutation {
        original_ate: original.ate,
        refuted_ate: refuted.ate,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn strong_effect_dataset() -> Dataset {
        let treatment: Vec<f64> = (0..200).map(|i| (i % 2) as f64).collect();
        let outcome: Vec<f64> = treatment
            .iter()
            .enumerate()
            .map(|(i, &t)| {
                if t == 1.0 {
                    if i % 20 == 1 { 0.0 } else { 1.0 }
                } else if i % 20 == 0 {
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

    fn config() -> TrainConfig {
        TrainConfig {
            learning_rate: 0.5,
            n_iterations: 2000,
        }
    }

    #[test]
    fn test_placebo_collapses_strong_effect() {
        let data = strong_effect_dataset();
        let mut rng = StdRng::seed_from_u64(11);
        let refutation =
            placebo_treatment(&data, "treatment", "outcome", &[], config(), &mut rng).unwrap();

        assert!(refutation.original_ate > 0.5);
        assert!(
            refutation.refuted_ate.abs() < refutation.original_ate / 2.0,
            "placebo ATE did not collapse: {refutation}"
        );
    }

    #[test]
    fn test_random_common_cause_barely_moves_estimate() {
        let data = strong_effect_dataset();
        let mut rng = StdRng::seed_from_u64(12);
        let refutation =
            random_common_cause(&data, "treatment", "outcome", &[], config(), &mut rng).unwrap();

        assert!(
            (refutation.refuted_ate - refutation.original_ate).abs() < 0.1,
            "estimate moved too much: {refutation}"
        );
        // The input dataset is untouched.
        assert_eq!(data.n_columns(), 2);
    }
}
