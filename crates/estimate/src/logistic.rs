//! A logistic-regression outcome model trained by full-batch gradient
//! descent.
//!
//! This is the S-learner's single outcome model: it takes the treatment
//! indicator and the covariates as features and predicts the probability of
//! the binary outcome. Gradient descent on the log-loss is all it needs;
//! features should be standardized first so one learning rate fits all.

use crate::error::EstimateError;

/// Training configuration for [`LogisticRegression::fit`].
#[derive(Debug, Clone, Copy)]
pub struct TrainConfig {
    /// Gradient-descent step size.
    pub learning_rate: f64,
    /// Number of full-batch iterations.
    pub n_iterations: usize,
}

impl Default for TrainConfig {
    fn default() -> Self {
        TrainConfig {
            learning_rate: 0.1,
            n_iterations: 500,
        }
    }
}

/// A fitted logistic regression `P(y=1 | x) = sigmoid(w·x + b)`.
#[derive(Debug, Clone)]
pub struct LogisticRegression {
    /// One weight per feature.
    pub weights: Vec<f64>,
    /// Intercept term.
    pub intercept: f64,
}

impl LogisticRegression {
    /// Fit by full-batch gradient descent on the log-loss.
    ///
    /// `rows` is one feature vector per observation; `labels` are 0.0/1.0.
    ///
    /// # Errors
    ///
    /// Fails if rows and labels differ in length, the data is empty, or any
    /// label is not 0/1.
    pub fn fit(rows: &[Vec<f64>], labels: &[f64], config: TrainConfig) -> Result<Self, EstimateError> {
        if rows.is_empty() {
            return Err(EstimateError::EmptyDataset);
        }
        if rows.len() != labels.len() {
            return Err(EstimateError::LengthMismatch {
                rows: rows.len(),
                labels: labels.len(),
            });
        }
        if labels.iter().any(|&y| y != 0.0 && y != 1.0) {
            return Err(EstimateError::NonBinaryColumn {
                name: "labels".to_string(),
            });
        }

        let n = rows.len() as f64;
        let n_features = rows[0].len();
        let mut model = LogisticRegression {
            weights: vec![0.0; n_features],
            intercept: 0.0,
        };

        for _ in 0..config.n_iterations {
            let mut grad_w = vec![0.0; n_features];
            let mut grad_b = 0.0;

            for (row, &y) in rows.iter().zip(labels.iter()) {
                let residual = model.predict_proba(row) - y;
                for (g, &x) in grad_w.iter_mut().zip(row.iter()) {
                    *g += residual * x;
                }
                grad_b += residual;
            }

            for (w, g) in model.weights.iter_mut().zip(grad_w.iter()) {
                *w -= config.learning_rate * g / n;
            }
            model.intercept -= config.learning_rate * grad_b / n;
        }

        Ok(model)
    }

    /// Predicted probability of the positive class for one feature vector.
    pub fn predict_proba(&self, row: &[f64]) -> f64 {
        let z: f64 = self
            .weights
            .iter()
            .zip(row.iter())
            .map(|(w, x)| w * x)
            .sum::<f64>()
            + self.intercept;
        1.0 / (1.0 + (-z).exp())
    }
}
