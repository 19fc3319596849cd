//! Least-squares line fitting (the `np.polyfit(x, y, 1)` of the notebooks).

use std::fmt;

use crate::error::StatsError;

/// A fitted line `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LineFit {
    /// Evaluate the fitted line at `x`.
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

impl fmt::Display for LineFit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "y = {:.4}x + {:.4}", self.slope, self.intercept)
    }
}

/// Fit a line by ordinary least squares.
///
/// # Errors
///
/// - [`StatsError::LengthMismatch`] if the series differ in length
/// - [`StatsError::TooFewSamples`] if fewer than 2 pairs are given
/// - [`StatsError::ConstantInput`] if `x` has zero variance (vertical line)
pub fn fit_line(x: &[f64], y: &[f64]) -> Result<LineFit, StatsError> {
    if x.len() != y.len() {
        return Err(StatsError::LengthMismatch {
            x_len: x.len(),
            y_len: y.len(),
        });
    }
    let n = x.len();
    if n < 2 {
        return Err(StatsError::TooFewSamples { got: n, required: 2 });
    }

    let mean_x = x.iter().sum::<f64>() / n as f64;
    let mean_y = y.iter().sum::<f64>() / n as f64;

    let mut sxx = 0.0;
    let mut sxy = 0.0;
    for (&xi, &yi) in x.iter().zip(y.iter()) {
        let dx = xi - mean_x;
        sxx += dx * dx;
        sxy += dx * (yi - mean_y);
    }
    if sxx == 0.0 {
        return Err(StatsError::ConstantInput);
    }

    let slope = sxy / sxx;
    Ok(LineFit {
        slope,
        intercept: mean_y - slope * mean_x,
    })
}
