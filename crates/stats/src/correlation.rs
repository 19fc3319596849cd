//! Pearson correlation with a significance test.
//!
//! The coefficient measures linear association between two series and lies
//! in [-1, 1]. The p-value here uses the Fisher z-transform with a normal
//! approximation, which is accurate for the sample sizes the notebooks use
//! (thousands of rows); it is not the exact t test small-sample software
//! reports.

use std::fmt;

use crate::error::StatsError;

/// A Pearson correlation result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Correlation {
    /// Correlation coefficient in [-1, 1].
    pub r: f64,
    /// Two-sided p-value for the null hypothesis r = 0.
    pub p_value: f64,
    /// Number of paired observations.
    pub n: usize,
}

/// The `clean_corr` print format of the notebooks.
impl fmt::Display for Correlation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r = {:.3} (p = {:.3})", self.r, self.p_value)
    }
}

/// Compute the Pearson correlation between two equal-length series.
///
/// # Errors
///
/// - [`StatsError::LengthMismatch`] if the series differ in length
/// - [`StatsError::TooFewSamples`] if fewer than 4 pairs are given (the
///   Fisher z p-value needs n - 3 > 0)
/// - [`StatsError::ConstantInput`] if either series has zero variance
pub fn pearson(x: &[f64], y: &[f64]) -> Result<Correlation, StatsError> {
    if x.len() != y.len() {
        return Err(StatsError::LengthMismatch {
            x_len: x.len(),
            y_len: y.len(),
        });
    }
    let n = x.len();
    if n < 4 {
        return Err(StatsError::TooFewSamples { got: n, required: 4 });
    }

    let mean_x = x.iter().sum::<f64>() / n as f64;
    let mean_y = y.iter().sum::<f64>() / n as f64;

    let mut sxx = 0.0;
    let mut syy = 0.0;
    let mut sxy = 0.0;
    for (&xi, &yi) in x.iter().zip(y.iter()) {
        let dx = xi - mean_x;
        let dy = yi - mean_y;
        sxx += dx * dx;
        syy += dy * dy;
        sxy += dx * dy;
    }
    if sxx == 0.0 || syy == 0.0 {
        return Err(StatsError::ConstantInput);
    }

    // Rounding can push |r| marginally past 1.
    let r = (sxy / (sxx.sqrt() * syy.sqrt())).clamp(-1.0, 1.0);

    let p_value = if r.abs() >= 1.0 {
        0.0
    } else {
        // Fisher z: atanh(r) is approximately normal with sd 1/sqrt(n-3).
        let z = r.atanh() * ((n - 3) as f64).sqrt();
        2.0 * (1.0 - normal_cdf(z.abs()))
    };

    Ok(Correlation { r, p_value, n })
}

/// Standard normal CDF via the error function.
fn normal_cdf(z: f64) -> f64 {
    0.5 * (1.0 + erf(z / 2.0_f64.sqrt()))
}

/// Error function (erf) approximation, accurate to about 1.5e-7.
fn erf(x: f64) -> f64 {
    // Approximation from Abramowitz and Stegun
    let a1 = 0.254829592;
    let a2 = -0.284496736;
    let a3 = 1.421413741;
    let a4 = -1.453152027;
    let a5 = 1.061405429;
    let p = 0.3275911;

    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    let x = x.abs();

    let t = 1.0 / (1.0 + p * x);
    let y = 1.0 - (((((a5 * t + a4) * t) + a3) * t + a2) * t + a1) * t * (-x * x).exp();

    sign * y
}
