//! # Stats - Correlation and Fitting for the Notebooks
//!
//! The notebooks measure association with a Pearson correlation coefficient
//! (plus a p-value) and draw lines of best fit over scatter plots. This crate
//! is that collaborator: it consumes plain `&[f64]` slices, so it knows
//! nothing about datasets or models.
//!
//! ## Example
//!
//! ```rust
//! use causal_stats::{fit_line, pearson};
//!
//! let x = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let y = [2.1, 3.9, 6.2, 8.1, 9.9];
//!
//! let corr = pearson(&x, &y).unwrap();
//! assert!(corr.r > 0.99);
//! assert!(corr.p_value < 0.05);
//!
//! let line = fit_line(&x, &y).unwrap();
//! assert!((line.slope - 2.0).abs() < 0.1);
//! ```

mod correlation;
mod describe;
mod error;
mod fit;

pub use correlation::{pearson, Correlation};
pub use describe::{mean, percentile, std_dev, variance};
pub use error::StatsError;
pub use fit::{fit_line, LineFit};
