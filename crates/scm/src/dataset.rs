//! Tabular datasets: named `f64` columns, one row per simulated unit.
//!
//! The dataset is deliberately small and column-oriented. Stratification
//! never mutates its input; it returns a fresh table with row order
//! preserved. An empty stratum is a valid result, not an error -- over-eager
//! stratification throwing away nearly all the data is part of the lesson.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ScmError;

/// A table of named columns, all the same length.
///
/// # Example
///
/// ```rust
/// use causal_scm::Dataset;
///
/// let data = Dataset::new(vec![
///     ("x".to_string(), vec![1.0, 2.0, 3.0]),
///     ("group".to_string(), vec![0.0, 1.0, 0.0]),
/// ])
/// .unwrap();
///
/// let stratum = data.stratify("group", 0.0).unwrap();
/// assert_eq!(stratum.n_rows(), 2);
/// assert_eq!(stratum.column("x").unwrap(), &[1.0, 3.0]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "Vec<(String, Vec<f64>)>",
    into = "Vec<(String, Vec<f64>)>"
)]
pub struct Dataset {
    names: Vec<String>,
    columns: Vec<Vec<f64>>,
}

/// Deserialization funnels through [`Dataset::new`], so ragged or
/// duplicate-named columns are rejected wherever the table comes from.
impl TryFrom<Vec<(String, Vec<f64>)>> for Dataset {
    type Error = ScmError;

    fn try_from(columns: Vec<(String, Vec<f64>)>) -> Result<Self, ScmError> {
        Dataset::new(columns)
    }
}

impl From<Dataset> for Vec<(String, Vec<f64>)> {
    fn from(dataset: Dataset) -> Self {
        dataset.names.into_iter().zip(dataset.columns).collect()
    }
}

impl Dataset {
    /// Create a dataset from named columns.
    ///
    /// # Errors
    ///
    /// Fails if a name repeats or the columns differ in length.
    pub fn new(columns: Vec<(String, Vec<f64>)>) -> Result<Self, ScmError> {
        let mut dataset = Dataset {
            names: Vec::new(),
            columns: Vec::new(),
        };
        for (name, column) in columns {
            dataset.push_column(name, column)?;
        }
        Ok(dataset)
    }

    /// An empty dataset with no columns and no rows.
    pub fn empty() -> Self {
        Dataset {
            names: Vec::new(),
            columns: Vec::new(),
        }
    }

    /// Number of rows.
    pub fn n_rows(&self) -> usize {
        self.columns.first().map(|c| c.len()).unwrap_or(0)
    }

    /// Number of columns.
    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    /// Column names in declaration order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Result<&[f64], ScmError> {
        let idx = self.column_index(name)?;
        Ok(&self.columns[idx])
    }

    /// Append a column. Its length must match the existing rows.
    pub fn push_column(&mut self, name: String, column: Vec<f64>) -> Result<(), ScmError> {
        if self.names.iter().any(|n| *n == name) {
            return Err(ScmError::DuplicateVariable { name });
        }
        if !self.columns.is_empty() && column.len() != self.n_rows() {
            return Err(ScmError::ColumnLengthMismatch {
                name,
                expected: self.n_rows(),
                got: column.len(),
            });
        }
        self.names.push(name);
        self.columns.push(column);
        Ok(())
    }

    /// Replace an existing column's values.
    pub fn set_column(&mut self, name: &str, column: Vec<f64>) -> Result<(), ScmError> {
        let idx = self.column_index(name)?;
        if column.len() != self.n_rows() {
            return Err(ScmError::ColumnLengthMismatch {
                name: name.to_string(),
                expected: self.n_rows(),
                got: column.len(),
            });
        }
        self.columns[idx] = column;
        Ok(())
    }

    /// Round a column to the given number of decimal places.
    ///
    /// The notebooks do this to simulated data "to make it seem more real",
    /// and because exact-equality stratification on an unrounded continuous
    /// column matches almost nothing.
    pub fn round_column(&mut self, name: &str, decimals: u32) -> Result<(), ScmError> {
        let idx = self.column_index(name)?;
        let factor = 10f64.powi(decimals as i32);
        for v in &mut self.columns[idx] {
            *v = (*v * factor).round() / factor;
        }
        Ok(())
    }

    /// Rescale a column to zero mean and unit variance.
    ///
    /// A constant column is left unchanged.
    pub fn standardize_column(&mut self, name: &str) -> Result<(), ScmError> {
        let idx = self.column_index(name)?;
        let n = self.columns[idx].len();
        if n == 0 {
            return Ok(());
        }
        let mean = self.columns[idx].iter().sum::<f64>() / n as f64;
        let var = self.columns[idx]
            .iter()
            .map(|v| (v - mean) * (v - mean))
            .sum::<f64>()
            / n as f64;
        let std_dev = var.sqrt();
        if std_dev == 0.0 {
            return Ok(());
        }
        for v in &mut self.columns[idx] {
            *v = (*v - mean) / std_dev;
        }
        Ok(())
    }

    /// Restrict to rows where `name` equals `value` exactly.
    ///
    /// Exact floating-point equality is intentional: for continuous columns
    /// the caller is expected to round or bin first (see
    /// [`Dataset::round_column`] and [`Dataset::stratify_range`]). Matching
    /// zero rows is a valid outcome.
    pub fn stratify(&self, name: &str, value: f64) -> Result<Dataset, ScmError> {
        let idx = self.column_index(name)?;
        let rows: Vec<usize> = self.columns[idx]
            .iter()
            .enumerate()
            .filter(|(_, &v)| v == value)
            .map(|(i, _)| i)
            .collect();
        Ok(self.select_rows(&rows))
    }

    /// Restrict to rows where `name` falls in the half-open bucket `[low, high)`.
    pub fn stratify_range(&self, name: &str, low: f64, high: f64) -> Result<Dataset, ScmError> {
        let idx = self.column_index(name)?;
        let rows: Vec<usize> = self.columns[idx]
            .iter()
            .enumerate()
            .filter(|(_, &v)| v >= low && v < high)
            .map(|(i, _)| i)
            .collect();
        Ok(self.select_rows(&rows))
    }

    /// Build a new dataset from the given row indices, in the given order.
    ///
    /// Indices may repeat (bootstrap resampling relies on this).
    ///
    /// # Panics
    ///
    /// Panics if any index is `>= self.n_rows()`.
    pub fn select_rows(&self, rows: &[usize]) -> Dataset {
        Dataset {
            names: self.names.clone(),
            columns: self
                .columns
                .iter()
                .map(|col| rows.iter().map(|&i| col[i]).collect())
                .collect(),
        }
    }

    fn column_index(&self, name: &str) -> Result<usize, ScmError> {
        self.names
            .iter()
            .position(|n| n == name)
            .ok_or_else(|| ScmError::UnknownColumn {
                name: name.to_string(),
            })
    }
}

/// Prints a `head()`-style preview: the column names and up to five rows.
impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.names.join("\t"))?;
        let shown = self.n_rows().min(5);
        for row in 0..shown {
            let cells: Vec<String> = self
                .columns
                .iter()
                .map(|col| format!("{:.3}", col[row]))
                .collect();
            writeln!(f, "{}", cells.join("\t"))?;
        }
        if self.n_rows() > shown {
            writeln!(f, "... ({} rows)", self.n_rows())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toy() -> Dataset {
        Dataset::new(vec![
            ("x".to_string(), vec![1.0, 2.0, 3.0, 4.0]),
            ("z".to_string(), vec![0.0, 1.0, 0.0, 1.0]),
        ])
        .unwrap()
    }

    #[test]
    fn test_stratify_keeps_matching_rows_in_order() {
        let data = toy();
        let stratum = data.stratify("z", 1.0).unwrap();
        assert_eq!(stratum.n_rows(), 2);
        assert_eq!(stratum.column("x").unwrap(), &[2.0, 4.0]);
        assert!(stratum.column("z").unwrap().iter().all(|&v| v == 1.0));
        // Parent dataset untouched.
        assert_eq!(data.n_rows(), 4);
    }

    #[test]
    fn test_stratify_is_idempotent() {
        let data = toy();
        let once = data.stratify("z", 0.0).unwrap();
        let twice = once.stratify("z", 0.0).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_stratify_never_grows() {
        let data = toy();
        for value in [0.0, 1.0, 2.0] {
            let stratum = data.stratify("z", value).unwrap();
            assert!(stratum.n_rows() <= data.n_rows());
        }
    }

    #[test]
    fn test_stratify_on_absent_value_yields_empty_dataset() {
        let data = toy();
        let stratum = data.stratify("z", 99.0).unwrap();
        assert_eq!(stratum.n_rows(), 0);
        assert_eq!(stratum.n_columns(), 2);
    }

    #[test]
    fn test_stratify_unknown_column_fails() {
        let data = toy();
        assert!(matches!(
            data.stratify("missing", 0.0),
            Err(ScmError::UnknownColumn { .. })
        ));
    }

    #[test]
    fn test_stratify_range_half_open() {
        let data = toy();
        let stratum = data.stratify_range("x", 2.0, 4.0).unwrap();
        assert_eq!(stratum.column("x").unwrap(), &[2.0, 3.0]);
    }

    #[test]
    fn test_round_column() {
        let mut data = Dataset::new(vec![("t".to_string(), vec![19.96, 20.04])]).unwrap();
        data.round_column("t", 1).unwrap();
        assert_eq!(data.column("t").unwrap(), &[20.0, 20.0]);
    }

    #[test]
    fn test_standardize_column() {
        let mut data = Dataset::new(vec![("a".to_string(), vec![1.0, 2.0, 3.0])]).unwrap();
        data.standardize_column("a").unwrap();
        let col = data.column("a").unwrap();
        let mean: f64 = col.iter().sum::<f64>() / col.len() as f64;
        assert!(mean.abs() < 1e-12);
    }

    #[test]
    fn test_ragged_columns_rejected() {
        let result = Dataset::new(vec![
            ("a".to_string(), vec![1.0, 2.0]),
            ("b".to_string(), vec![1.0]),
        ]);
        assert!(matches!(
            result,
            Err(ScmError::ColumnLengthMismatch { .. })
        ));
    }

    #[test]
    fn test_select_rows_allows_repeats() {
        let data = toy();
        let resampled = data.select_rows(&[0, 0, 3]);
        assert_eq!(resampled.column("x").unwrap(), &[1.0, 1.0, 4.0]);
    }

    #[test]
    #[should_panic]
    fn test_select_rows_out_of_range_panics() {
        let data = toy();
        data.select_rows(&[0, 4]);
    }

    #[test]
    fn test_dataset_serde_round_trip() {
        let data = toy();
        let json = serde_json::to_string(&data).unwrap();
        let back: Dataset = serde_json::from_str(&json).unwrap();
        assert_eq!(data, back);
    }

    #[test]
    fn test_deserializing_ragged_columns_rejected() {
        let json = serde_json::json!([["a", [1.0, 2.0]], ["b", [1.0]]]);
        let err = serde_json::from_value::<Dataset>(json).unwrap_err();
        assert!(err.to_string().contains("has 1 rows, expected 2"));
    }

    #[test]
    fn test_deserializing_duplicate_column_rejected() {
        let json = serde_json::json!([["a", [1.0]], ["a", [2.0]]]);
        assert!(serde_json::from_value::<Dataset>(json).is_err());
    }
}
