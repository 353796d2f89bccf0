//! Console summary of the loaded dataset.

use crate::error::{EdaError, Result};
use crate::types::Dataset;
use std::fmt;
use std::io::Write;

/// The values printed in the dataset summary.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetInfo {
    /// `(n_samples, n_features)`.
    pub shape: (usize, usize),
    pub n_features: usize,
    pub feature_names: Vec<String>,
    /// Target minimum and maximum.
    pub target_range: (f64, f64),
}

impl DatasetInfo {
    pub fn from_dataset(dataset: &Dataset) -> Result<Self> {
        let target_range = dataset
            .target_range()
            .ok_or_else(|| EdaError::InvalidInput("target vector is empty".to_string()))?;
        Ok(Self {
            shape: dataset.shape(),
            n_features: dataset.feature_names().len(),
            feature_names: dataset.feature_names().to_vec(),
            target_range,
        })
    }
}

impl fmt::Display for DatasetInfo {
    /// Four lines: shape, feature count, feature list and target range.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self
            .feature_names
            .iter()
            .map(|name| format!("'{}'", name))
            .collect();
        writeln!(f, "Data shape: ({}, {})", self.shape.0, self.shape.1)?;
        writeln!(f, "Number of features: {}", self.n_features)?;
        writeln!(f, "Features: [{}]", names.join(", "))?;
        write!(
            f,
            "Target range: [{:.1}, {:.1}]",
            self.target_range.0, self.target_range.1
        )
    }
}

/// Write the dataset summary to `out`.
pub fn write_dataset_info<W: Write>(out: &mut W, dataset: &Dataset) -> Result<DatasetInfo> {
    let info = DatasetInfo::from_dataset(dataset)?;
    writeln!(out, "{}", info)?;
    Ok(info)
}

/// Print the dataset summary to stdout.
pub fn print_dataset_info(dataset: &Dataset) -> Result<DatasetInfo> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    write_dataset_info(&mut handle, dataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array1, Array2, array};

    fn small_dataset() -> Dataset {
        Dataset::new(
            array![[0.1, 1.0], [0.2, 2.0], [0.3, 3.0]],
            array![25.0, 151.04, 346.0],
            vec!["age".to_string(), "bmi".to_string()],
        )
        .unwrap()
    }

    #[test]
    fn test_dataset_info_values() {
        let info = DatasetInfo::from_dataset(&small_dataset()).unwrap();
        assert_eq!(info.shape, (3, 2));
        assert_eq!(info.n_features, 2);
        assert_eq!(info.target_range, (25.0, 346.0));
    }

    #[test]
    fn test_write_dataset_info_format() {
        let mut out = Vec::new();
        write_dataset_info(&mut out, &small_dataset()).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "Data shape: (3, 2)",
                "Number of features: 2",
                "Features: ['age', 'bmi']",
                "Target range: [25.0, 346.0]",
            ]
        );
    }

    #[test]
    fn test_target_range_one_decimal() {
        let ds = Dataset::new(
            array![[0.0], [0.0]],
            array![1.26, 9.94],
            vec!["x".to_string()],
        )
        .unwrap();
        let text = DatasetInfo::from_dataset(&ds).unwrap().to_string();
        assert!(text.ends_with("Target range: [1.3, 9.9]"));
    }

    #[test]
    fn test_empty_target_is_error() {
        let ds = Dataset::new(Array2::zeros((0, 1)), Array1::zeros(0), vec!["x".to_string()])
            .unwrap();
        assert!(matches!(
            DatasetInfo::from_dataset(&ds),
            Err(EdaError::InvalidInput(_))
        ));
    }
}
