//! Core data types for the loaded dataset.

use crate::error::{EdaError, Result};
use ndarray::{Array1, Array2, ArrayView1};

/// A tabular regression dataset: feature matrix, target vector and column names.
///
/// The row count of `features` always equals the length of `target`, and the
/// column count always equals the number of `feature_names`.
#[derive(Debug, Clone)]
pub struct Dataset {
    features: Array2<f64>,
    target: Array1<f64>,
    feature_names: Vec<String>,
}

impl Dataset {
    /// Build a dataset, checking that the three parts agree in shape.
    pub fn new(
        features: Array2<f64>,
        target: Array1<f64>,
        feature_names: Vec<String>,
    ) -> Result<Self> {
        if features.nrows() != target.len() {
            return Err(EdaError::ShapeMismatch {
                expected_shape: format!("target of length {}", features.nrows()),
                actual_shape: format!("target of length {}", target.len()),
            });
        }
        if features.ncols() != feature_names.len() {
            return Err(EdaError::ShapeMismatch {
                expected_shape: format!("{} feature names", features.ncols()),
                actual_shape: format!("{} feature names", feature_names.len()),
            });
        }
        Ok(Self {
            features,
            target,
            feature_names,
        })
    }

    pub fn features(&self) -> &Array2<f64> {
        &self.features
    }

    pub fn target(&self) -> &Array1<f64> {
        &self.target
    }

    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    /// `(n_samples, n_features)`.
    pub fn shape(&self) -> (usize, usize) {
        self.features.dim()
    }

    pub fn n_samples(&self) -> usize {
        self.features.nrows()
    }

    pub fn n_features(&self) -> usize {
        self.features.ncols()
    }

    /// View of a single feature column.
    pub fn feature(&self, index: usize) -> Result<ArrayView1<'_, f64>> {
        if index >= self.n_features() {
            return Err(EdaError::InvalidParameter(format!(
                "Feature index {} out of range for {} features",
                index,
                self.n_features()
            )));
        }
        Ok(self.features.column(index))
    }

    /// Minimum and maximum of the target, or `None` when it is empty.
    pub fn target_range(&self) -> Option<(f64, f64)> {
        if self.target.is_empty() {
            return None;
        }
        let min = self.target.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = self.target.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        Some((min, max))
    }
}
