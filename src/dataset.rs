//! Loader for the bundled diabetes dataset.
//!
//! The data (442 patients, 10 standardized baseline variables and a
//! quantitative measure of disease progression one year later) ships with
//! `smartcore`, so loading never touches the network or the filesystem.

use crate::error::{EdaError, Result};
use crate::types::Dataset;
use log::debug;
use ndarray::{Array1, Array2};

/// Number of samples in the standard diabetes dataset.
pub const DIABETES_SAMPLES: usize = 442;
/// Number of features in the standard diabetes dataset.
pub const DIABETES_FEATURES: usize = 10;

/// Load the diabetes dataset as a feature matrix, target vector and feature names.
pub fn load_diabetes() -> Result<Dataset> {
    let raw = smartcore::dataset::diabetes::load_dataset();

    let expected = raw.num_samples * raw.num_features;
    if raw.data.len() != expected {
        return Err(EdaError::Dataset(format!(
            "expected {} feature values for {}x{} matrix, found {}",
            expected,
            raw.num_samples,
            raw.num_features,
            raw.data.len()
        )));
    }

    // Values are stored row by row.
    let values: Vec<f64> = raw.data.iter().map(|&v| f64::from(v)).collect();
    let features = Array2::from_shape_vec((raw.num_samples, raw.num_features), values)?;
    let target: Array1<f64> = raw.target.iter().map(|&v| f64::from(v)).collect();
    let feature_names: Vec<String> = raw
        .feature_names
        .iter()
        .map(|name| name.to_lowercase())
        .collect();

    debug!(
        "loaded diabetes dataset: {} samples, {} features",
        raw.num_samples, raw.num_features
    );

    Dataset::new(features, target, feature_names)
}
