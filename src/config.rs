//! Analysis configuration.
//!
//! Every option that shapes the figure is an explicit field here rather than a
//! positional default, so the pairing of a feature column with its display
//! name is a visible, checkable setting. All structs deserialize with
//! per-field defaults, so a JSON override only needs the fields it changes.

use crate::error::{EdaError, Result};
use crate::plotting::NamedColor;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Upper bound on histogram bins.
pub const MAX_BINS: usize = 10_000;
/// Upper bound on KDE evaluation points.
pub const MAX_GRID_SIZE: usize = 100_000;

/// Top-level configuration for one analysis run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub figure: FigureConfig,
    pub target: TargetPlotConfig,
    pub feature: FeaturePlotConfig,
    pub kde: KdeConfig,
    pub display: DisplayConfig,
}

/// Figure canvas and title options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FigureConfig {
    /// Width of the figure in pixels.
    pub width: u32,
    /// Height of the figure in pixels.
    pub height: u32,
    /// Figure-level title drawn above the grid.
    pub title: String,
    pub title_font_size: u32,
    /// Font size for panel captions.
    pub font_size: u32,
}

impl Default for FigureConfig {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 1000,
            title: "Diabetes Dataset Analysis".to_string(),
            title_font_size: 16,
            font_size: 14,
        }
    }
}

/// Styling for the three target-variable panels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetPlotConfig {
    /// Histogram bucket count.
    pub bins: usize,
    /// Fill opacity for the histogram bars and the KDE area.
    pub alpha: f64,
    /// Histogram bar fill.
    pub color: NamedColor,
    /// Histogram bar border.
    pub edgecolor: NamedColor,
    /// Boxplot box fill.
    pub box_color: NamedColor,
    pub median_color: NamedColor,
    pub kde_color: NamedColor,
}

impl Default for TargetPlotConfig {
    fn default() -> Self {
        Self {
            bins: 30,
            alpha: 0.7,
            color: NamedColor::SkyBlue,
            edgecolor: NamedColor::Black,
            box_color: NamedColor::SteelBlue,
            median_color: NamedColor::Orange,
            kde_color: NamedColor::Orange,
        }
    }
}

/// Which feature column to visualize and how.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeaturePlotConfig {
    /// Column of the feature matrix to plot.
    pub feature_index: usize,
    /// Display name used in the panel title and axis label.
    pub feature_name: String,
    pub bins: usize,
    pub alpha: f64,
    pub color: NamedColor,
    pub edgecolor: NamedColor,
    pub kde_color: NamedColor,
    /// Stroke width of the KDE curve.
    pub line_width: u32,
    /// Require `feature_name` to match the dataset's name for `feature_index`
    /// (case-insensitive). Off by default: the caller owns the pairing.
    pub validate_feature_name: bool,
}

impl Default for FeaturePlotConfig {
    fn default() -> Self {
        Self {
            feature_index: 2,
            feature_name: "BMI".to_string(),
            bins: 30,
            alpha: 0.7,
            color: NamedColor::LightGreen,
            edgecolor: NamedColor::Black,
            kde_color: NamedColor::Red,
            line_width: 2,
            validate_feature_name: false,
        }
    }
}

/// Kernel density estimate evaluation options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KdeConfig {
    /// Number of evaluation points.
    pub grid_size: usize,
    /// How many bandwidths the grid extends past the data extremes.
    pub cut: f64,
    /// Multiplier applied to the Scott's-rule bandwidth.
    pub bw_adjust: f64,
}

impl Default for KdeConfig {
    fn default() -> Self {
        Self {
            grid_size: 200,
            cut: 3.0,
            bw_adjust: 1.0,
        }
    }
}

/// Where the figure goes once it has been drawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Output file. `.svg` selects the SVG backend, anything else PNG.
    pub output: PathBuf,
    /// Open the written file in the platform viewer. See
    /// [`crate::analysis::show_figure`] for when the run waits on it.
    pub open_viewer: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from("diabetes_analysis.png"),
            open_viewer: true,
        }
    }
}

impl AnalysisConfig {
    /// Parse a configuration from JSON, filling omitted fields with defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a JSON configuration file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Check option ranges.
    pub fn validate(&self) -> Result<()> {
        if self.figure.width == 0 || self.figure.height == 0 {
            return Err(EdaError::InvalidParameter(
                "figure dimensions must be non-zero".to_string(),
            ));
        }
        if self.figure.font_size == 0 || self.figure.title_font_size == 0 {
            return Err(EdaError::InvalidParameter(
                "font sizes must be non-zero".to_string(),
            ));
        }
        if self.feature.line_width == 0 {
            return Err(EdaError::InvalidParameter(
                "feature.line_width must be non-zero".to_string(),
            ));
        }
        for (name, bins) in [
            ("target.bins", self.target.bins),
            ("feature.bins", self.feature.bins),
        ] {
            if bins == 0 || bins > MAX_BINS {
                return Err(EdaError::InvalidParameter(format!(
                    "{} must lie in [1, {}], got {}",
                    name, MAX_BINS, bins
                )));
            }
        }
        for (name, alpha) in [
            ("target.alpha", self.target.alpha),
            ("feature.alpha", self.feature.alpha),
        ] {
            if !(0.0..=1.0).contains(&alpha) {
                return Err(EdaError::InvalidParameter(format!(
                    "{} must lie in [0, 1], got {}",
                    name, alpha
                )));
            }
        }
        if self.kde.grid_size < 2 || self.kde.grid_size > MAX_GRID_SIZE {
            return Err(EdaError::InvalidParameter(format!(
                "kde.grid_size must lie in [2, {}], got {}",
                MAX_GRID_SIZE, self.kde.grid_size
            )));
        }
        if !self.kde.bw_adjust.is_finite() || self.kde.bw_adjust <= 0.0 {
            return Err(EdaError::InvalidParameter(format!(
                "kde.bw_adjust must be positive and finite, got {}",
                self.kde.bw_adjust
            )));
        }
        if !self.kde.cut.is_finite() || self.kde.cut < 0.0 {
            return Err(EdaError::InvalidParameter(format!(
                "kde.cut must be non-negative and finite, got {}",
                self.kde.cut
            )));
        }
        if self.display.output.as_os_str().is_empty() {
            return Err(EdaError::InvalidParameter(
                "display.output must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = AnalysisConfig::default();
        assert_eq!(config.target.bins, 30);
        assert_eq!(config.feature.bins, 30);
        assert_eq!(config.feature.feature_index, 2);
        assert_eq!(config.feature.feature_name, "BMI");
        assert_eq!(config.target.color, NamedColor::SkyBlue);
        assert_eq!(config.target.edgecolor, NamedColor::Black);
        assert_eq!(config.feature.kde_color, NamedColor::Red);
        assert!(!config.feature.validate_feature_name);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_override() {
        let config = AnalysisConfig::from_json_str(
            r#"{"feature": {"feature_index": 3, "feature_name": "BP", "color": "orange"}}"#,
        )
        .unwrap();
        assert_eq!(config.feature.feature_index, 3);
        assert_eq!(config.feature.feature_name, "BP");
        assert_eq!(config.feature.color, NamedColor::Orange);
        assert_eq!(config.feature.bins, 30);
        assert_eq!(config.target, TargetPlotConfig::default());
    }

    #[test]
    fn test_unknown_color_rejected() {
        let result = AnalysisConfig::from_json_str(r#"{"target": {"color": "chartreuse"}}"#);
        assert!(matches!(result, Err(EdaError::SerializationError(_))));
    }

    #[test]
    fn test_validate_rejects_zero_bins() {
        let result = AnalysisConfig::from_json_str(r#"{"target": {"bins": 0}}"#);
        assert!(matches!(result, Err(EdaError::InvalidParameter(_))));
    }

    #[test]
    fn test_validate_rejects_alpha() {
        let mut config = AnalysisConfig::default();
        config.feature.alpha = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bandwidth() {
        let mut config = AnalysisConfig::default();
        config.kde.bw_adjust = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_non_finite_cut() {
        let mut config = AnalysisConfig::default();
        config.kde.cut = f64::INFINITY;
        assert!(matches!(config.validate(), Err(EdaError::InvalidParameter(_))));
        config.kde.cut = f64::NAN;
        assert!(config.validate().is_err());

        let mut config = AnalysisConfig::default();
        config.kde.bw_adjust = f64::INFINITY;
        assert!(config.validate().is_err());

        let mut config = AnalysisConfig::default();
        config.target.alpha = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_oversized_counts() {
        let mut config = AnalysisConfig::default();
        config.target.bins = 1_000_000_000_000;
        assert!(config.validate().is_err());

        let mut config = AnalysisConfig::default();
        config.feature.bins = MAX_BINS + 1;
        assert!(config.validate().is_err());

        let mut config = AnalysisConfig::default();
        config.kde.grid_size = MAX_GRID_SIZE + 1;
        assert!(config.validate().is_err());

        let mut config = AnalysisConfig::default();
        config.target.bins = MAX_BINS;
        config.kde.grid_size = MAX_GRID_SIZE;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_invisible_text_and_lines() {
        let mut config = AnalysisConfig::default();
        config.figure.font_size = 0;
        assert!(config.validate().is_err());

        let mut config = AnalysisConfig::default();
        config.figure.title_font_size = 0;
        assert!(config.validate().is_err());

        let mut config = AnalysisConfig::default();
        config.feature.line_width = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_json_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        let mut config = AnalysisConfig::default();
        config.display.open_viewer = false;
        config.figure.title = "Custom".to_string();
        std::fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();

        let loaded = AnalysisConfig::from_json_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_file() {
        let result = AnalysisConfig::from_json_file("/nonexistent/config.json");
        assert!(matches!(result, Err(EdaError::IoError(_))));
    }
}
