//! End-to-end analysis driver.
//!
//! The run is strictly sequential: load the dataset, draw the four panels
//! into a 2x2 figure, write the figure out, optionally open it in a viewer,
//! then print the dataset summary.

use crate::config::AnalysisConfig;
use crate::dataset::load_diabetes;
use crate::error::{EdaError, Result};
use crate::plotting::{
    AxesGrid, plot_feature_distribution, plot_target_distribution, validate_feature_label,
};
use crate::report::{DatasetInfo, print_dataset_info};
use crate::types::Dataset;
use log::{info, warn};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::{Path, PathBuf};
use std::process::Command;

/// The renderers the driver invokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Renderer {
    /// Target histogram, boxplot and KDE.
    TargetDistribution,
    /// Feature histogram with KDE overlay.
    FeatureDistribution,
}

/// Record of one drawn figure.
#[derive(Debug, Clone, PartialEq)]
pub struct FigureSummary {
    /// Renderers in the order they ran.
    pub rendered: Vec<Renderer>,
    /// File the figure was written to, if any.
    pub output: Option<PathBuf>,
}

impl FigureSummary {
    /// How many times `renderer` ran for this figure.
    pub fn count(&self, renderer: Renderer) -> usize {
        self.rendered.iter().filter(|&&r| r == renderer).count()
    }
}

/// Draw the full 2x2 figure onto `root` and present it.
///
/// This is the backend-independent core of [`run`]; it neither opens a
/// viewer nor prints anything.
pub fn render_figure<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    dataset: &Dataset,
    config: &AnalysisConfig,
) -> Result<FigureSummary> {
    config.validate()?;
    if config.feature.validate_feature_name {
        validate_feature_label(dataset.feature_names(), &config.feature)?;
    }

    let grid = AxesGrid::new(root, 2, 2, &config.figure)?;
    let mut rendered = Vec::with_capacity(2);

    plot_target_distribution(&grid, &dataset.target().view(), config)?;
    rendered.push(Renderer::TargetDistribution);

    plot_feature_distribution(grid.cell(1, 1)?, &dataset.features().view(), config)?;
    rendered.push(Renderer::FeatureDistribution);

    root.present()
        .map_err(|e| EdaError::PlottingError(e.to_string()))?;

    Ok(FigureSummary {
        rendered,
        output: None,
    })
}

/// Render the figure into `config.display.output`.
///
/// A `.svg` extension selects the SVG backend; anything else is written as a
/// bitmap whose format follows the extension.
pub fn save_figure(dataset: &Dataset, config: &AnalysisConfig) -> Result<FigureSummary> {
    let path = config.display.output.as_path();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let size = (config.figure.width, config.figure.height);
    let is_svg = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"));

    let mut summary = if is_svg {
        let root = SVGBackend::new(path, size).into_drawing_area();
        render_figure(&root, dataset, config)?
    } else {
        let root = BitMapBackend::new(path, size).into_drawing_area();
        render_figure(&root, dataset, config)?
    };
    summary.output = Some(path.to_path_buf());

    info!("figure written to {}", path.display());
    Ok(summary)
}

/// Open `path` in the platform image viewer.
///
/// On macOS (`open -W`) and Windows (`start /WAIT`) this blocks until the
/// viewer closes. Elsewhere `xdg-open` hands the file to the desktop's
/// default application and usually returns at once, so the run continues
/// while the window is still open.
///
/// The figure is already on disk, so a missing or failing viewer is logged
/// rather than treated as an error.
pub fn show_figure(path: &Path) {
    let mut command = viewer_command(path);
    match command.status() {
        Ok(status) if status.success() => {}
        Ok(status) => warn!("viewer exited with {} for {}", status, path.display()),
        Err(e) => warn!("could not open viewer for {}: {}", path.display(), e),
    }
}

#[cfg(target_os = "macos")]
fn viewer_command(path: &Path) -> Command {
    let mut command = Command::new("open");
    command.arg("-W").arg(path);
    command
}

#[cfg(target_os = "windows")]
fn viewer_command(path: &Path) -> Command {
    let mut command = Command::new("cmd");
    command.args(["/C", "start", "/WAIT", ""]).arg(path);
    command
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn viewer_command(path: &Path) -> Command {
    let mut command = Command::new("xdg-open");
    command.arg(path);
    command
}

/// Run the whole analysis: load, draw, write, display, summarize.
pub fn run(config: &AnalysisConfig) -> Result<DatasetInfo> {
    let dataset = load_diabetes()?;
    info!(
        "loaded dataset with {} samples and {} features",
        dataset.n_samples(),
        dataset.n_features()
    );

    let summary = save_figure(&dataset, config)?;
    if config.display.open_viewer {
        if let Some(path) = summary.output.as_deref() {
            show_figure(path);
        }
    }

    print_dataset_info(&dataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array1, Array2};
    use tempfile::tempdir;

    fn synthetic_dataset() -> Dataset {
        let features =
            Array2::from_shape_fn((60, 4), |(i, j)| ((i + 1) as f64 * (j + 1) as f64).cos());
        let target: Array1<f64> = (0..60).map(|i| 25.0 + ((i * 17) % 60) as f64 * 5.0).collect();
        let names = ["age", "sex", "bmi", "bp"].iter().map(|s| s.to_string()).collect();
        Dataset::new(features, target, names).unwrap()
    }

    #[test]
    fn test_render_figure_runs_each_renderer_once() {
        let dataset = synthetic_dataset();
        let mut svg = String::new();
        let summary = {
            let root = SVGBackend::with_string(&mut svg, (1200, 1000)).into_drawing_area();
            render_figure(&root, &dataset, &AnalysisConfig::default()).unwrap()
        };
        assert_eq!(
            summary.rendered,
            vec![Renderer::TargetDistribution, Renderer::FeatureDistribution]
        );
        assert_eq!(summary.count(Renderer::TargetDistribution), 1);
        assert_eq!(summary.count(Renderer::FeatureDistribution), 1);
        assert!(summary.output.is_none());
        assert!(svg.contains("Distribution of BMI with KDE"));
    }

    #[test]
    fn test_render_figure_validates_feature_name() {
        let dataset = synthetic_dataset();
        let mut config = AnalysisConfig::default();
        config.feature.validate_feature_name = true;
        config.feature.feature_name = "BP".to_string();

        let mut svg = String::new();
        let root = SVGBackend::with_string(&mut svg, (600, 400)).into_drawing_area();
        let result = render_figure(&root, &dataset, &config);
        assert!(matches!(result, Err(EdaError::InvalidParameter(_))));
    }

    #[test]
    fn test_render_figure_rejects_infinite_cut() {
        let dataset = synthetic_dataset();
        let mut config = AnalysisConfig::default();
        config.kde.cut = f64::INFINITY;

        let mut svg = String::new();
        let root = SVGBackend::with_string(&mut svg, (600, 400)).into_drawing_area();
        let result = render_figure(&root, &dataset, &config);
        assert!(matches!(result, Err(EdaError::InvalidParameter(_))));
    }

    #[test]
    fn test_renderers_reject_infinite_cut_without_validate() {
        let dataset = synthetic_dataset();
        let mut config = AnalysisConfig::default();
        config.kde.cut = f64::INFINITY;

        let mut svg = String::new();
        let root = SVGBackend::with_string(&mut svg, (600, 400)).into_drawing_area();
        let result = plot_feature_distribution(&root, &dataset.features().view(), &config);
        assert!(matches!(result, Err(EdaError::InvalidParameter(_))));
    }

    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    #[test]
    fn test_viewer_command_uses_xdg_open() {
        let path = Path::new("figure.png");
        let command = viewer_command(path);
        assert_eq!(command.get_program(), "xdg-open");
        let args: Vec<_> = command.get_args().collect();
        assert_eq!(args, vec![path.as_os_str()]);
    }

    #[test]
    fn test_save_figure_png() {
        let dir = tempdir().unwrap();
        let mut config = AnalysisConfig::default();
        config.display.output = dir.path().join("figure.png");
        config.display.open_viewer = false;

        let summary = save_figure(&synthetic_dataset(), &config).unwrap();
        assert_eq!(summary.output.as_deref(), Some(config.display.output.as_path()));
        assert!(config.display.output.exists());
    }

    #[test]
    fn test_save_figure_svg_in_new_directory() {
        let dir = tempdir().unwrap();
        let mut config = AnalysisConfig::default();
        config.display.output = dir.path().join("plots").join("figure.svg");
        config.display.open_viewer = false;

        save_figure(&synthetic_dataset(), &config).unwrap();
        let contents = std::fs::read_to_string(&config.display.output).unwrap();
        assert!(contents.contains("<svg"));
        assert!(contents.contains("Target Boxplot"));
    }
}
