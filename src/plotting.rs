//! Plotting functionality for the diabetes analysis.
//!
//! This module draws the exploratory figure:
//! - a 2x2 grid of panels beneath a figure title
//! - target histogram, boxplot and KDE panels
//! - a feature histogram with a KDE overlay
//!
//! All renderers are generic over the `plotters` backend, so the same code
//! writes PNG files, SVG files or in-memory SVG strings.

use crate::config::{AnalysisConfig, FeaturePlotConfig, FigureConfig};
use crate::error::{EdaError, Result};
use crate::stats::{BoxplotSummary, GaussianKde, Histogram, histogram};
use log::{debug, warn};
use ndarray::{ArrayView1, ArrayView2};
use plotters::coord::Shift;
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use serde::{Deserialize, Serialize};

type Chart<'a, DB> = ChartContext<'a, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

/// Opacity of the background grid lines.
const GRID_ALPHA: f64 = 0.3;
const GRID_GRAY: RGBColor = RGBColor(176, 176, 176);
const TARGET_LABEL: &str = "Disease Progression";

/// Recognized color names for configurable plot elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NamedColor {
    SkyBlue,
    SteelBlue,
    LightBlue,
    LightGreen,
    Green,
    Orange,
    Red,
    Purple,
    Gray,
    Black,
    White,
}

impl NamedColor {
    /// RGB value of the color.
    pub fn rgb(&self) -> RGBColor {
        match self {
            NamedColor::SkyBlue => RGBColor(135, 206, 235),
            NamedColor::SteelBlue => RGBColor(31, 119, 180),
            NamedColor::LightBlue => RGBColor(173, 216, 230),
            NamedColor::LightGreen => RGBColor(144, 238, 144),
            NamedColor::Green => RGBColor(44, 160, 44),
            NamedColor::Orange => RGBColor(255, 165, 0),
            NamedColor::Red => RGBColor(255, 0, 0),
            NamedColor::Purple => RGBColor(148, 103, 189),
            NamedColor::Gray => RGBColor(127, 127, 127),
            NamedColor::Black => RGBColor(0, 0, 0),
            NamedColor::White => RGBColor(255, 255, 255),
        }
    }
}

/// A grid of drawing regions laid out beneath a figure title.
pub struct AxesGrid<DB: DrawingBackend> {
    cells: Vec<DrawingArea<DB, Shift>>,
    rows: usize,
    cols: usize,
}

impl<DB: DrawingBackend> AxesGrid<DB> {
    /// Clear `root`, draw the figure title across the top and split the
    /// remaining area into `rows` x `cols` cells.
    pub fn new(
        root: &DrawingArea<DB, Shift>,
        rows: usize,
        cols: usize,
        config: &FigureConfig,
    ) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(EdaError::InvalidParameter(format!(
                "cannot build a {}x{} grid",
                rows, cols
            )));
        }
        root.fill(&WHITE)
            .map_err(|e| EdaError::PlottingError(e.to_string()))?;

        let title_font = ("sans-serif", config.title_font_size)
            .into_font()
            .style(FontStyle::Bold);
        let body = root
            .titled(&config.title, title_font)
            .map_err(|e| EdaError::PlottingError(e.to_string()))?;

        Ok(Self {
            cells: body.split_evenly((rows, cols)),
            rows,
            cols,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// The drawing region at `(row, col)`.
    pub fn cell(&self, row: usize, col: usize) -> Result<&DrawingArea<DB, Shift>> {
        if row >= self.rows || col >= self.cols {
            return Err(EdaError::InvalidRegion {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(&self.cells[row * self.cols + col])
    }
}

/// Title of the feature panel.
pub fn feature_panel_title(feature_name: &str) -> String {
    format!("Distribution of {} with KDE", feature_name)
}

/// Check that the configured display name matches the dataset's own name
/// for the configured column, ignoring case.
pub fn validate_feature_label(
    feature_names: &[String],
    config: &FeaturePlotConfig,
) -> Result<()> {
    let actual = feature_names.get(config.feature_index).ok_or_else(|| {
        EdaError::InvalidParameter(format!(
            "Feature index {} out of range for {} features",
            config.feature_index,
            feature_names.len()
        ))
    })?;
    if !actual.eq_ignore_ascii_case(&config.feature_name) {
        return Err(EdaError::InvalidParameter(format!(
            "Feature {} is '{}', not '{}'",
            config.feature_index, actual, config.feature_name
        )));
    }
    Ok(())
}

/// Draw the three target-variable panels into cells (0,0), (0,1) and (1,0).
///
/// # Arguments
/// * `grid` - A 2x2 grid of drawing regions
/// * `target` - The target vector
/// * `config` - Analysis configuration (target styling, KDE options, fonts)
pub fn plot_target_distribution<DB: DrawingBackend>(
    grid: &AxesGrid<DB>,
    target: &ArrayView1<f64>,
    config: &AnalysisConfig,
) -> Result<()> {
    if target.is_empty() {
        return Err(EdaError::InvalidInput("target vector is empty".to_string()));
    }

    draw_target_histogram(grid.cell(0, 0)?, target, config)?;
    draw_target_boxplot(grid.cell(0, 1)?, target, config)?;
    draw_target_kde(grid.cell(1, 0)?, target, config)?;

    debug!("drew target histogram, boxplot and KDE panels");
    Ok(())
}

/// Draw a density-normalized histogram of one feature column overlaid with
/// its KDE curve.
///
/// The column is `config.feature.feature_index`; `config.feature.feature_name`
/// labels the panel. The pairing is not checked here, see
/// [`validate_feature_label`].
pub fn plot_feature_distribution<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    features: &ArrayView2<f64>,
    config: &AnalysisConfig,
) -> Result<()> {
    let feature = &config.feature;
    if feature.feature_index >= features.ncols() {
        return Err(EdaError::InvalidParameter(format!(
            "Feature index {} out of range for {} features",
            feature.feature_index,
            features.ncols()
        )));
    }
    let column = features.column(feature.feature_index);
    let hist = histogram(&column, feature.bins, true)?;
    let curve = kde_curve(&column, config)?;

    let (x_min, x_max) = span(&hist, curve.as_deref());
    let y_max = curve
        .iter()
        .flatten()
        .map(|&(_, d)| d)
        .fold(hist.max_height(), f64::max)
        * 1.1;

    let mut chart = ChartBuilder::on(area)
        .caption(
            feature_panel_title(&feature.feature_name),
            ("sans-serif", config.figure.font_size).into_font(),
        )
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min..x_max, 0.0..y_max)
        .map_err(|e| EdaError::PlottingError(e.to_string()))?;

    draw_mesh(
        &mut chart,
        &format!("{} (body mass index)", feature.feature_name),
        "Density",
    )?;
    draw_bars(
        &mut chart,
        &hist,
        feature.color.rgb(),
        feature.edgecolor.rgb(),
        feature.alpha,
    )?;

    if let Some(points) = curve {
        let color = feature.kde_color.rgb();
        chart
            .draw_series(LineSeries::new(
                points,
                color.stroke_width(feature.line_width),
            ))
            .map_err(|e| EdaError::PlottingError(e.to_string()))?;
    }

    debug!(
        "drew distribution panel for feature {} ({})",
        feature.feature_index, feature.feature_name
    );
    Ok(())
}

fn draw_target_histogram<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    target: &ArrayView1<f64>,
    config: &AnalysisConfig,
) -> Result<()> {
    let style = &config.target;
    let hist = histogram(target, style.bins, false)?;
    let (x_min, x_max) = span(&hist, None);

    let mut chart = ChartBuilder::on(area)
        .caption(
            "Target Histogram",
            ("sans-serif", config.figure.font_size).into_font(),
        )
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min..x_max, 0.0..hist.max_height() * 1.1)
        .map_err(|e| EdaError::PlottingError(e.to_string()))?;

    draw_mesh(&mut chart, TARGET_LABEL, "Frequency")?;
    draw_bars(
        &mut chart,
        &hist,
        style.color.rgb(),
        style.edgecolor.rgb(),
        style.alpha,
    )
}

fn draw_target_boxplot<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    target: &ArrayView1<f64>,
    config: &AnalysisConfig,
) -> Result<()> {
    let style = &config.target;
    let summary = BoxplotSummary::from_values(target)?;
    let (lo, hi) = summary.extent();
    let pad = if hi > lo { (hi - lo) * 0.05 } else { 0.5 };

    let mut chart = ChartBuilder::on(area)
        .caption(
            "Target Boxplot",
            ("sans-serif", config.figure.font_size).into_font(),
        )
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0.5..1.5, (lo - pad)..(hi + pad))
        .map_err(|e| EdaError::PlottingError(e.to_string()))?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .light_line_style(WHITE.mix(0.0))
        .bold_line_style(GRID_GRAY.mix(GRID_ALPHA))
        .x_label_formatter(&|_| String::new())
        .y_desc(TARGET_LABEL)
        .draw()
        .map_err(|e| EdaError::PlottingError(e.to_string()))?;

    let (left, right) = (0.75, 1.25);
    let (cap_left, cap_right) = (0.875, 1.125);

    chart
        .draw_series([
            Rectangle::new(
                [(left, summary.q1), (right, summary.q3)],
                style.box_color.rgb().filled(),
            ),
            Rectangle::new(
                [(left, summary.q1), (right, summary.q3)],
                BLACK.stroke_width(1),
            ),
        ])
        .map_err(|e| EdaError::PlottingError(e.to_string()))?;

    chart
        .draw_series([
            PathElement::new(
                vec![(1.0, summary.q3), (1.0, summary.whisker_high)],
                BLACK.stroke_width(1),
            ),
            PathElement::new(
                vec![(1.0, summary.q1), (1.0, summary.whisker_low)],
                BLACK.stroke_width(1),
            ),
            PathElement::new(
                vec![
                    (cap_left, summary.whisker_high),
                    (cap_right, summary.whisker_high),
                ],
                BLACK.stroke_width(1),
            ),
            PathElement::new(
                vec![
                    (cap_left, summary.whisker_low),
                    (cap_right, summary.whisker_low),
                ],
                BLACK.stroke_width(1),
            ),
            PathElement::new(
                vec![(left, summary.median), (right, summary.median)],
                style.median_color.rgb().stroke_width(2),
            ),
        ])
        .map_err(|e| EdaError::PlottingError(e.to_string()))?;

    chart
        .draw_series(
            summary
                .outliers
                .iter()
                .map(|&v| Circle::new((1.0, v), 3, BLACK.stroke_width(1))),
        )
        .map_err(|e| EdaError::PlottingError(e.to_string()))?;

    Ok(())
}

fn draw_target_kde<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    target: &ArrayView1<f64>,
    config: &AnalysisConfig,
) -> Result<()> {
    let style = &config.target;
    let curve = kde_curve(target, config)?;

    let (x_min, x_max, y_max) = match curve.as_deref() {
        Some(points) => {
            let x_min = points.first().map_or(0.0, |p| p.0);
            let x_max = points.last().map_or(1.0, |p| p.0);
            let y_max = points.iter().map(|p| p.1).fold(0.0, f64::max);
            (x_min, x_max, y_max * 1.1)
        }
        None => {
            let (lo, hi) = span(&histogram(target, 1, false)?, None);
            (lo, hi, 1.0)
        }
    };

    let mut chart = ChartBuilder::on(area)
        .caption(
            "Target KDE Plot",
            ("sans-serif", config.figure.font_size).into_font(),
        )
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min..x_max, 0.0..y_max)
        .map_err(|e| EdaError::PlottingError(e.to_string()))?;

    draw_mesh(&mut chart, TARGET_LABEL, "Density")?;

    if let Some(points) = curve {
        let color = style.kde_color.rgb();
        chart
            .draw_series(
                AreaSeries::new(points, 0.0, color.mix(style.alpha))
                    .border_style(color.stroke_width(1)),
            )
            .map_err(|e| EdaError::PlottingError(e.to_string()))?;
    }

    Ok(())
}

/// Evaluate the KDE of `values`, or `None` when the sample cannot carry a
/// density estimate (zero variance, single value).
fn kde_curve(
    values: &ArrayView1<f64>,
    config: &AnalysisConfig,
) -> Result<Option<Vec<(f64, f64)>>> {
    match GaussianKde::fit(values, config.kde.bw_adjust) {
        Ok(kde) => Ok(Some(kde.evaluate_grid(&config.kde)?)),
        Err(EdaError::InvalidInput(reason)) => {
            warn!("skipping density estimate: {}", reason);
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Horizontal extent covering the histogram and, if present, the curve.
fn span(hist: &Histogram, curve: Option<&[(f64, f64)]>) -> (f64, f64) {
    let (mut lo, mut hi) = hist.range();
    if let Some(points) = curve {
        for &(x, _) in points {
            lo = lo.min(x);
            hi = hi.max(x);
        }
    }
    (lo, hi)
}

fn draw_mesh<DB: DrawingBackend>(
    chart: &mut Chart<'_, DB>,
    x_desc: &str,
    y_desc: &str,
) -> Result<()> {
    chart
        .configure_mesh()
        .light_line_style(WHITE.mix(0.0))
        .bold_line_style(GRID_GRAY.mix(GRID_ALPHA))
        .x_desc(x_desc)
        .y_desc(y_desc)
        .draw()
        .map_err(|e| EdaError::PlottingError(e.to_string()))
}

/// Filled bars with a separate outline pass so the edge color stays opaque.
fn draw_bars<DB: DrawingBackend>(
    chart: &mut Chart<'_, DB>,
    hist: &Histogram,
    fill: RGBColor,
    edge: RGBColor,
    alpha: f64,
) -> Result<()> {
    chart
        .draw_series(
            hist.bars()
                .map(|(l, r, h)| Rectangle::new([(l, 0.0), (r, h)], fill.mix(alpha).filled())),
        )
        .map_err(|e| EdaError::PlottingError(e.to_string()))?;

    chart
        .draw_series(
            hist.bars()
                .map(|(l, r, h)| Rectangle::new([(l, 0.0), (r, h)], edge.stroke_width(1))),
        )
        .map_err(|e| EdaError::PlottingError(e.to_string()))?;

    Ok(())
}
