//! # diabetes-eda
//!
//! Exploratory distribution plots for the diabetes regression dataset.
//!
//! The crate loads the bundled dataset (442 samples, 10 standardized
//! features, a continuous disease-progression target) and draws one figure
//! with four panels:
//!
//! - histogram of the target
//! - boxplot of the target
//! - kernel density estimate of the target
//! - histogram with a KDE overlay for one feature (BMI by default)
//!
//! It then prints a short textual summary of the dataset.
//!
//! ## Example
//!
//! ```no_run
//! use diabetes_eda::prelude::*;
//!
//! let mut config = AnalysisConfig::default();
//! config.display.open_viewer = false;
//! let info = run(&config)?;
//! assert_eq!(info.shape, (442, 10));
//! # Ok::<(), diabetes_eda::error::EdaError>(())
//! ```

pub mod analysis;
pub mod config;
pub mod dataset;
pub mod error;
pub mod plotting;
pub mod report;
pub mod stats;
pub mod types;

pub mod prelude {
    //! Convenient re-exports of commonly used types.
    pub use crate::analysis::{FigureSummary, Renderer, render_figure, run, save_figure};
    pub use crate::config::{
        AnalysisConfig, DisplayConfig, FeaturePlotConfig, FigureConfig, KdeConfig,
        TargetPlotConfig,
    };
    pub use crate::dataset::load_diabetes;
    pub use crate::error::{EdaError, Result};
    pub use crate::plotting::{
        AxesGrid, NamedColor, plot_feature_distribution, plot_target_distribution,
    };
    pub use crate::report::{DatasetInfo, print_dataset_info};
    pub use crate::stats::{BoxplotSummary, GaussianKde, histogram};
    pub use crate::types::Dataset;
}
