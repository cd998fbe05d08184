//! distplot - Histograms & box plots for numerical DataFrame columns
//!
//! Figures are built as plain models (one panel per column on a fixed 3x2
//! grid), rasterized with plotters, and presented in a window, a PNG file,
//! or the system image viewer.

pub mod charts;
pub mod config;
pub mod data;
pub mod display;
pub mod distributions;
pub mod error;
pub mod stats;

pub use charts::{Figure, Panel, PanelKind};
pub use config::{PlotConfig, DEFAULT_BINS, GRID_LAYOUT};
pub use display::Output;
pub use distributions::{boxplot_figure, histogram_figure, plot_boxplots, plot_histograms};
pub use error::PlotError;
