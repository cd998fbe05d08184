//! Charts module - Figure models and rendering

mod figure;
mod plotter;
mod renderer;

pub use figure::{Figure, Panel, PanelKind};
pub use plotter::{boxplot_title, ChartPlotter, HISTOGRAM_SUPTITLE};
pub use renderer::StaticChartRenderer;
