//! Stats module - Binning and box statistics for drawing

mod calculator;

pub use calculator::{BoxStats, ColumnSummary, Histogram, StatsCalculator, WHISKER_IQR_FACTOR};
