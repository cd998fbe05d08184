//! Chart Plotter Module
//! Turns DataFrame columns into figure models for histograms and box plots.

use crate::charts::{Figure, Panel, PanelKind};
use crate::config::{PlotConfig, GRID_LAYOUT};
use crate::data::DataProcessor;
use crate::error::{PlotError, Result};
use crate::stats::StatsCalculator;
use polars::prelude::*;
use rayon::prelude::*;

/// Suptitle of the histogram figure.
pub const HISTOGRAM_SUPTITLE: &str = "Histograms of Numerical Features";

/// Title of one box plot panel.
pub fn boxplot_title(column: &str) -> String {
    format!("Box Plot of {}", column)
}

/// Builds figure models; one panel per requested column.
pub struct ChartPlotter;

impl ChartPlotter {
    /// One histogram per column, 3x2 grid, row-major in input order.
    pub fn histogram_figure<S>(
        df: &DataFrame,
        columns: &[S],
        bins: usize,
        config: &PlotConfig,
    ) -> Result<Figure>
    where
        S: AsRef<str> + Sync,
    {
        for column in columns {
            DataProcessor::require_numeric(df, column.as_ref())?;
        }
        if columns.is_empty() {
            return Err(PlotError::NoColumns);
        }
        Self::check_capacity(columns.len())?;
        if bins == 0 {
            return Err(PlotError::InvalidBins(bins));
        }

        let panels = columns
            .par_iter()
            .enumerate()
            .map(|(index, column)| {
                let column = column.as_ref();
                let values = DataProcessor::numeric_values(df, column)?;
                let histogram = StatsCalculator::compute_histogram(column, &values, bins)?;
                tracing::debug!(
                    "Histogram of '{}': {} values, peak bin {}",
                    column,
                    histogram.total(),
                    histogram.max_count()
                );
                Ok(Self::panel(index, column.to_string(), None, PanelKind::Histogram(histogram)))
            })
            .collect::<Result<Vec<Panel>>>()?;

        tracing::info!("Built histogram figure with {} panels ({} bins)", panels.len(), bins);

        Ok(Figure {
            title: Some(HISTOGRAM_SUPTITLE.to_string()),
            size: config.figure_size,
            layout: GRID_LAYOUT,
            panels,
            tight_layout: false,
            config: config.clone(),
        })
    }

    /// One box plot per column; column `i` takes grid cell `i`. An empty
    /// column list gives an empty figure.
    pub fn boxplot_figure<S>(df: &DataFrame, columns: &[S], config: &PlotConfig) -> Result<Figure>
    where
        S: AsRef<str> + Sync,
    {
        for (index, column) in columns.iter().enumerate() {
            if GRID_LAYOUT.cell(index).is_none() {
                return Err(Self::layout_error(columns.len()));
            }
            DataProcessor::require_numeric(df, column.as_ref())?;
        }

        let panels = columns
            .par_iter()
            .enumerate()
            .map(|(index, column)| {
                let column = column.as_ref();
                let values = DataProcessor::numeric_values(df, column)?;
                let stats = StatsCalculator::compute_box_stats(&values);
                match &stats {
                    // A single repeated value is fine; an unbounded axis is not.
                    Some(stats) => {
                        let (low, high) = stats.extent();
                        if !(high - low).is_finite() {
                            return Err(PlotError::NonFiniteRange {
                                column: column.to_string(),
                                low,
                                high,
                            });
                        }
                    }
                    None => {
                        tracing::warn!("Column '{}' has no values; drawing empty axes", column);
                    }
                }
                Ok(Self::panel(
                    index,
                    boxplot_title(column),
                    Some(column.to_string()),
                    PanelKind::BoxPlot(stats),
                ))
            })
            .collect::<Result<Vec<Panel>>>()?;

        tracing::info!("Built box plot figure with {} panels", panels.len());

        Ok(Figure {
            title: None,
            size: config.figure_size,
            layout: GRID_LAYOUT,
            panels,
            tight_layout: true,
            config: config.clone(),
        })
    }

    fn check_capacity(required: usize) -> Result<()> {
        if required > GRID_LAYOUT.capacity() {
            return Err(Self::layout_error(required));
        }
        Ok(())
    }

    fn layout_error(required: usize) -> PlotError {
        PlotError::LayoutTooSmall {
            rows: GRID_LAYOUT.rows,
            cols: GRID_LAYOUT.cols,
            required,
        }
    }

    // Callers check capacity first, so every index has a cell.
    fn panel(index: usize, title: String, x_label: Option<String>, kind: PanelKind) -> Panel {
        let (row, col) = (index / GRID_LAYOUT.cols, index % GRID_LAYOUT.cols);
        Panel {
            row,
            col,
            title,
            x_label,
            kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_df() -> DataFrame {
        df!(
            "age" => [23i64, 35, 31, 52, 46, 29, 38, 61],
            "income" => [31000.0, 52000.0, 48000.0, 91000.0, 77000.0, 39000.0, 58000.0, 250000.0],
            "score" => [0.2, 0.5, 0.4, 0.9, 0.7, 0.3, 0.6, 0.8],
            "city" => ["a", "b", "c", "d", "e", "f", "g", "h"]
        )
        .unwrap()
    }

    #[test]
    fn one_histogram_per_column_row_major() {
        let df = sample_df();
        let figure =
            ChartPlotter::histogram_figure(&df, &["age", "income", "score"], 30, &PlotConfig::default())
                .unwrap();

        assert_eq!(figure.panels.len(), 3);
        assert_eq!(figure.title.as_deref(), Some(HISTOGRAM_SUPTITLE));
        assert_eq!(figure.panel_titles(), vec!["age", "income", "score"]);
        let cells: Vec<_> = figure.panels.iter().map(|p| (p.row, p.col)).collect();
        assert_eq!(cells, vec![(0, 0), (0, 1), (1, 0)]);

        for panel in &figure.panels {
            match &panel.kind {
                PanelKind::Histogram(hist) => {
                    assert_eq!(hist.counts.len(), 30);
                    assert_eq!(hist.total(), 8);
                }
                other => panic!("expected histogram, got {:?}", other),
            }
        }
    }

    #[test]
    fn histogram_requires_columns() {
        let df = sample_df();
        let columns: [&str; 0] = [];
        assert!(matches!(
            ChartPlotter::histogram_figure(&df, &columns, 30, &PlotConfig::default()),
            Err(PlotError::NoColumns)
        ));
    }

    #[test]
    fn histogram_rejects_zero_bins() {
        let df = sample_df();
        assert!(matches!(
            ChartPlotter::histogram_figure(&df, &["age"], 0, &PlotConfig::default()),
            Err(PlotError::InvalidBins(0))
        ));
    }

    #[test]
    fn missing_column_fails_both_renderers() {
        let df = sample_df();
        let config = PlotConfig::default();

        match ChartPlotter::histogram_figure(&df, &["age", "height"], 30, &config) {
            Err(PlotError::ColumnNotFound(name)) => assert_eq!(name, "height"),
            other => panic!("expected ColumnNotFound, got {:?}", other),
        }
        match ChartPlotter::boxplot_figure(&df, &["height"], &config) {
            Err(PlotError::ColumnNotFound(name)) => assert_eq!(name, "height"),
            other => panic!("expected ColumnNotFound, got {:?}", other),
        }
    }

    #[test]
    fn non_numeric_column_fails() {
        let df = sample_df();
        assert!(matches!(
            ChartPlotter::boxplot_figure(&df, &["city"], &PlotConfig::default()),
            Err(PlotError::NonNumericColumn { .. })
        ));
    }

    #[test]
    fn boxplot_titles_follow_input_order() {
        let df = sample_df();
        let figure =
            ChartPlotter::boxplot_figure(&df, &["age", "income"], &PlotConfig::default()).unwrap();

        assert_eq!(figure.panel_titles(), vec!["Box Plot of age", "Box Plot of income"]);
        assert_eq!(figure.panels[1].x_label.as_deref(), Some("income"));
        assert!(figure.title.is_none());
        assert!(figure.tight_layout);

        match &figure.panels[1].kind {
            PanelKind::BoxPlot(Some(stats)) => {
                assert_eq!(stats.count, 8);
                assert_eq!(stats.fliers, vec![250000.0]);
            }
            other => panic!("expected box stats, got {:?}", other),
        }
    }

    #[test]
    fn infinite_values_fail_both_renderers() {
        let df = df!("x" => [1.0, 2.0, f64::INFINITY], "y" => [-1e308, 0.0, 1e308]).unwrap();
        let config = PlotConfig::default();

        for column in ["x", "y"] {
            match ChartPlotter::histogram_figure(&df, &[column], 5, &config) {
                Err(PlotError::NonFiniteRange { column: name, .. }) => assert_eq!(name, column),
                other => panic!("expected NonFiniteRange, got {:?}", other),
            }
            match ChartPlotter::boxplot_figure(&df, &[column], &config) {
                Err(PlotError::NonFiniteRange { column: name, .. }) => assert_eq!(name, column),
                other => panic!("expected NonFiniteRange, got {:?}", other),
            }
        }
    }

    #[test]
    fn column_errors_win_over_bin_and_layout_errors() {
        let df = sample_df();
        let config = PlotConfig::default();

        match ChartPlotter::histogram_figure(&df, &["height"], 0, &config) {
            Err(PlotError::ColumnNotFound(name)) => assert_eq!(name, "height"),
            other => panic!("expected ColumnNotFound, got {:?}", other),
        }

        let columns: [&str; 0] = [];
        assert!(matches!(
            ChartPlotter::histogram_figure(&df, &columns, 0, &config),
            Err(PlotError::NoColumns)
        ));

        let columns = vec!["age"; 7];
        assert!(matches!(
            ChartPlotter::histogram_figure(&df, &columns, 0, &config),
            Err(PlotError::LayoutTooSmall { required: 7, .. })
        ));
    }

    #[test]
    fn boxplot_with_no_columns_is_empty() {
        let df = sample_df();
        let columns: Vec<String> = Vec::new();
        let figure = ChartPlotter::boxplot_figure(&df, &columns, &PlotConfig::default()).unwrap();
        assert!(figure.panels.is_empty());
    }

    #[test]
    fn seven_columns_overflow_the_grid() {
        let df = sample_df();
        let columns = vec!["age"; 7];
        let config = PlotConfig::default();
        let expected = |result: crate::error::Result<Figure>| {
            matches!(
                result,
                Err(PlotError::LayoutTooSmall {
                    rows: 3,
                    cols: 2,
                    required: 7
                })
            )
        };

        assert!(expected(ChartPlotter::histogram_figure(&df, &columns, 30, &config)));
        assert!(expected(ChartPlotter::boxplot_figure(&df, &columns, &config)));
    }

    #[test]
    fn six_columns_fill_the_grid() {
        let df = sample_df();
        let columns = vec!["score"; 6];
        let figure =
            ChartPlotter::boxplot_figure(&df, &columns, &PlotConfig::default()).unwrap();
        let last = figure.panels.last().unwrap();
        assert_eq!((last.row, last.col), (2, 1));
    }

    #[test]
    fn repeated_calls_build_identical_figures() {
        let df = sample_df();
        let config = PlotConfig::default();
        let first = ChartPlotter::histogram_figure(&df, &["age", "score"], 10, &config).unwrap();
        let second = ChartPlotter::histogram_figure(&df, &["age", "score"], 10, &config).unwrap();
        assert_eq!(first, second);

        let first = ChartPlotter::boxplot_figure(&df, &["income"], &config).unwrap();
        let second = ChartPlotter::boxplot_figure(&df, &["income"], &config).unwrap();
        assert_eq!(first, second);
    }
}
