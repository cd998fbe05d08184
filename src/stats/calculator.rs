//! Statistics Calculator Module
//! Computes what the charts need to draw: histogram bins, box plot quartiles
//! and per-column summaries.

use crate::data::DataProcessor;
use crate::error::{PlotError, Result};
use polars::prelude::*;
use rayon::prelude::*;
use statrs::statistics::Statistics;

/// Whiskers reach the most extreme point within this many IQRs of the box.
pub const WHISKER_IQR_FACTOR: f64 = 1.5;

/// Equal-width histogram of one column.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// Bin edges, `counts.len() + 1` of them.
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

impl Histogram {
    /// (lower edge, upper edge, count) per bin.
    pub fn bars(&self) -> impl Iterator<Item = (f64, f64, usize)> + '_ {
        self.edges
            .windows(2)
            .zip(self.counts.iter())
            .map(|(edge, &count)| (edge[0], edge[1], count))
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    pub fn max_count(&self) -> usize {
        self.counts.iter().copied().max().unwrap_or(0)
    }
}

/// Box plot statistics for one column.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxStats {
    pub count: usize,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub whisker_low: f64,
    pub whisker_high: f64,
    /// Points beyond the whiskers, ascending.
    pub fliers: Vec<f64>,
}

impl BoxStats {
    /// Smallest and largest drawn value, fliers included.
    pub fn extent(&self) -> (f64, f64) {
        let low = self
            .fliers
            .first()
            .copied()
            .map_or(self.whisker_low, |f| f.min(self.whisker_low));
        let high = self
            .fliers
            .last()
            .copied()
            .map_or(self.whisker_high, |f| f.max(self.whisker_high));
        (low, high)
    }
}

/// Descriptive summary reported next to a panel.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSummary {
    pub column: String,
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
}

/// Handles statistical calculations with multi-threading support.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Bin `values` of `column` into `bins` equal-width intervals over their range.
    ///
    /// A constant column is centred in a unit-wide range and an empty one
    /// spans `[0, 1]`. The upper edge is inclusive for the last bin. Infinite
    /// values, or a range too wide to measure, fail with `NonFiniteRange`.
    pub fn compute_histogram(column: &str, values: &[f64], bins: usize) -> Result<Histogram> {
        if bins == 0 {
            return Err(PlotError::InvalidBins(bins));
        }

        let (low, high) = if values.is_empty() {
            (0.0, 1.0)
        } else {
            let min = Statistics::min(values);
            let max = Statistics::max(values);
            if min == max {
                (min - 0.5, max + 0.5)
            } else {
                (min, max)
            }
        };
        Self::check_finite_range(column, low, high)?;

        let width = high - low;
        let mut edges: Vec<f64> = (0..=bins)
            .map(|i| low + width * i as f64 / bins as f64)
            .collect();
        edges[bins] = high;

        let mut counts = vec![0usize; bins];
        for &v in values {
            let idx = ((v - low) / width * bins as f64).floor() as usize;
            counts[idx.min(bins - 1)] += 1;
        }

        Ok(Histogram { edges, counts })
    }

    /// Fails unless `[low, high]` is a non-empty interval of finite width.
    fn check_finite_range(column: &str, low: f64, high: f64) -> Result<()> {
        let width = high - low;
        if width.is_finite() && width > 0.0 {
            Ok(())
        } else {
            Err(PlotError::NonFiniteRange {
                column: column.to_string(),
                low,
                high,
            })
        }
    }

    /// Quartiles, whiskers and fliers. `None` when there is nothing to draw.
    pub fn compute_box_stats(values: &[f64]) -> Option<BoxStats> {
        if values.is_empty() {
            return None;
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let q1 = Self::percentile(&sorted, 25.0);
        let median = Self::percentile(&sorted, 50.0);
        let q3 = Self::percentile(&sorted, 75.0);
        let iqr = q3 - q1;

        let high_limit = q3 + WHISKER_IQR_FACTOR * iqr;
        let whisker_high = sorted
            .iter()
            .rev()
            .copied()
            .find(|&v| v <= high_limit)
            .filter(|&v| v >= q3)
            .unwrap_or(q3);

        let low_limit = q1 - WHISKER_IQR_FACTOR * iqr;
        let whisker_low = sorted
            .iter()
            .copied()
            .find(|&v| v >= low_limit)
            .filter(|&v| v <= q1)
            .unwrap_or(q1);

        let fliers = sorted
            .iter()
            .copied()
            .filter(|&v| v < whisker_low || v > whisker_high)
            .collect();

        Some(BoxStats {
            count: sorted.len(),
            q1,
            median,
            q3,
            whisker_low,
            whisker_high,
            fliers,
        })
    }

    /// Calculate percentile using linear interpolation (NumPy compatible).
    pub fn percentile(sorted_values: &[f64], p: f64) -> f64 {
        let n = sorted_values.len();
        if n == 0 {
            return f64::NAN;
        }
        if n == 1 {
            return sorted_values[0];
        }

        let rank = (p / 100.0) * (n - 1) as f64;
        let lower = rank.floor() as usize;
        let upper = (rank.ceil() as usize).min(n - 1);
        let frac = rank - lower as f64;

        if lower == upper {
            sorted_values[lower]
        } else {
            sorted_values[lower] * (1.0 - frac) + sorted_values[upper] * frac
        }
    }

    /// Count, mean, sample std and range of a column's values.
    pub fn summarize(column: &str, values: &[f64]) -> ColumnSummary {
        let std = if values.len() > 1 {
            Statistics::std_dev(values)
        } else {
            0.0
        };

        ColumnSummary {
            column: column.to_string(),
            count: values.len(),
            mean: Statistics::mean(values),
            std,
            min: Statistics::min(values),
            max: Statistics::max(values),
        }
    }

    /// Summaries for all columns in parallel, in input order.
    pub fn summarize_all_parallel(df: &DataFrame, columns: &[String]) -> Result<Vec<ColumnSummary>> {
        columns
            .par_iter()
            .map(|column| {
                let values = DataProcessor::numeric_values(df, column)?;
                Ok(Self::summarize(column, &values))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn histogram_counts_every_value() {
        let values: Vec<f64> = (0..100).map(|v| v as f64).collect();
        let hist = StatsCalculator::compute_histogram("v", &values, 30).unwrap();

        assert_eq!(hist.counts.len(), 30);
        assert_eq!(hist.edges.len(), 31);
        assert_eq!(hist.total(), 100);
        assert_eq!(hist.edges[0], 0.0);
        assert_eq!(hist.edges[30], 99.0);
    }

    #[test]
    fn histogram_max_lands_in_last_bin() {
        let hist = StatsCalculator::compute_histogram("v", &[0.0, 5.0, 10.0], 2).unwrap();
        assert_eq!(hist.edges, vec![0.0, 5.0, 10.0]);
        assert_eq!(hist.counts, vec![1, 2]);
    }

    #[test]
    fn histogram_of_constant_column() {
        let hist = StatsCalculator::compute_histogram("v", &[4.0, 4.0, 4.0], 4).unwrap();
        assert_eq!(hist.edges.first(), Some(&3.5));
        assert_eq!(hist.edges.last(), Some(&4.5));
        assert_eq!(hist.total(), 3);
        assert_eq!(hist.counts, vec![0, 0, 3, 0]);
    }

    #[test]
    fn histogram_of_empty_column() {
        let hist = StatsCalculator::compute_histogram("v", &[], 5).unwrap();
        assert_eq!(hist.edges.first(), Some(&0.0));
        assert_eq!(hist.edges.last(), Some(&1.0));
        assert_eq!(hist.total(), 0);
    }

    #[test]
    fn zero_bins_rejected() {
        assert!(matches!(
            StatsCalculator::compute_histogram("v", &[1.0, 2.0], 0),
            Err(PlotError::InvalidBins(0))
        ));
    }

    #[test]
    fn infinite_values_are_rejected() {
        match StatsCalculator::compute_histogram("x", &[1.0, 2.0, f64::INFINITY], 5) {
            Err(PlotError::NonFiniteRange { column, low, high }) => {
                assert_eq!(column, "x");
                assert_eq!(low, 1.0);
                assert_eq!(high, f64::INFINITY);
            }
            other => panic!("expected NonFiniteRange, got {:?}", other),
        }
        assert!(matches!(
            StatsCalculator::compute_histogram("x", &[f64::NEG_INFINITY, 0.0], 5),
            Err(PlotError::NonFiniteRange { .. })
        ));
    }

    #[test]
    fn overflowing_range_is_rejected() {
        assert!(matches!(
            StatsCalculator::compute_histogram("x", &[-1e308, 1e308], 4),
            Err(PlotError::NonFiniteRange { .. })
        ));
        // 0.5 is lost to rounding at this magnitude, leaving a zero-width range
        assert!(matches!(
            StatsCalculator::compute_histogram("x", &[1e300, 1e300], 4),
            Err(PlotError::NonFiniteRange { .. })
        ));
    }

    #[test]
    fn box_stats_use_linear_quartiles() {
        let stats = StatsCalculator::compute_box_stats(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(stats.q1, 1.75);
        assert_eq!(stats.median, 2.5);
        assert_eq!(stats.q3, 3.25);
        assert_eq!(stats.whisker_low, 1.0);
        assert_eq!(stats.whisker_high, 4.0);
        assert!(stats.fliers.is_empty());
    }

    #[test]
    fn outliers_become_fliers() {
        let stats =
            StatsCalculator::compute_box_stats(&[10.0, 1.0, 2.0, 3.0, 4.0, 5.0, 100.0]).unwrap();
        assert_eq!(stats.median, 4.0);
        assert_eq!(stats.q1, 2.5);
        assert_eq!(stats.q3, 7.5);
        assert_eq!(stats.whisker_low, 1.0);
        assert_eq!(stats.whisker_high, 10.0);
        assert_eq!(stats.fliers, vec![100.0]);
        assert_eq!(stats.extent(), (1.0, 100.0));
    }

    #[test]
    fn no_box_for_empty_column() {
        assert!(StatsCalculator::compute_box_stats(&[]).is_none());
    }

    #[test]
    fn summaries_follow_column_order() {
        let df = df!(
            "b" => [1.0, 2.0, 3.0],
            "a" => [10i64, 10, 10]
        )
        .unwrap();
        let columns = vec!["a".to_string(), "b".to_string()];

        let summaries = StatsCalculator::summarize_all_parallel(&df, &columns).unwrap();
        assert_eq!(summaries[0].column, "a");
        assert!(summaries[0].std.abs() < 1e-12);
        assert_eq!(summaries[1].column, "b");
        assert!((summaries[1].mean - 2.0).abs() < 1e-12);
        assert_eq!(summaries[1].min, 1.0);
        assert_eq!(summaries[1].max, 3.0);
        assert!((summaries[1].std - 1.0).abs() < 1e-12);
    }
}
