//! Data Processor Module
//! Pulls plottable values out of numeric DataFrame columns.

use crate::error::{PlotError, Result};
use polars::prelude::*;

/// Whether a dtype can be drawn as a histogram or box plot.
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Float32
            | DataType::Float64
            | DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
    )
}

/// Handles column lookup and value extraction.
pub struct DataProcessor;

impl DataProcessor {
    /// Check that `column` exists and is numeric.
    pub fn require_numeric<'a>(df: &'a DataFrame, column: &str) -> Result<&'a Column> {
        let series = df
            .column(column)
            .map_err(|_| PlotError::ColumnNotFound(column.to_string()))?;

        if !is_numeric_dtype(series.dtype()) {
            return Err(PlotError::NonNumericColumn {
                column: column.to_string(),
                dtype: series.dtype().to_string(),
            });
        }

        Ok(series)
    }

    /// Values of a numeric column as f64, with nulls and NaNs dropped.
    pub fn numeric_values(df: &DataFrame, column: &str) -> Result<Vec<f64>> {
        let series = Self::require_numeric(df, column)?;
        let value_f64 = series.cast(&DataType::Float64)?;
        let value_ca = value_f64.f64()?;

        Ok(value_ca
            .into_iter()
            .flatten()
            .filter(|v| !v.is_nan())
            .collect())
    }
}
