//! Error types shared by figure building, rendering and output.

use plotters::drawing::DrawingAreaErrorKind;
use polars::prelude::PolarsError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlotError {
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),
    #[error("Column not found: {0}")]
    ColumnNotFound(String),
    #[error("Column '{column}' is not numeric (dtype: {dtype})")]
    NonNumericColumn { column: String, dtype: String },
    #[error("No columns to plot")]
    NoColumns,
    #[error("Bin count must be a positive integer, got {0}")]
    InvalidBins(usize),
    #[error("Autodetected range of column '{column}' is not finite: [{low}, {high}]")]
    NonFiniteRange { column: String, low: f64, high: f64 },
    #[error("Layout of {rows}x{cols} must be larger than required size {required}")]
    LayoutTooSmall {
        rows: usize,
        cols: usize,
        required: usize,
    },
    #[error("Drawing error: {0}")]
    Drawing(String),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Display error: {0}")]
    Display(String),
    #[error("Invalid config: {0}")]
    Config(#[from] serde_json::Error),
}

impl<E> From<DrawingAreaErrorKind<E>> for PlotError
where
    E: std::error::Error + Send + Sync,
{
    fn from(err: DrawingAreaErrorKind<E>) -> Self {
        PlotError::Drawing(err.to_string())
    }
}

#[cfg(test)]
impl PlotError {
    /// Rendering failed only because no usable system font was found.
    pub(crate) fn is_font_unavailable(&self) -> bool {
        matches!(self, PlotError::Drawing(msg) if msg.to_lowercase().contains("font"))
    }
}

pub type Result<T> = std::result::Result<T, PlotError>;
