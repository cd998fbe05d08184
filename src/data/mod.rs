//! Data module - CSV loading and numeric column extraction

mod loader;
mod processor;

pub use loader::{DataLoader, LoaderError};
pub use processor::{is_numeric_dtype, DataProcessor};
