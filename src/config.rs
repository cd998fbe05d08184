//! Plot Configuration
//! Figure size, colors and fonts shared by both renderers.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default histogram bin count.
pub const DEFAULT_BINS: usize = 30;

/// Fixed subplot grid. Not part of [`PlotConfig`]: every figure uses 3 rows by 2 columns.
pub const GRID_LAYOUT: GridLayout = GridLayout { rows: 3, cols: 2 };

/// Subplot grid shape, filled row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridLayout {
    pub rows: usize,
    pub cols: usize,
}

impl GridLayout {
    pub fn capacity(&self) -> usize {
        self.rows * self.cols
    }

    /// Cell (row, col) for a 0-based panel index, or `None` past the last cell.
    pub fn cell(&self, index: usize) -> Option<(usize, usize)> {
        if index < self.capacity() {
            Some((index / self.cols, index % self.cols))
        } else {
            None
        }
    }
}

/// Figure size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FigureSize {
    pub width: u32,
    pub height: u32,
}

impl Default for FigureSize {
    // 12x8 inches at 100 dpi
    fn default() -> Self {
        Self {
            width: 1200,
            height: 800,
        }
    }
}

/// RGB color triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

pub const SKY_BLUE: Rgb = Rgb(135, 206, 235);
pub const LIGHT_BLUE: Rgb = Rgb(173, 216, 230);
pub const BLACK: Rgb = Rgb(0, 0, 0);
pub const DARK_GRAY: Rgb = Rgb(63, 63, 63);

/// Rendering settings. Every field has a default, so a partial JSON file is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    pub figure_size: FigureSize,
    pub default_bins: usize,
    pub histogram_fill: Rgb,
    pub histogram_edge: Rgb,
    pub boxplot_fill: Rgb,
    pub boxplot_edge: Rgb,
    pub font_family: String,
    pub suptitle_size: u32,
    pub title_size: u32,
    pub label_size: u32,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            figure_size: FigureSize::default(),
            default_bins: DEFAULT_BINS,
            histogram_fill: SKY_BLUE,
            histogram_edge: BLACK,
            boxplot_fill: LIGHT_BLUE,
            boxplot_edge: DARK_GRAY,
            font_family: "sans-serif".to_string(),
            suptitle_size: 26,
            title_size: 18,
            label_size: 13,
        }
    }
}

impl PlotConfig {
    /// Load settings from a JSON file. Missing fields keep their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config = serde_json::from_str(&text)?;
        tracing::debug!("Loaded plot config from {}", path.as_ref().display());
        Ok(config)
    }
}
