//! Figure model: what a rendered canvas contains, independent of pixels.

use crate::charts::StaticChartRenderer;
use crate::config::{FigureSize, GridLayout, PlotConfig};
use crate::display::{self, Output};
use crate::error::Result;
use crate::stats::{BoxStats, Histogram};
use image::{ImageFormat, RgbImage};
use std::io::Cursor;

/// What a panel draws.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelKind {
    Histogram(Histogram),
    /// `None` for a column with no values; drawn as empty axes.
    BoxPlot(Option<BoxStats>),
}

/// One subplot in the grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub row: usize,
    pub col: usize,
    pub title: String,
    pub x_label: Option<String>,
    pub kind: PanelKind,
}

/// A full canvas: optional suptitle plus panels placed on a grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub title: Option<String>,
    pub size: FigureSize,
    pub layout: GridLayout,
    pub panels: Vec<Panel>,
    /// Pad panels so titles and tick labels of neighbours don't collide.
    pub tight_layout: bool,
    pub config: PlotConfig,
}

impl Figure {
    pub fn panel_titles(&self) -> Vec<&str> {
        self.panels.iter().map(|p| p.title.as_str()).collect()
    }

    /// Rasterize the figure.
    pub fn render(&self) -> Result<RgbImage> {
        StaticChartRenderer::render(self)
    }

    /// Rasterize and encode as PNG.
    pub fn to_png_bytes(&self) -> Result<Vec<u8>> {
        let image = self.render()?;
        let mut bytes = Vec::new();
        image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        Ok(bytes)
    }

    /// Rasterize and present through `output`.
    pub fn show(&self, output: &Output) -> Result<()> {
        let image = self.render()?;
        let window_title = self.title.as_deref().unwrap_or("distplot");
        display::present(&image, window_title, output)
    }
}
