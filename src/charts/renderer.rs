//! Static Chart Renderer
//! Rasterizes a [`Figure`] with plotters onto an RGB bitmap.
//!
//! Layout:
//! 1. Optional suptitle centered at the top
//! 2. The remaining canvas split evenly into the figure's grid, row-major
//! 3. Each panel: caption, mesh with tick labels, then the bars or the box
//!
//! Cells without a panel are left blank.

use crate::charts::{Figure, Panel, PanelKind};
use crate::config::{PlotConfig, Rgb};
use crate::error::{PlotError, Result};
use crate::stats::{BoxStats, Histogram};
use image::RgbImage;
use plotters::coord::Shift;
use plotters::prelude::*;

// Cell padding in pixels
const LOOSE_MARGIN: i32 = 4;
const TIGHT_MARGIN: i32 = 14;

// Vertical extent of the box in the [0, 1] band of a box plot panel
const BOX_BOTTOM: f64 = 0.3;
const BOX_TOP: f64 = 0.7;
const CAP_BOTTOM: f64 = 0.4;
const CAP_TOP: f64 = 0.6;
const FLIER_RADIUS: i32 = 3;

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Draw every panel of `figure` and return the bitmap.
    pub fn render(figure: &Figure) -> Result<RgbImage> {
        let (width, height) = (figure.size.width, figure.size.height);
        let mut buffer = vec![0u8; width as usize * height as usize * 3];

        {
            let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
            root.fill(&WHITE)?;

            let config = &figure.config;
            let body = match &figure.title {
                Some(title) => root.titled(
                    title,
                    (config.font_family.as_str(), config.suptitle_size as f64),
                )?,
                None => root.margin(LOOSE_MARGIN, LOOSE_MARGIN, LOOSE_MARGIN, LOOSE_MARGIN),
            };

            let cells = body.split_evenly((figure.layout.rows, figure.layout.cols));
            let margin = if figure.tight_layout {
                TIGHT_MARGIN
            } else {
                LOOSE_MARGIN
            };

            for panel in &figure.panels {
                let index = panel.row * figure.layout.cols + panel.col;
                let cell = cells.get(index).ok_or_else(|| PlotError::LayoutTooSmall {
                    rows: figure.layout.rows,
                    cols: figure.layout.cols,
                    required: index + 1,
                })?;
                let area = cell.margin(margin, margin, margin, margin);
                Self::draw_panel(&area, panel, config)?;
            }

            root.present()?;
        }

        tracing::debug!(
            "Rendered {}x{} figure with {} panels",
            width,
            height,
            figure.panels.len()
        );

        RgbImage::from_raw(width, height, buffer)
            .ok_or_else(|| PlotError::Drawing("bitmap buffer size mismatch".to_string()))
    }

    fn draw_panel<DB>(area: &DrawingArea<DB, Shift>, panel: &Panel, config: &PlotConfig) -> Result<()>
    where
        DB: DrawingBackend,
        DB::ErrorType: 'static,
    {
        match &panel.kind {
            PanelKind::Histogram(histogram) => {
                Self::draw_histogram(area, &panel.title, histogram, config)
            }
            PanelKind::BoxPlot(stats) => Self::draw_boxplot(
                area,
                &panel.title,
                panel.x_label.as_deref(),
                stats.as_ref(),
                config,
            ),
        }
    }

    /// Bars from edge to edge, filled and outlined, on a gridded mesh.
    fn draw_histogram<DB>(
        area: &DrawingArea<DB, Shift>,
        title: &str,
        histogram: &Histogram,
        config: &PlotConfig,
    ) -> Result<()>
    where
        DB: DrawingBackend,
        DB::ErrorType: 'static,
    {
        let x_min = histogram.edges.first().copied().unwrap_or(0.0);
        let x_max = histogram.edges.last().copied().unwrap_or(1.0);
        let y_max = (histogram.max_count().max(1) as f64) * 1.05;

        let mut chart = ChartBuilder::on(area)
            .caption(title, (config.font_family.as_str(), config.title_size as f64))
            .margin(6)
            .x_label_area_size(28)
            .y_label_area_size(44)
            .build_cartesian_2d(x_min..x_max, 0f64..y_max)?;

        chart
            .configure_mesh()
            .x_labels(6)
            .y_labels(5)
            .label_style((config.font_family.as_str(), config.label_size as f64))
            .light_line_style(RGBColor(235, 235, 235))
            .draw()?;

        let fill = Self::color(config.histogram_fill);
        let edge = Self::color(config.histogram_edge);

        chart.draw_series(
            histogram
                .bars()
                .map(|(low, high, count)| Rectangle::new([(low, 0.0), (high, count as f64)], fill.filled())),
        )?;
        chart.draw_series(histogram.bars().filter(|&(_, _, count)| count > 0).map(
            |(low, high, count)| Rectangle::new([(low, 0.0), (high, count as f64)], edge.stroke_width(1)),
        ))?;

        Ok(())
    }

    /// Horizontal box: values on x, the box centred in a unit band on y.
    fn draw_boxplot<DB>(
        area: &DrawingArea<DB, Shift>,
        title: &str,
        x_label: Option<&str>,
        stats: Option<&BoxStats>,
        config: &PlotConfig,
    ) -> Result<()>
    where
        DB: DrawingBackend,
        DB::ErrorType: 'static,
    {
        let (x_min, x_max) = match stats {
            Some(stats) => Self::padded_range(stats.extent()),
            None => (0.0, 1.0),
        };

        let mut chart = ChartBuilder::on(area)
            .caption(title, (config.font_family.as_str(), config.title_size as f64))
            .margin(6)
            .x_label_area_size(if x_label.is_some() { 40 } else { 28 })
            .y_label_area_size(8)
            .build_cartesian_2d(x_min..x_max, 0f64..1f64)?;

        let mut mesh = chart.configure_mesh();
        mesh.x_labels(6)
            .disable_y_mesh()
            .disable_y_axis()
            .label_style((config.font_family.as_str(), config.label_size as f64))
            .light_line_style(RGBColor(235, 235, 235));
        if let Some(label) = x_label {
            mesh.x_desc(label)
                .axis_desc_style((config.font_family.as_str(), config.label_size as f64));
        }
        mesh.draw()?;

        let Some(stats) = stats else {
            return Ok(());
        };

        let fill = Self::color(config.boxplot_fill);
        let edge = Self::color(config.boxplot_edge);
        let mid = (BOX_BOTTOM + BOX_TOP) / 2.0;

        chart.draw_series(std::iter::once(Rectangle::new(
            [(stats.q1, BOX_BOTTOM), (stats.q3, BOX_TOP)],
            fill.filled(),
        )))?;
        chart.draw_series(std::iter::once(Rectangle::new(
            [(stats.q1, BOX_BOTTOM), (stats.q3, BOX_TOP)],
            edge.stroke_width(1),
        )))?;

        let lines = vec![
            // median
            vec![(stats.median, BOX_BOTTOM), (stats.median, BOX_TOP)],
            // whiskers
            vec![(stats.whisker_low, mid), (stats.q1, mid)],
            vec![(stats.q3, mid), (stats.whisker_high, mid)],
            // caps
            vec![(stats.whisker_low, CAP_BOTTOM), (stats.whisker_low, CAP_TOP)],
            vec![(stats.whisker_high, CAP_BOTTOM), (stats.whisker_high, CAP_TOP)],
        ];
        chart.draw_series(
            lines
                .into_iter()
                .map(|points| PathElement::new(points, edge.stroke_width(2))),
        )?;

        chart.draw_series(
            stats
                .fliers
                .iter()
                .map(|&x| Circle::new((x, mid), FLIER_RADIUS, edge.stroke_width(1))),
        )?;

        Ok(())
    }

    /// Range with 5% padding either side; a single point is padded by 5% of
    /// its magnitude, at least 0.5. A bound that would overflow stays unpadded.
    fn padded_range((low, high): (f64, f64)) -> (f64, f64) {
        let span = high - low;
        let pad = if span > 0.0 {
            span * 0.05
        } else {
            (low.abs() * 0.05).max(0.5)
        };
        let lower = if (low - pad).is_finite() { low - pad } else { low };
        let upper = if (high + pad).is_finite() { high + pad } else { high };
        (lower, upper)
    }

    fn color(rgb: Rgb) -> RGBColor {
        RGBColor(rgb.0, rgb.1, rgb.2)
    }
}
