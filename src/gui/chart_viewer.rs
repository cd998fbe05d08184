//! Chart Viewer Widget
//! Central panel showing the rendered figure with a per-column summary table.

use distplot::display::{color_image, FigureView};
use distplot::stats::ColumnSummary;
use egui::RichText;
use image::RgbImage;

/// Figure display plus the summary rows of the plotted columns.
#[derive(Default)]
pub struct ChartViewer {
    view: FigureView,
    /// Last rendered figure, kept for saving
    pub image: Option<RgbImage>,
    pub title: String,
    pub summaries: Vec<ColumnSummary>,
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.view.clear();
        self.image = None;
        self.title.clear();
        self.summaries.clear();
    }

    pub fn set_figure(&mut self, title: String, image: RgbImage, summaries: Vec<ColumnSummary>) {
        self.view.set_image(color_image(&image));
        self.image = Some(image);
        self.title = title;
        self.summaries = summaries;
    }

    pub fn show(&mut self, ui: &mut egui::Ui) {
        if !self.summaries.is_empty() {
            Self::draw_summary_table(ui, &self.summaries);
            ui.add_space(8.0);
            ui.separator();
        }
        self.view.show(ui);
    }

    fn draw_summary_table(ui: &mut egui::Ui, summaries: &[ColumnSummary]) {
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                egui::Grid::new("summary_table")
                    .striped(true)
                    .min_col_width(60.0)
                    .spacing([8.0, 4.0])
                    .show(ui, |ui| {
                        for header in ["Column", "N", "Mean", "Std", "Min", "Max"] {
                            ui.label(RichText::new(header).strong().size(11.0));
                        }
                        ui.end_row();

                        for s in summaries {
                            ui.label(RichText::new(&s.column).size(11.0));
                            ui.label(RichText::new(s.count.to_string()).size(11.0));
                            for value in [s.mean, s.std, s.min, s.max] {
                                let text = if value.is_finite() {
                                    format!("{:.3}", value)
                                } else {
                                    "-".to_string()
                                };
                                ui.label(RichText::new(text).size(11.0));
                            }
                            ui.end_row();
                        }
                    });
            });
    }
}
