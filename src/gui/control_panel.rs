//! Control Panel Widget
//! Left side panel with file selection, column choice and plot buttons.

use distplot::{DEFAULT_BINS, GRID_LAYOUT};
use egui::{Color32, RichText, ScrollArea};
use std::path::PathBuf;

/// User settings for plotting
#[derive(Clone)]
pub struct UserSettings {
    pub csv_path: Option<PathBuf>,
    pub bins: usize,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            csv_path: None,
            bins: DEFAULT_BINS,
        }
    }
}

/// Left side control panel with file selection and plot controls.
pub struct ControlPanel {
    pub settings: UserSettings,
    pub columns: Vec<String>,
    pub selected_cols: Vec<bool>,
    pub progress: f32,
    pub status: String,
    pub figure_ready: bool,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            settings: UserSettings::default(),
            columns: Vec::new(),
            selected_cols: Vec::new(),
            progress: 0.0,
            status: "Ready".to_string(),
            figure_ready: false,
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update the numeric columns offered after a CSV load
    pub fn update_columns(&mut self, columns: Vec<String>) {
        // Preselect as many columns as the grid holds
        self.selected_cols = (0..columns.len())
            .map(|i| i < GRID_LAYOUT.capacity())
            .collect();
        self.columns = columns;
        self.figure_ready = false;
    }

    /// Selected columns in table order
    pub fn get_selected_cols(&self) -> Vec<String> {
        self.columns
            .iter()
            .zip(self.selected_cols.iter())
            .filter(|(_, &selected)| selected)
            .map(|(col, _)| col.clone())
            .collect()
    }

    fn selected_count(&self) -> usize {
        self.selected_cols.iter().filter(|&&s| s).count()
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("📊 distplot")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.label(
                RichText::new("Histograms & Box Plots")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== CSV File Section =====
        ui.label(RichText::new("📁 Data Source").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    let path_text = self
                        .settings
                        .csv_path
                        .as_ref()
                        .and_then(|p| p.file_name())
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_else(|| "No file selected".to_string());

                    ui.label(RichText::new(&path_text).size(12.0).color(
                        if self.settings.csv_path.is_some() {
                            Color32::WHITE
                        } else {
                            Color32::GRAY
                        },
                    ));

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("📂 Browse").clicked() {
                            action = ControlPanelAction::BrowseCsv;
                        }
                    });
                });
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Column Section =====
        let capacity = GRID_LAYOUT.capacity();
        let selected = self.selected_count();
        ui.label(RichText::new("🔧 Numeric Columns").size(14.0).strong());
        ui.label(
            RichText::new(format!("{} of at most {} selected", selected, capacity))
                .size(11.0)
                .color(Color32::GRAY),
        );
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(5.0)
            .show(ui, |ui| {
                ScrollArea::vertical().max_height(180.0).show(ui, |ui| {
                    for (col, checked) in self.columns.iter().zip(self.selected_cols.iter_mut()) {
                        // Grid has no room for more; only allow unchecking
                        let enabled = *checked || selected < capacity;
                        ui.add_enabled(enabled, egui::Checkbox::new(checked, col));
                    }
                });
            });

        ui.add_space(5.0);
        ui.horizontal(|ui| {
            if ui.small_button("Clear All").clicked() {
                self.selected_cols.iter_mut().for_each(|v| *v = false);
            }
        });

        ui.add_space(10.0);
        ui.horizontal(|ui| {
            ui.label("Histogram bins:");
            ui.add(egui::DragValue::new(&mut self.settings.bins).range(1..=500));
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Action Buttons =====
        let plot_enabled = self.selected_count() > 0;
        ui.vertical_centered(|ui| {
            ui.add_enabled_ui(plot_enabled, |ui| {
                let button = egui::Button::new(RichText::new("▶ Histograms").size(16.0))
                    .min_size(egui::vec2(200.0, 35.0));
                if ui.add(button).clicked() {
                    action = ControlPanelAction::PlotHistograms;
                }

                ui.add_space(6.0);

                let button = egui::Button::new(RichText::new("▶ Box Plots").size(16.0))
                    .min_size(egui::vec2(200.0, 35.0));
                if ui.add(button).clicked() {
                    action = ControlPanelAction::PlotBoxPlots;
                }
            });

            ui.add_space(8.0);

            ui.add_enabled_ui(self.figure_ready, |ui| {
                let save_button = egui::Button::new(RichText::new("💾 Save PNG").size(14.0))
                    .min_size(egui::vec2(150.0, 30.0));
                if ui.add(save_button).clicked() {
                    action = ControlPanelAction::SavePng;
                }

                let open_button = egui::Button::new(RichText::new("🔗 Open Externally").size(14.0))
                    .min_size(egui::vec2(150.0, 30.0));
                if ui.add(open_button).clicked() {
                    action = ControlPanelAction::OpenExternal;
                }
            });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Progress Section =====
        ui.label(RichText::new("📊 Progress").size(14.0).strong());
        ui.add_space(5.0);

        ui.add(
            egui::ProgressBar::new(self.progress / 100.0)
                .show_percentage()
                .animate(self.progress > 0.0 && self.progress < 100.0),
        );

        ui.add_space(5.0);

        let status_color = if self.status.contains("Error") {
            Color32::from_rgb(220, 53, 69)
        } else if self.status.contains("Complete") {
            Color32::from_rgb(40, 167, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }

    /// Set progress and status
    pub fn set_progress(&mut self, progress: f32, status: &str) {
        self.progress = progress;
        self.status = status.to_string();
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    BrowseCsv,
    PlotHistograms,
    PlotBoxPlots,
    SavePng,
    OpenExternal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preselects_up_to_grid_capacity() {
        let mut panel = ControlPanel::new();
        let columns: Vec<String> = (0..8).map(|i| format!("c{}", i)).collect();
        panel.update_columns(columns);

        assert_eq!(panel.get_selected_cols(), vec!["c0", "c1", "c2", "c3", "c4", "c5"]);
        assert_eq!(panel.settings.bins, DEFAULT_BINS);
    }
}
