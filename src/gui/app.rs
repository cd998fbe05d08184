//! distplot Main Application
//! Main window with control panel and figure viewer.

use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use distplot::charts::ChartPlotter;
use distplot::data::DataLoader;
use distplot::display::{self, Output};
use distplot::stats::{ColumnSummary, StatsCalculator};
use distplot::PlotConfig;
use egui::SidePanel;
use image::RgbImage;
use polars::prelude::*;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread;

/// Which figure to build
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PlotKind {
    Histograms,
    BoxPlots,
}

/// Render result from background thread
enum RenderResult {
    Progress(f32, String),
    Complete {
        title: String,
        image: RgbImage,
        summaries: Vec<ColumnSummary>,
    },
    Error(String),
}

/// CSV loading result from background thread
enum LoadResult {
    Progress(String),
    Complete(DataLoader),
    Error(String),
}

/// Main application window.
pub struct DistPlotApp {
    loader: DataLoader,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,
    config: PlotConfig,

    // Async rendering
    render_rx: Option<Receiver<RenderResult>>,
    is_rendering: bool,

    // Async CSV loading
    load_rx: Option<Receiver<LoadResult>>,
    is_loading: bool,
}

impl DistPlotApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: PlotConfig) -> Self {
        let mut control_panel = ControlPanel::new();
        control_panel.settings.bins = config.default_bins;

        Self {
            loader: DataLoader::new(),
            control_panel,
            chart_viewer: ChartViewer::new(),
            config,
            render_rx: None,
            is_rendering: false,
            load_rx: None,
            is_loading: false,
        }
    }

    /// Handle CSV file selection; loading runs in the background
    fn handle_browse_csv(&mut self) {
        if self.is_loading {
            return;
        }

        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .pick_file()
        {
            self.chart_viewer.clear();
            self.control_panel.figure_ready = false;
            self.control_panel.settings.csv_path = Some(path.clone());
            self.control_panel.set_progress(0.0, "Loading CSV file...");
            self.is_loading = true;

            let (tx, rx) = channel();
            self.load_rx = Some(rx);

            thread::spawn(move || {
                let _ = tx.send(LoadResult::Progress("Reading CSV file...".to_string()));

                let mut loader = DataLoader::new();
                if let Err(e) = loader.load_csv(&path) {
                    tracing::error!("Failed to load {}: {}", path.display(), e);
                    let _ = tx.send(LoadResult::Error(e.to_string()));
                    return;
                }
                let _ = tx.send(LoadResult::Complete(loader));
            });
        }
    }

    /// Check for CSV loading results
    fn check_load_results(&mut self) {
        let rx = self.load_rx.take();
        if let Some(rx) = rx {
            let mut should_keep_receiver = true;

            while let Ok(result) = rx.try_recv() {
                match result {
                    LoadResult::Progress(status) => {
                        self.control_panel.set_progress(0.0, &status);
                    }
                    LoadResult::Complete(loader) => {
                        let numeric_columns = loader.get_numeric_columns();
                        let file_name = loader
                            .get_file_path()
                            .and_then(|p| p.file_name())
                            .map(|name| name.to_string_lossy().into_owned())
                            .unwrap_or_default();
                        let status = format!(
                            "Loaded {}: {} rows, {} of {} columns numeric",
                            file_name,
                            loader.get_row_count(),
                            numeric_columns.len(),
                            loader.get_columns().len()
                        );
                        self.control_panel.update_columns(numeric_columns);
                        self.control_panel.set_progress(0.0, &status);
                        self.loader = loader;
                        self.is_loading = false;
                        should_keep_receiver = false;
                    }
                    LoadResult::Error(error) => {
                        self.control_panel
                            .set_progress(0.0, &format!("Error: {}", error));
                        self.is_loading = false;
                        should_keep_receiver = false;
                    }
                }
            }

            if should_keep_receiver {
                self.load_rx = Some(rx);
            }
        }
    }

    /// Start rendering in background thread
    fn start_render(&mut self, kind: PlotKind) {
        let columns = self.control_panel.get_selected_cols();
        let bins = self.control_panel.settings.bins;
        let config = self.config.clone();

        let Some(df) = self.loader.get_dataframe().cloned() else {
            self.control_panel.set_progress(0.0, "No data loaded");
            return;
        };

        let (tx, rx) = channel();
        self.render_rx = Some(rx);
        self.is_rendering = true;
        self.control_panel.figure_ready = false;
        self.control_panel.set_progress(5.0, "Building figure...");

        thread::spawn(move || {
            Self::run_render(tx, df, kind, columns, bins, config);
        });
    }

    /// Build and rasterize a figure (called from background thread)
    fn run_render(
        tx: Sender<RenderResult>,
        df: DataFrame,
        kind: PlotKind,
        columns: Vec<String>,
        bins: usize,
        config: PlotConfig,
    ) {
        let figure = match kind {
            PlotKind::Histograms => ChartPlotter::histogram_figure(&df, &columns, bins, &config),
            PlotKind::BoxPlots => ChartPlotter::boxplot_figure(&df, &columns, &config),
        };
        let figure = match figure {
            Ok(figure) => figure,
            Err(e) => {
                let _ = tx.send(RenderResult::Error(e.to_string()));
                return;
            }
        };

        let _ = tx.send(RenderResult::Progress(40.0, "Computing summaries...".to_string()));

        let summaries = match StatsCalculator::summarize_all_parallel(&df, &columns) {
            Ok(summaries) => summaries,
            Err(e) => {
                let _ = tx.send(RenderResult::Error(e.to_string()));
                return;
            }
        };

        let _ = tx.send(RenderResult::Progress(60.0, "Rendering figure...".to_string()));

        match figure.render() {
            Ok(image) => {
                let title = match kind {
                    PlotKind::Histograms => "histograms",
                    PlotKind::BoxPlots => "boxplots",
                };
                let _ = tx.send(RenderResult::Complete {
                    title: title.to_string(),
                    image,
                    summaries,
                });
            }
            Err(e) => {
                let _ = tx.send(RenderResult::Error(e.to_string()));
            }
        }
    }

    /// Check for render results
    fn check_render_results(&mut self) {
        let rx = self.render_rx.take();
        if let Some(rx) = rx {
            let mut should_keep_receiver = true;

            while let Ok(result) = rx.try_recv() {
                match result {
                    RenderResult::Progress(progress, status) => {
                        self.control_panel.set_progress(progress, &status);
                    }
                    RenderResult::Complete {
                        title,
                        image,
                        summaries,
                    } => {
                        let count = summaries.len();
                        self.chart_viewer.set_figure(title, image, summaries);
                        self.control_panel.figure_ready = true;
                        self.control_panel
                            .set_progress(100.0, &format!("Complete! {} panels drawn", count));
                        self.is_rendering = false;
                        should_keep_receiver = false;
                    }
                    RenderResult::Error(error) => {
                        self.control_panel
                            .set_progress(0.0, &format!("Error: {}", error));
                        self.is_rendering = false;
                        should_keep_receiver = false;
                    }
                }
            }

            if should_keep_receiver {
                self.render_rx = Some(rx);
            }
        }
    }

    /// Save the current figure where the user picks
    fn handle_save_png(&mut self) {
        let Some(image) = &self.chart_viewer.image else {
            self.control_panel.set_progress(0.0, "No figure to save");
            return;
        };

        let Some(path) = rfd::FileDialog::new()
            .add_filter("PNG Image", &["png"])
            .set_file_name(format!("{}.png", self.chart_viewer.title))
            .save_file()
        else {
            return;
        };

        match display::save_png(image, &path) {
            Ok(()) => self
                .control_panel
                .set_progress(100.0, &format!("Complete! Saved {}", path.display())),
            Err(e) => self
                .control_panel
                .set_progress(0.0, &format!("Error: {}", e)),
        }
    }

    /// Hand the current figure to the system image viewer
    fn handle_open_external(&mut self) {
        let Some(image) = &self.chart_viewer.image else {
            return;
        };

        let path = std::env::temp_dir().join(format!("distplot_{}.png", self.chart_viewer.title));
        if let Err(e) = display::present(image, &self.chart_viewer.title, &Output::OpenExternal(path)) {
            self.control_panel
                .set_progress(0.0, &format!("Error: {}", e));
        }
    }
}

impl eframe::App for DistPlotApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_load_results();
        self.check_render_results();

        if self.is_loading || self.is_rendering {
            ctx.request_repaint();
        }

        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(280.0)
            .max_width(340.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = self.control_panel.show(ui);

                    match action {
                        ControlPanelAction::BrowseCsv => self.handle_browse_csv(),
                        ControlPanelAction::PlotHistograms => {
                            if !self.is_rendering {
                                self.start_render(PlotKind::Histograms);
                            }
                        }
                        ControlPanelAction::PlotBoxPlots => {
                            if !self.is_rendering {
                                self.start_render(PlotKind::BoxPlots);
                            }
                        }
                        ControlPanelAction::SavePng => self.handle_save_png(),
                        ControlPanelAction::OpenExternal => self.handle_open_external(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Figure Viewer
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(ui);
        });
    }
}
