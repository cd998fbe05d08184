//! distplot - Histogram & Box Plot Viewer
//!
//! A desktop front end for plotting the numeric columns of a CSV file.

mod gui;

use distplot::PlotConfig;
use eframe::egui;
use gui::DistPlotApp;
use std::path::Path;

/// Optional settings file read from the working directory.
const CONFIG_FILE: &str = "distplot.json";

fn load_config() -> PlotConfig {
    if !Path::new(CONFIG_FILE).exists() {
        return PlotConfig::default();
    }
    match PlotConfig::from_json_file(CONFIG_FILE) {
        Ok(config) => {
            tracing::info!("Using settings from {}", CONFIG_FILE);
            config
        }
        Err(e) => {
            tracing::warn!("Ignoring {}: {}", CONFIG_FILE, e);
            PlotConfig::default()
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let config = load_config();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1500.0, 900.0])
            .with_min_inner_size([1100.0, 700.0])
            .with_title("distplot"),
        ..Default::default()
    };

    eframe::run_native(
        "distplot",
        options,
        Box::new(|cc| Ok(Box::new(DistPlotApp::new(cc, config)))),
    )
    .map_err(|e| anyhow::anyhow!("{}", e))
}
