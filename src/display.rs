//! Presenting a rendered figure: native window, PNG file, or system viewer.

use crate::error::{PlotError, Result};
use image::{ImageFormat, RgbImage};
use std::path::{Path, PathBuf};

/// Where a rendered figure goes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Output {
    /// Native window; blocks until it is closed.
    #[default]
    Window,
    /// Write a PNG file.
    File(PathBuf),
    /// Write a PNG file, then open it with the system default app.
    OpenExternal(PathBuf),
    /// Render only.
    Discard,
}

pub fn present(image: &RgbImage, title: &str, output: &Output) -> Result<()> {
    match output {
        Output::Window => show_window(image, title),
        Output::File(path) => save_png(image, path),
        Output::OpenExternal(path) => {
            save_png(image, path)?;
            open::that(path)?;
            Ok(())
        }
        Output::Discard => Ok(()),
    }
}

pub fn save_png(image: &RgbImage, path: &Path) -> Result<()> {
    image.save_with_format(path, ImageFormat::Png)?;
    tracing::info!("Saved figure to {}", path.display());
    Ok(())
}

/// Convert a rendered bitmap into an egui image.
pub fn color_image(image: &RgbImage) -> egui::ColorImage {
    let size = [image.width() as usize, image.height() as usize];
    egui::ColorImage::from_rgb(size, image.as_raw())
}

fn show_window(image: &RgbImage, title: &str) -> Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([image.width() as f32, image.height() as f32])
            .with_title(title),
        ..Default::default()
    };

    let window = FigureWindow {
        view: FigureView::with_image(color_image(image)),
    };

    tracing::info!("Showing figure '{}'", title);
    eframe::run_native(title, options, Box::new(|_cc| Ok(Box::new(window))))
        .map_err(|e| PlotError::Display(e.to_string()))
}

/// Texture-backed figure display, uploaded lazily on first paint.
#[derive(Default)]
pub struct FigureView {
    pending: Option<egui::ColorImage>,
    texture: Option<egui::TextureHandle>,
}

impl FigureView {
    pub fn with_image(image: egui::ColorImage) -> Self {
        Self {
            pending: Some(image),
            texture: None,
        }
    }

    /// Replace the displayed figure.
    pub fn set_image(&mut self, image: egui::ColorImage) {
        self.pending = Some(image);
    }

    pub fn clear(&mut self) {
        self.pending = None;
        self.texture = None;
    }

    pub fn show(&mut self, ui: &mut egui::Ui) {
        if let Some(image) = self.pending.take() {
            match &mut self.texture {
                Some(texture) => texture.set(image, egui::TextureOptions::LINEAR),
                None => {
                    self.texture =
                        Some(ui.ctx().load_texture("figure", image, egui::TextureOptions::LINEAR));
                }
            }
        }

        match &self.texture {
            Some(texture) => {
                ui.centered_and_justified(|ui| {
                    ui.add(egui::Image::new(texture).shrink_to_fit());
                });
            }
            None => {
                ui.centered_and_justified(|ui| {
                    ui.label(egui::RichText::new("No Figure").size(20.0));
                });
            }
        }
    }
}

struct FigureWindow {
    view: FigureView,
}

impl eframe::App for FigureWindow {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            self.view.show(ui);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_output_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("figure.png");
        let image = RgbImage::from_pixel(4, 3, image::Rgb([135, 206, 235]));

        present(&image, "test", &Output::File(path.clone())).unwrap();

        let loaded = image::open(&path).unwrap().to_rgb8();
        assert_eq!(loaded.dimensions(), (4, 3));
        assert_eq!(loaded.get_pixel(2, 1), &image::Rgb([135, 206, 235]));
    }

    #[test]
    fn discard_writes_nothing() {
        let image = RgbImage::new(2, 2);
        assert!(present(&image, "test", &Output::Discard).is_ok());
    }

    #[test]
    fn color_image_keeps_size() {
        let image = RgbImage::new(5, 7);
        let converted = color_image(&image);
        assert_eq!(converted.size, [5, 7]);
    }
}
