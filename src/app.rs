//! The egui application shell.
//!
//! Owns all UI state (current image path, extracted colors, preview texture,
//! the color-count field) and wires user events to the library. All work runs
//! synchronously inside the event that triggered it; a failure surfaces a
//! dialog and leaves the previous state untouched.

use std::path::PathBuf;

use eframe::egui::{self, Color32, ColorImage, Sense, TextureHandle, TextureOptions};
use log::{info, warn};

use swatchsheet::{palette, sheet, Swatch};

const DROP_WIDTH: f32 = 600.0;
const DROP_HEIGHT: f32 = 300.0;
const SWATCH_COLUMNS: usize = 10;

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "gif"];

pub struct SwatchApp {
    image_path: Option<PathBuf>,
    colors: Vec<Swatch>,
    preview: Option<TextureHandle>,
    count_text: String,
}

impl SwatchApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        Self {
            image_path: None,
            colors: Vec::new(),
            preview: None,
            count_text: "10".to_owned(),
        }
    }

    /// Decode `path`, extract colors with the current count, and replace the
    /// whole state. Any failure reports a dialog and changes nothing.
    fn load_image(&mut self, ctx: &egui::Context, path: PathBuf) {
        let count = match palette::parse_color_count(&self.count_text) {
            Ok(count) => count,
            Err(err) => {
                warning_dialog(&err.to_string());
                return;
            }
        };
        let image = match image::open(&path) {
            Ok(image) => image,
            Err(err) => {
                error_dialog(&format!("Failed to load image: {err}"));
                return;
            }
        };
        let mut colors = match palette::dominant_colors(&image, count) {
            Ok(colors) => colors,
            Err(err) => {
                error_dialog(&format!("Failed to extract colors: {err}"));
                return;
            }
        };
        palette::sort_by_rgb(&mut colors);

        info!("loaded {} ({} colors)", path.display(), colors.len());
        self.preview = Some(upload_thumbnail(ctx, &image));
        self.image_path = Some(path);
        self.colors = colors;
    }

    fn browse(&mut self, ctx: &egui::Context) {
        let picked = rfd::FileDialog::new()
            .add_filter("Image Files", IMAGE_EXTENSIONS)
            .pick_file();
        if let Some(path) = picked {
            self.load_image(ctx, path);
        }
    }

    /// Re-extract from the current image with the count field as it stands.
    fn refresh(&mut self, ctx: &egui::Context) {
        match self.image_path.clone() {
            Some(path) => self.load_image(ctx, path),
            None => warning_dialog("Please load an image first."),
        }
    }

    fn save_colors(&self) {
        if self.colors.is_empty() {
            warning_dialog("No colors to save.");
            return;
        }

        let mut dialog = rfd::FileDialog::new()
            .add_filter("PNG files", &["png"])
            .set_file_name("colors.png");
        if let Some(downloads) = dirs::download_dir() {
            dialog = dialog.set_directory(downloads);
        }
        let Some(path) = dialog.save_file() else {
            return;
        };

        match sheet::save(&self.colors, &path) {
            Ok(()) => info_dialog(&format!("Colors saved to {}", path.display())),
            Err(err) => error_dialog(&format!("Failed to save colors: {err}")),
        }
    }

    /// The 600×300 preview area: shows the thumbnail once an image is loaded,
    /// a prompt before that, and opens the file dialog on click.
    fn drop_area(&mut self, ui: &mut egui::Ui) {
        let size = egui::Vec2::new(DROP_WIDTH, DROP_HEIGHT);
        let (rect, response) = ui.allocate_exact_size(size, Sense::click());

        ui.painter().rect_filled(rect, 4.0, Color32::from_gray(220));
        match &self.preview {
            Some(texture) => {
                let fitted = fit_size(texture.size_vec2(), rect.size());
                let image_rect = egui::Rect::from_center_size(rect.center(), fitted);
                let uv = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0));
                ui.painter()
                    .image(texture.id(), image_rect, uv, Color32::WHITE);
            }
            None => {
                ui.painter().text(
                    rect.center(),
                    egui::Align2::CENTER_CENTER,
                    "Drop an image here, or click to browse",
                    egui::FontId::proportional(16.0),
                    Color32::DARK_GRAY,
                );
            }
        }

        if response.clicked() {
            self.browse(ui.ctx());
        }
    }

    fn swatch_grid(&self, ui: &mut egui::Ui) {
        for row in self.colors.chunks(SWATCH_COLUMNS) {
            ui.horizontal(|ui| {
                for swatch in row {
                    ui.vertical(|ui| {
                        let (rect, _) =
                            ui.allocate_exact_size(egui::Vec2::new(76.0, 40.0), Sense::hover());
                        let color =
                            Color32::from_rgb(swatch.color[0], swatch.color[1], swatch.color[2]);
                        ui.painter().rect_filled(rect, 2.0, color);
                        ui.monospace(swatch.hex());
                    });
                }
            });
        }
    }
}

impl eframe::App for SwatchApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Some(file) = ctx.input(|i| i.raw.dropped_files.first().cloned()) {
            if let Some(path) = dropped_path(&file) {
                self.load_image(ctx, path);
            }
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                self.drop_area(ui);
                ui.add_space(10.0);
                ui.horizontal(|ui| {
                    ui.label("Colors shown:");
                    ui.add(egui::TextEdit::singleline(&mut self.count_text).desired_width(48.0));
                    if ui.button("Refresh").clicked() {
                        self.refresh(ctx);
                    }
                    if ui.button("Save as PNG…").clicked() {
                        self.save_colors();
                    }
                });
            });
            ui.add_space(10.0);
            egui::ScrollArea::vertical().show(ui, |ui| self.swatch_grid(ui));
        });
    }
}

/// Resolve a dropped file to a path. Text drops arrive as the file name,
/// which some window systems wrap in brace delimiters.
fn dropped_path(file: &egui::DroppedFile) -> Option<PathBuf> {
    if let Some(path) = &file.path {
        return Some(path.clone());
    }
    let name = strip_braces(&file.name);
    (!name.is_empty()).then(|| PathBuf::from(name))
}

fn strip_braces(raw: &str) -> &str {
    raw.trim().trim_start_matches('{').trim_end_matches('}')
}

fn upload_thumbnail(ctx: &egui::Context, image: &image::DynamicImage) -> TextureHandle {
    let thumbnail = image
        .thumbnail(DROP_WIDTH as u32, DROP_HEIGHT as u32)
        .to_rgba8();
    let size = [thumbnail.width() as usize, thumbnail.height() as usize];
    let pixels = ColorImage::from_rgba_unmultiplied(size, thumbnail.as_raw());
    ctx.load_texture("preview", pixels, TextureOptions::LINEAR)
}

/// Scale `size` down (never up) to fit within `bounds`, preserving aspect.
fn fit_size(size: egui::Vec2, bounds: egui::Vec2) -> egui::Vec2 {
    let scale = (bounds.x / size.x).min(bounds.y / size.y).min(1.0);
    size * scale
}

fn error_dialog(message: &str) {
    warn!("{message}");
    rfd::MessageDialog::new()
        .set_level(rfd::MessageLevel::Error)
        .set_title("Error")
        .set_description(message)
        .show();
}

fn warning_dialog(message: &str) {
    warn!("{message}");
    rfd::MessageDialog::new()
        .set_level(rfd::MessageLevel::Warning)
        .set_title("Warning")
        .set_description(message)
        .show();
}

fn info_dialog(message: &str) {
    rfd::MessageDialog::new()
        .set_level(rfd::MessageLevel::Info)
        .set_title("Success")
        .set_description(message)
        .show();
}
