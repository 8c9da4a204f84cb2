#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;

use app::SwatchApp;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1350.0, 700.0])
            .with_min_inner_size([900.0, 500.0])
            .with_drag_and_drop(true)
            .with_title("Dominant Color Extractor"),
        ..Default::default()
    };

    eframe::run_native(
        "Dominant Color Extractor",
        options,
        Box::new(|cc| Ok(Box::new(SwatchApp::new(cc)))),
    )
}
