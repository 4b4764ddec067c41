#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]
use eframe::NativeOptions;

mod app;
mod color_match;
mod image_io;
mod palette;

/// Program entry: eframe/egui desktop app.
fn main() -> eframe::Result<()> {
    env_logger::init();
    let native_options = NativeOptions::default();
    eframe::run_native(
        "Color Detect",
        native_options,
        Box::new(|cc| Box::new(app::PickerApp::new(cc))),
    )
}
