#![warn(clippy::all, rust_2018_idioms)]
// hide console window on Windows in release
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).

    // Optional settings file, e.g. WAVY_PEN_SETTINGS=pen.json
    let settings = std::env::var_os("WAVY_PEN_SETTINGS").and_then(|path| {
        match wavy_pen::PenSettings::load(&path) {
            Ok(settings) => Some(settings),
            Err(err) => {
                log::warn!("Ignoring settings file {}: {err}", path.to_string_lossy());
                None
            }
        }
    });

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([960.0, 640.0])
            .with_min_inner_size([400.0, 300.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Wavy Pen",
        native_options,
        Box::new(|cc| Ok(Box::new(wavy_pen::WavyPenApp::new(cc, settings)))),
    )
}

#[cfg(target_arch = "wasm32")]
fn main() {}
