mod app;
mod color;
mod data;
mod state;
mod ui;

use std::path::Path;

use app::TitanicDashApp;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([700.0, 450.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Titanic Survival Dashboard",
        options,
        Box::new(|_cc| {
            let mut app = TitanicDashApp::default();

            // Convenience: pick up titanic.csv from the working directory,
            // or a path given on the command line.
            let path = std::env::args().nth(1).unwrap_or_else(|| "titanic.csv".to_string());
            if Path::new(&path).exists() {
                match data::loader::load_file(Path::new(&path)) {
                    Ok(dataset) => {
                        log::info!("Loaded {} passengers from {path}", dataset.len());
                        app.state.set_dataset(dataset);
                    }
                    Err(e) => {
                        log::error!("Failed to load {path}: {e:#}");
                        app.state.status_message = Some(format!("Error: {e:#}"));
                    }
                }
            }

            Ok(Box::new(app))
        }),
    )
}
