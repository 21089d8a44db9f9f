mod app;
mod color;
mod data;
mod sketch;
mod state;
mod ui;

use app::PawcastApp;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 700.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Pawcast – Draw Your Forecast",
        options,
        Box::new(|_cc| Ok(Box::new(PawcastApp::default()))),
    )
}
