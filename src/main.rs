mod app;
mod color;
mod config;
mod data;
mod error;
mod session;
mod state;
mod ui;

use app::RustyReportApp;
use config::Settings;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();

    let settings = Settings::load();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 760.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Rusty Report – Data Analyzer",
        options,
        Box::new(|_cc| Ok(Box::new(RustyReportApp::new(settings)))),
    )
}
