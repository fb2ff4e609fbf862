mod app;
mod cli;
mod color;
mod data;
mod scene;
mod state;
mod ui;

use app::TitleScenesApp;
use clap::Parser;
use cli::Args;
use eframe::egui;

fn main() -> eframe::Result {
    env_logger::init();
    let args = Args::parse();

    let mut app = TitleScenesApp::default();
    if let Some(path) = &args.data {
        app.state.open_path(path, args.scene, args.year);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Title Scenes – Catalogue Explorer",
        options,
        Box::new(|_cc| Ok(Box::new(app))),
    )
}
