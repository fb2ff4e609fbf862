use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, plot::PlotRenderer};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct TitleScenesApp {
    pub state: AppState,
}

impl eframe::App for TitleScenesApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: scene navigation + year slider ----
        egui::SidePanel::left("scene_panel")
            .default_width(280.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: chart ----
        egui::CentralPanel::default().show(ctx, |ui| match &self.state.controller {
            Some(controller) => controller.present(&mut PlotRenderer::new(ui)),
            None => {
                ui.centered_and_justified(|ui| {
                    ui.heading("Open a title catalogue to begin  (File → Open…)");
                });
            }
        });
    }
}
