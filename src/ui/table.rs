use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::scene::{SceneKind, SceneView};

fn key_header(scene: SceneKind) -> &'static str {
    match scene {
        SceneKind::Type => "Type",
        SceneKind::Rating => "Rating",
        SceneKind::Season => "Seasons",
    }
}

/// Per-year counts of the current scene, one row per observed value.
pub fn series_table(ui: &mut Ui, view: &SceneView) {
    let entries = view.series.entries();
    if entries.is_empty() {
        ui.label("No titles in range.");
        return;
    }

    TableBuilder::new(ui)
        .id_salt(("series_table", view.scene.index()))
        .striped(true)
        .vscroll(true)
        .column(Column::auto().at_least(48.0))
        .column(Column::remainder())
        .column(Column::auto().at_least(48.0))
        .header(20.0, |mut header| {
            header.col(|ui: &mut Ui| {
                ui.strong("Year");
            });
            header.col(|ui: &mut Ui| {
                ui.strong(key_header(view.scene));
            });
            header.col(|ui: &mut Ui| {
                ui.strong("Count");
            });
        })
        .body(|body| {
            body.rows(18.0, entries.len(), |mut row| {
                let (year, label, count) = &entries[row.index()];
                row.col(|ui: &mut Ui| {
                    ui.label(year.to_string());
                });
                row.col(|ui: &mut Ui| {
                    ui.label(label.as_str());
                });
                row.col(|ui: &mut Ui| {
                    ui.label(count.to_string());
                });
            });
        });
}
