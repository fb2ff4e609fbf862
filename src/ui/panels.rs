use eframe::egui::{self, Color32, RichText, Ui};

use crate::scene::SceneKind;
use crate::state::AppState;
use crate::ui::table;

// ---------------------------------------------------------------------------
// Left side panel – scene navigation and year filter
// ---------------------------------------------------------------------------

/// Render the left panel: scene text, Prev/Next, year slider, data table.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    let Some(controller) = &state.controller else {
        ui.heading("Scenes");
        ui.separator();
        ui.label("No dataset loaded.");
        return;
    };

    // Copy out what the widgets need so `state` can be mutated below.
    let view = controller.view().clone();
    let range = controller.year_range();
    let mut year = controller.current_year_threshold();
    let prev_enabled = controller.is_prev_enabled();
    let next_enabled = controller.is_next_enabled();

    ui.label(format!(
        "Scene {} of {}",
        controller.current_scene_index() + 1,
        SceneKind::ALL.len()
    ));
    ui.heading(view.meta.title);
    for line in view.meta.description.lines() {
        ui.label(line);
    }
    ui.separator();

    ui.horizontal(|ui: &mut Ui| {
        if ui
            .add_enabled(prev_enabled, egui::Button::new("◀ Previous"))
            .clicked()
        {
            state.prev_scene();
        }
        if ui
            .add_enabled(next_enabled, egui::Button::new("Next ▶"))
            .clicked()
        {
            state.next_scene();
        }
    });

    ui.add_space(4.0);
    ui.strong("Release year up to");
    if ui
        .add(egui::Slider::new(&mut year, range.min..=range.max))
        .changed()
    {
        state.year_changed(year);
    }
    ui.separator();

    table::series_table(ui, &view);
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(c) = &state.controller {
            let range = c.year_range();
            ui.label(format!(
                "{} titles, released {}–{}",
                c.store().len(),
                range.min,
                range.max
            ));
        }

        if state.loading {
            ui.spinner();
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open title catalogue")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.open_path(&path, None, None);
    }
}
