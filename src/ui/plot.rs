use eframe::egui::{Align2, Ui};
use egui_plot::{Legend, Line, Plot, PlotPoint, PlotPoints, Points, Text};

use crate::color::ColorMap;
use crate::scene::{Renderer, SceneKind, SceneMeta, SceneView};

// ---------------------------------------------------------------------------
// Scene chart (central panel)
// ---------------------------------------------------------------------------

/// Draws the current scene as a line chart into the central panel.
pub struct PlotRenderer<'a> {
    ui: &'a mut Ui,
}

impl<'a> PlotRenderer<'a> {
    pub fn new(ui: &'a mut Ui) -> Self {
        Self { ui }
    }
}

impl Renderer for PlotRenderer<'_> {
    fn render(&mut self, view: &SceneView) {
        let Some(domains) = view.domains else {
            self.ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading(format!(
                    "No titles for this scene released up to {}",
                    view.year_threshold
                ));
            });
            return;
        };

        let lines = view.series.lines();
        let entries = view.series.entries();
        let annotations = view.series.annotations();
        let colors = ColorMap::for_lines(&lines);
        let meta = view.meta;

        // A fresh id per threshold drops any pan/zoom so the bounds follow the slider.
        Plot::new(plot_id_salt(view.scene, view.year_threshold))
            .legend(Legend::default())
            .x_axis_label("Release Year")
            .y_axis_label(view.meta.y_axis_label)
            .x_axis_formatter(|mark, _range| format!("{:.0}", mark.value))
            .label_formatter(move |name, value| hover_label(&meta, name, value))
            .include_x(domains.x.0 as f64)
            .include_x(domains.x.1 as f64)
            .include_y(domains.y.0 as f64)
            .include_y(domains.y.1 as f64)
            .allow_boxed_zoom(true)
            .allow_drag(true)
            .allow_scroll(true)
            .allow_zoom(true)
            .show(self.ui, |plot_ui| {
                for line in &lines {
                    let color = colors.color_for(&line.label);

                    let path: PlotPoints = line
                        .points
                        .iter()
                        .map(|&(year, count)| [year as f64, count as f64])
                        .collect();
                    plot_ui.line(Line::new(path).name(&line.label).color(color).width(1.5));

                    // Markers only where a value was observed.
                    let observed: PlotPoints = entries
                        .iter()
                        .filter(|(_, label, _)| *label == line.label)
                        .map(|&(year, _, count)| [year as f64, count as f64])
                        .collect();
                    plot_ui.points(
                        Points::new(observed)
                            .name(&line.label)
                            .color(color)
                            .radius(3.0),
                    );
                }

                for note in &annotations {
                    plot_ui.text(
                        Text::new(
                            PlotPoint::new(note.year as f64, note.count as f64),
                            note.label.as_str(),
                        )
                        .color(colors.color_for(&note.label))
                        .anchor(Align2::RIGHT_BOTTOM),
                    );
                }
            });
    }
}

fn plot_id_salt(scene: SceneKind, year_threshold: i32) -> (&'static str, usize, i32) {
    ("scene_plot", scene.index(), year_threshold)
}

/// Hover text for a point; `name` is the line name, empty off-line.
fn hover_label(meta: &SceneMeta, name: &str, value: &PlotPoint) -> String {
    let point = format!("Release Year: {:.0}\nCount: {:.0}", value.x, value.y);
    match (name.is_empty(), meta.key_label) {
        (true, _) => point,
        (false, Some(key)) => format!("{key}: {name}\n{point}"),
        (false, None) => format!("{name}\n{point}"),
    }
}
