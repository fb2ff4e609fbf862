use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::aggregate::SeriesLine;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: series label → Color32
// ---------------------------------------------------------------------------

/// Assigns each line of a scene its own colour.
///
/// Labels are sorted before hues are handed out, so the colour of a line does
/// not depend on the order its key was first seen in.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl ColorMap {
    pub fn for_lines(lines: &[SeriesLine]) -> Self {
        let mut labels: Vec<&str> = lines.iter().map(|l| l.label.as_str()).collect();
        labels.sort_unstable();
        labels.dedup();

        let palette = generate_palette(labels.len());
        let mapping = labels
            .into_iter()
            .zip(palette)
            .map(|(label, c)| (label.to_string(), c))
            .collect();

        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    pub fn color_for(&self, label: &str) -> Color32 {
        self.mapping
            .get(label)
            .copied()
            .unwrap_or(self.default_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(label: &str) -> SeriesLine {
        SeriesLine {
            label: label.to_string(),
            points: Vec::new(),
        }
    }

    #[test]
    fn palette_has_requested_size() {
        assert!(generate_palette(0).is_empty());
        let p = generate_palette(5);
        assert_eq!(p.len(), 5);
        assert_ne!(p[0], p[1]);
    }

    #[test]
    fn colours_do_not_depend_on_line_order() {
        let a = ColorMap::for_lines(&[line("R"), line("PG"), line("TV-MA")]);
        let b = ColorMap::for_lines(&[line("TV-MA"), line("R"), line("PG")]);
        for label in ["R", "PG", "TV-MA"] {
            assert_eq!(a.color_for(label), b.color_for(label));
        }
        assert_eq!(a.color_for("G"), Color32::GRAY);
    }
}
