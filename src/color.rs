use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

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
            let hsl = Hsl::new(hue, 0.70, 0.45);
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
// Color mapping: animal class → Color32
// ---------------------------------------------------------------------------

/// Assigns each animal class a stable colour for its recorded line.
#[derive(Debug, Clone, Default)]
pub struct ClassColors {
    mapping: BTreeMap<String, Color32>,
}

impl ClassColors {
    /// Build the map from the dataset's sorted class list.
    pub fn new(classes: &[String]) -> Self {
        let palette = generate_palette(classes.len());
        let mapping = classes
            .iter()
            .cloned()
            .zip(palette.into_iter())
            .collect();
        ClassColors { mapping }
    }

    /// Look up the colour for a class.
    pub fn color_for(&self, class: &str) -> Color32 {
        self.mapping
            .get(class)
            .copied()
            .unwrap_or(Color32::LIGHT_BLUE)
    }
}

// ---------------------------------------------------------------------------
