use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::Sector;

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
// Sector colours: map markers, legend and metric labels
// ---------------------------------------------------------------------------

/// Fixed sector → colour assignment so a sector keeps its colour no matter
/// which sectors the current filter shows.
#[derive(Debug, Clone)]
pub struct SectorPalette {
    mapping: BTreeMap<Sector, Color32>,
}

impl Default for SectorPalette {
    fn default() -> Self {
        let mapping = Sector::ALL
            .into_iter()
            .zip(generate_palette(Sector::ALL.len()))
            .collect();
        SectorPalette { mapping }
    }
}

impl SectorPalette {
    pub fn color_for(&self, sector: Sector) -> Color32 {
        self.mapping.get(&sector).copied().unwrap_or(Color32::GRAY)
    }
}
