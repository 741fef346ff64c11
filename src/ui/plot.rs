use eframe::egui::{RichText, Ui};
use egui_plot::{Bar, BarChart, Legend, Plot, PlotPoints, Points};

use crate::color::{generate_palette, SectorPalette};
use crate::data::model::{Facility, Sector};
use crate::data::summary::{map_points, top_communes};

const PANEL_HEIGHT: f32 = 360.0;

// ---------------------------------------------------------------------------
// Facility map (lon/lat scatter coloured by sector)
// ---------------------------------------------------------------------------

pub fn facility_map(ui: &mut Ui, view: &[&Facility], palette: &SectorPalette) {
    ui.heading("Map of health facilities");

    let points = map_points(view);
    if points.is_empty() {
        ui.label(
            RichText::new("No facilities with coordinates for the selected filters.")
                .color(ui.visuals().warn_fg_color),
        );
        return;
    }

    Plot::new("facility_map")
        .legend(Legend::default())
        .height(PANEL_HEIGHT)
        .data_aspect(1.0)
        .x_axis_label("Longitude")
        .y_axis_label("Latitude")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            // One series per sector so the legend doubles as a key.
            for sector in Sector::ALL {
                let series: PlotPoints = points
                    .iter()
                    .filter(|(_, _, s)| *s == sector)
                    .map(|&(lon, lat, _)| [lon, lat])
                    .collect();
                if series.points().is_empty() {
                    continue;
                }
                plot_ui.points(
                    Points::new(series)
                        .name(sector.label())
                        .color(palette.color_for(sector))
                        .radius(3.0),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Busiest communes bar chart
// ---------------------------------------------------------------------------

pub fn top_communes_chart(ui: &mut Ui, view: &[&Facility], n: usize) {
    ui.heading(format!("Top {n} communes by number of facilities"));

    let ranked = top_communes(view, n);
    if ranked.is_empty() {
        ui.label("No matching facilities.");
        return;
    }

    let colors = generate_palette(ranked.len());
    Plot::new("top_communes")
        .legend(Legend::default())
        .height(PANEL_HEIGHT)
        .y_axis_label("Facilities")
        .show_x(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show(ui, |plot_ui| {
            for (i, ((commune, count), color)) in ranked.iter().zip(colors).enumerate() {
                let bar = Bar::new(i as f64, *count as f64)
                    .name(commune)
                    .fill(color)
                    .width(0.7);
                plot_ui.bar_chart(BarChart::new(vec![bar]).name(commune).color(color));
            }
        });
}
