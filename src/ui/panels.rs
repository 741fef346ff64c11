use std::collections::BTreeSet;
use std::fmt::Display;
use std::sync::Arc;

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::color::SectorPalette;
use crate::data::filter::{SortDirection, SortKey};
use crate::data::model::{Facility, Sector};
use crate::data::summary::Metrics;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    // The option lists come from the dataset; keep our own handle so the
    // selection can be mutated while they are borrowed.
    let dataset = Arc::clone(&state.dataset);
    let mut changed = false;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.strong("Search by name");
            changed |= ui
                .text_edit_singleline(&mut state.selection.name_query)
                .changed();
            ui.separator();

            // ---- Categorical filters (collapsible) ----
            changed |= multi_select(
                ui,
                "Commune",
                &dataset.communes,
                &mut state.selection.communes,
                |_| None,
            );
            changed |= multi_select(
                ui,
                "Facility type",
                &dataset.kinds,
                &mut state.selection.kinds,
                |_| None,
            );
            let palette = &state.sector_palette;
            changed |= multi_select(
                ui,
                "Sector (Public / Private / Other)",
                &dataset.sectors,
                &mut state.selection.sectors,
                |s| Some(palette.color_for(*s)),
            );
            changed |= multi_select(
                ui,
                "Care level",
                &dataset.care_levels,
                &mut state.selection.care_levels,
                |_| None,
            );
            ui.separator();

            // ---- Ordering ----
            ui.strong("Sort by");
            let current_key = state.selection.sort_key;
            egui::ComboBox::from_id_salt("sort_key")
                .selected_text(current_key.label())
                .show_ui(ui, |ui: &mut Ui| {
                    for key in SortKey::ALL {
                        changed |= ui
                            .selectable_value(&mut state.selection.sort_key, key, key.label())
                            .changed();
                    }
                });

            ui.horizontal(|ui: &mut Ui| {
                for direction in [SortDirection::Ascending, SortDirection::Descending] {
                    changed |= ui
                        .radio_value(&mut state.selection.sort_direction, direction, direction.label())
                        .changed();
                }
            });
        });

    if changed {
        state.refilter();
    }
}

/// Collapsible checkbox list with All / None shortcuts. Returns whether the
/// selection changed this frame.
fn multi_select<T: Ord + Clone + Display>(
    ui: &mut Ui,
    title: &str,
    all_values: &BTreeSet<T>,
    selected: &mut BTreeSet<T>,
    color_of: impl Fn(&T) -> Option<Color32>,
) -> bool {
    let mut changed = false;
    let header_text = format!("{title}  ({}/{})", selected.len(), all_values.len());

    egui::CollapsingHeader::new(RichText::new(header_text).strong())
        .id_salt(title)
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    selected.clone_from(all_values);
                    changed = true;
                }
                if ui.small_button("None").clicked() {
                    selected.clear();
                    changed = true;
                }
            });

            for val in all_values {
                let mut text = RichText::new(val.to_string());
                if let Some(c) = color_of(val) {
                    text = text.color(c);
                }

                let mut checked = selected.contains(val);
                if ui.checkbox(&mut checked, text).changed() {
                    if checked {
                        selected.insert(val.clone());
                    } else {
                        selected.remove(val);
                    }
                    changed = true;
                }
            }
        });

    changed
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the title bar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.heading("Health Facilities — Región Metropolitana");
        ui.separator();
        ui.label(format!(
            "{} facilities loaded, {} visible",
            state.dataset.len(),
            state.visible_indices.len()
        ));
        ui.separator();
        if ui.button("Reset filters").clicked() {
            state.reset_filters();
        }
    });
}

// ---------------------------------------------------------------------------
// Central panel header
// ---------------------------------------------------------------------------

pub fn usage_help(ui: &mut Ui) {
    egui::CollapsingHeader::new(RichText::new("How to use this page").strong())
        .default_open(true)
        .show(ui, |ui: &mut Ui| {
            ui.label("1. In the left panel, pick the commune where you want to find a facility.");
            ui.label("2. Narrow by facility type (clinic, hospital, CESFAM, SAPU, …).");
            ui.label("3. Choose public, private or other facilities, and the care level.");
            ui.label("4. The map shows the matching facilities; the chart shows the busiest communes.");
            ui.label("5. The table below lists name, commune, address and phone.");
            ui.label("6. To see everything again, press \"Reset filters\" in the top bar.");
        });
}

/// Total / public / private counts for the filtered view.
pub fn metrics_row(ui: &mut Ui, view: &[&Facility], palette: &SectorPalette) {
    ui.strong("Summary (filtered data)");
    let metrics = Metrics::of(view);
    let neutral = ui.visuals().strong_text_color();
    ui.horizontal(|ui: &mut Ui| {
        metric(ui, "Total facilities", metrics.total, neutral);
        metric(ui, "Public", metrics.public, palette.color_for(Sector::Public));
        metric(ui, "Private", metrics.private, palette.color_for(Sector::Private));
    });
}

fn metric(ui: &mut Ui, label: &str, value: usize, color: Color32) {
    ui.group(|ui: &mut Ui| {
        ui.vertical(|ui: &mut Ui| {
            ui.label(label);
            ui.heading(RichText::new(value.to_string()).color(color));
        });
    });
}
