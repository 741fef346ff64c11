use eframe::egui::{self, Align, Layout, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::Facility;
use crate::remote::RemoteTable;

const ROW_HEIGHT: f32 = 18.0;
const HEADER_HEIGHT: f32 = 22.0;

// ---------------------------------------------------------------------------
// Facility detail table
// ---------------------------------------------------------------------------

/// The filtered facilities, one row each, in the current sort order.
pub fn facility_table(ui: &mut Ui, view: &[&Facility], with_phone: bool) {
    ui.heading("Facilities (detail)");

    if view.is_empty() {
        ui.label("No facilities match the selected filters.");
        return;
    }

    let mut headers = vec!["Name", "Type", "Commune", "Address", "Sector", "Care level"];
    if with_phone {
        headers.push("Phone");
    }

    ui.push_id("facility_table", |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .cell_layout(Layout::left_to_right(Align::Center))
            .columns(Column::auto().at_least(80.0).clip(true), headers.len())
            .min_scrolled_height(0.0)
            .max_scroll_height(400.0)
            .header(HEADER_HEIGHT, |mut header| {
                for h in &headers {
                    header.col(|ui| {
                        ui.strong(*h);
                    });
                }
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, view.len(), |mut row| {
                    let f = view[row.index()];
                    let text = |v: &Option<String>| v.clone().unwrap_or_default();

                    row.col(|ui| {
                        ui.label(text(&f.name)).on_hover_text(format!(
                            "{}\n{}",
                            f.region,
                            text(&f.dependency)
                        ));
                    });
                    row.col(|ui| {
                        ui.label(text(&f.kind));
                    });
                    row.col(|ui| {
                        ui.label(text(&f.commune));
                    });
                    row.col(|ui| {
                        ui.label(&f.address);
                    });
                    row.col(|ui| {
                        ui.label(f.sector.label());
                    });
                    row.col(|ui| {
                        ui.label(text(&f.care_level));
                    });
                    if with_phone {
                        row.col(|ui| {
                            ui.label(text(&f.phone));
                        });
                    }
                });
            });
    });
}

// ---------------------------------------------------------------------------
// Remote records table
// ---------------------------------------------------------------------------

/// Datastore records as returned, columns in API order.
pub fn remote_table(ui: &mut Ui, table: &RemoteTable) {
    ui.push_id("remote_table", |ui: &mut Ui| {
        egui::ScrollArea::horizontal().show(ui, |ui: &mut Ui| {
            TableBuilder::new(ui)
                .striped(true)
                .resizable(true)
                .cell_layout(Layout::left_to_right(Align::Center))
                .columns(Column::auto().at_least(60.0).clip(true), table.columns.len())
                .min_scrolled_height(0.0)
                .max_scroll_height(400.0)
                .header(HEADER_HEIGHT, |mut header| {
                    for column in &table.columns {
                        header.col(|ui| {
                            ui.strong(column);
                        });
                    }
                })
                .body(|body| {
                    body.rows(ROW_HEIGHT, table.len(), |mut row| {
                        let i = row.index();
                        for column in &table.columns {
                            row.col(|ui| {
                                ui.label(table.cell(i, column));
                            });
                        }
                    });
                });
        });
    });
}
