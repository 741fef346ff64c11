use eframe::egui::{self, Color32, RichText, Ui};

use crate::advisory::{Advisory, Severity};
use crate::remote::ROW_LIMIT_RANGE;
use crate::state::AppState;
use crate::ui::table::remote_table;

/// Colour a notice by severity.
pub fn advisory_label(ui: &mut Ui, advisory: &Advisory) {
    let color = match advisory.severity {
        Severity::Success => Color32::from_rgb(60, 170, 90),
        Severity::Info => Color32::from_rgb(80, 150, 220),
        Severity::Warning => ui.visuals().warn_fg_color,
        Severity::Error => ui.visuals().error_fg_color,
    };
    ui.label(RichText::new(advisory.to_string()).color(color));
}

// ---------------------------------------------------------------------------
// Feedback box
// ---------------------------------------------------------------------------

pub fn feedback_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Opinion / feedback");
    ui.label("Write your comments about the application here");
    ui.add(
        egui::TextEdit::multiline(&mut state.feedback_text)
            .desired_rows(4)
            .desired_width(f32::INFINITY),
    );
    if ui.button("Send feedback").clicked() {
        state.submit_feedback();
    }
    if let Some(advisory) = &state.feedback_advisory {
        advisory_label(ui, advisory);
    }
}

// ---------------------------------------------------------------------------
// Datastore query panel
// ---------------------------------------------------------------------------

pub fn query_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Query data from the datos.gob.cl API");

    ui.horizontal(|ui: &mut Ui| {
        ui.label("Resource ID");
        ui.add(egui::TextEdit::singleline(&mut state.resource_id).desired_width(320.0));
    });
    ui.horizontal(|ui: &mut Ui| {
        ui.label("Rows to download");
        ui.add(egui::DragValue::new(&mut state.row_limit).range(ROW_LIMIT_RANGE));
    });

    if ui.button("Query API").clicked() {
        state.submit_query();
    }

    let Some(outcome) = &state.query_outcome else {
        return;
    };
    advisory_label(ui, &outcome.advisory);

    match &outcome.table {
        Some(table) if !table.is_empty() => {
            ui.label(RichText::new(format!("Total rows received: {}", table.len())).strong());
            remote_table(ui, table);
        }
        _ => advisory_label(ui, &Advisory::warning("The API returned no records to display.")),
    }
}
