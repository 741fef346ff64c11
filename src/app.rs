use eframe::egui;

use crate::state::AppState;
use crate::ui::{forms, panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct HealthAtlasApp {
    pub state: AppState,
}

impl HealthAtlasApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for HealthAtlasApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: title and counts ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: summary, map, chart, table, forms ----
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    let view = self.state.view();

                    panels::usage_help(ui);
                    ui.add_space(8.0);
                    panels::metrics_row(ui, &view, &self.state.sector_palette);
                    ui.add_space(8.0);

                    ui.columns(2, |cols| {
                        plot::facility_map(&mut cols[0], &view, &self.state.sector_palette);
                        plot::top_communes_chart(&mut cols[1], &view, self.state.config.top_communes);
                    });

                    ui.add_space(8.0);
                    table::facility_table(ui, &view, self.state.dataset.has_phone_column);

                    ui.separator();
                    forms::feedback_panel(ui, &mut self.state);
                    ui.separator();
                    forms::query_panel(ui, &mut self.state);
                });
        });
    }
}
