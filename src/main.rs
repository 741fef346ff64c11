mod advisory;
mod app;
mod cache;
mod color;
mod config;
mod data;
mod feedback;
mod remote;
mod state;
mod ui;

use anyhow::anyhow;
use app::HealthAtlasApp;
use config::DashboardConfig;
use data::loader::DatasetCache;
use eframe::egui;
use state::AppState;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = DashboardConfig::default();

    // A missing or unreadable dataset is fatal: nothing to show without it.
    let dataset_cache = DatasetCache::new();
    let state = AppState::new(config.clone(), &dataset_cache)?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Health Atlas – Región Metropolitana",
        options,
        Box::new(|_cc| Ok(Box::new(HealthAtlasApp::new(state)))),
    )
    .map_err(|e| anyhow!("running the dashboard window: {e}"))
}
