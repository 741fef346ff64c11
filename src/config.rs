use std::path::PathBuf;
use std::time::Duration;

// ---------------------------------------------------------------------------
// Dashboard configuration
// ---------------------------------------------------------------------------

/// Every tunable the dashboard uses, gathered in one place.
///
/// There are no CLI flags or environment overrides; `Default` is the
/// production configuration and tests build their own.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Semicolon-delimited facility file loaded at startup.
    pub data_path: PathBuf,
    /// Rows whose region contains this substring are kept.
    pub region_marker: String,
    /// Base URL of the CKAN datastore (`<base>/api/3/action/datastore_search`).
    pub api_base_url: String,
    /// Timeout for the single remote request.
    pub request_timeout: Duration,
    pub default_resource_id: String,
    pub default_row_limit: u32,
    /// How many communes the bar chart shows.
    pub top_communes: usize,
    pub window_size: [f32; 2],
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("establecimientos_20251014.csv"),
            region_marker: "Metropolitana".to_string(),
            api_base_url: "https://datos.gob.cl".to_string(),
            request_timeout: Duration::from_secs(10),
            default_resource_id: "2c44d782-3365-44e3-aefb-2c8b8363a1bc".to_string(),
            default_row_limit: 30,
            top_communes: 5,
            window_size: [1400.0, 900.0],
        }
    }
}
