use std::sync::Arc;

use anyhow::{Context, Result};

use crate::advisory::Advisory;
use crate::cache::MemoCache;
use crate::color::SectorPalette;
use crate::config::DashboardConfig;
use crate::data::filter::{filtered_indices, FilterSelection};
use crate::data::loader::{load_cached, DatasetCache};
use crate::data::model::{Facility, FacilityDataset};
use crate::feedback::submit_feedback;
use crate::remote::{clamp_row_limit, run_query, DatastoreClient, QueryCache, QueryOutcome};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashboardConfig,

    /// Loaded dataset, shared with the load cache.
    pub dataset: Arc<FacilityDataset>,

    /// Current sidebar selection.
    pub selection: FilterSelection,

    /// Indices of facilities passing the current filters, in display order.
    pub visible_indices: Vec<usize>,

    pub sector_palette: SectorPalette,

    // ---- Feedback box ----
    pub feedback_text: String,
    pub feedback_advisory: Option<Advisory>,

    // ---- Remote query panel ----
    pub resource_id: String,
    pub row_limit: u32,
    pub query_outcome: Option<Arc<QueryOutcome>>,

    query_cache: QueryCache,
    client: DatastoreClient,
}

impl AppState {
    /// Load the configured dataset through `dataset_cache` and build the
    /// initial state.
    ///
    /// Fails when the dataset cannot be read; there is no partial fallback.
    pub fn new(config: DashboardConfig, dataset_cache: &DatasetCache) -> Result<Self> {
        let dataset = load_cached(dataset_cache, &config.data_path, &config.region_marker)
            .inspect_err(|e| log::error!("Failed to load dataset: {e:#}"))?;

        let client = DatastoreClient::new(&config.api_base_url, config.request_timeout)
            .context("building datastore client")?;

        let selection = FilterSelection::all(&dataset);
        let visible_indices = filtered_indices(&dataset, &selection);

        Ok(Self {
            resource_id: config.default_resource_id.clone(),
            row_limit: clamp_row_limit(i64::from(config.default_row_limit)),
            config,
            dataset,
            selection,
            visible_indices,
            sector_palette: SectorPalette::default(),
            feedback_text: String::new(),
            feedback_advisory: None,
            query_outcome: None,
            query_cache: MemoCache::new(),
            client,
        })
    }

    /// Recompute `visible_indices` after a selection change.
    pub fn refilter(&mut self) {
        self.visible_indices = filtered_indices(&self.dataset, &self.selection);
    }

    /// Back to "everything selected", keeping the sort order.
    pub fn reset_filters(&mut self) {
        let sort_key = self.selection.sort_key;
        let sort_direction = self.selection.sort_direction;
        self.selection = FilterSelection {
            sort_key,
            sort_direction,
            ..FilterSelection::all(&self.dataset)
        };
        self.refilter();
    }

    /// The filtered facilities in display order.
    pub fn view(&self) -> Vec<&Facility> {
        self.visible_indices
            .iter()
            .map(|&i| &self.dataset.facilities[i])
            .collect()
    }

    pub fn submit_feedback(&mut self) {
        self.feedback_advisory = Some(submit_feedback(&self.feedback_text));
    }

    /// Run the remote query for the current form values. Blocks until the
    /// request completes or times out.
    pub fn submit_query(&mut self) {
        self.row_limit = clamp_row_limit(i64::from(self.row_limit));
        let outcome = run_query(&self.query_cache, &self.client, &self.resource_id, self.row_limit);
        self.query_outcome = Some(outcome);
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::io::Write;

    use super::*;
    use crate::advisory::Severity;

    const CSV: &str = "RegionGlosa;ComunaGlosa;EstablecimientoGlosa;TipoEstablecimientoGlosa;\
DependenciaAdministrativa;NivelAtencionEstabglosa;TipoViaGlosa;NombreVia;Numero;Latitud;Longitud
Metropolitana de Santiago;Maipú;Beta;CESFAM;Municipal;Primario;Avenida;Pajaritos;1;-33.5;-70.7
Metropolitana de Santiago;Ñuñoa;Alpha;Clínica;Privado;Secundario;Calle;Irarrázaval;2;x;-70.6
Valparaíso;Viña del Mar;Gamma;Hospital;Servicio de Salud;Terciario;;;;;
";

    fn state_for(csv: &str) -> (tempfile::NamedTempFile, AppState) {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(csv.as_bytes()).expect("write");
        let config = DashboardConfig {
            data_path: file.path().to_path_buf(),
            api_base_url: "http://127.0.0.1:9".to_string(),
            ..DashboardConfig::default()
        };
        let state = AppState::new(config, &DatasetCache::new()).expect("state");
        (file, state)
    }

    #[test]
    fn starts_with_everything_visible_and_sorted() {
        let (_file, state) = state_for(CSV);
        assert_eq!(state.dataset.len(), 2);
        let names: Vec<_> = state.view().iter().map(|f| f.name.clone().unwrap()).collect();
        assert_eq!(names, ["Alpha", "Beta"]);
        assert_eq!(state.row_limit, 30);
    }

    #[test]
    fn missing_dataset_is_fatal() {
        let config = DashboardConfig {
            data_path: "/no/such/establecimientos.csv".into(),
            ..DashboardConfig::default()
        };
        assert!(AppState::new(config, &DatasetCache::new()).is_err());
    }

    #[test]
    fn reset_restores_all_but_keeps_sort() {
        let (_file, mut state) = state_for(CSV);
        state.selection.communes = BTreeSet::from(["Maipú".to_string()]);
        state.selection.sort_direction = crate::data::filter::SortDirection::Descending;
        state.refilter();
        assert_eq!(state.visible_indices.len(), 1);

        state.reset_filters();
        assert_eq!(state.visible_indices.len(), 2);
        assert_eq!(
            state.selection.sort_direction,
            crate::data::filter::SortDirection::Descending
        );
    }

    #[test]
    fn states_share_a_cached_dataset() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(CSV.as_bytes()).expect("write");
        let config = DashboardConfig {
            data_path: file.path().to_path_buf(),
            ..DashboardConfig::default()
        };
        let cache = DatasetCache::new();

        let first = AppState::new(config.clone(), &cache).expect("first");
        let second = AppState::new(config, &cache).expect("second");
        assert!(Arc::ptr_eq(&first.dataset, &second.dataset));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn feedback_round_trip_through_state() {
        let (_file, mut state) = state_for(CSV);
        state.submit_feedback();
        assert_eq!(
            state.feedback_advisory.as_ref().map(|a| a.severity),
            Some(Severity::Warning)
        );
        state.feedback_text = "Useful map".to_string();
        state.submit_feedback();
        assert_eq!(
            state.feedback_advisory.as_ref().map(|a| a.severity),
            Some(Severity::Success)
        );
    }

    #[test]
    fn unreachable_api_leaves_an_error_advisory() {
        let (_file, mut state) = state_for(CSV);
        state.row_limit = 5_000;
        state.submit_query();

        assert_eq!(state.row_limit, 200);
        let outcome = state.query_outcome.as_ref().expect("outcome");
        assert!(outcome.table.is_none());
        assert_eq!(outcome.advisory.severity, Severity::Error);
    }
}
