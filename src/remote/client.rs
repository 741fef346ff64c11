use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::Value as JsonValue;

use super::error::QueryError;
use super::table::RemoteTable;

const DATASTORE_SEARCH_PATH: &str = "/api/3/action/datastore_search";

// ---------------------------------------------------------------------------
// Wire format
// ---------------------------------------------------------------------------

/// `{ success, result: { records: [...] } }`; anything missing or null counts
/// as unsuccessful / empty.
#[derive(Debug, Deserialize)]
struct DatastoreResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    result: Option<DatastoreResult>,
}

#[derive(Debug, Deserialize)]
struct DatastoreResult {
    #[serde(default)]
    records: Option<Vec<JsonValue>>,
}

// ---------------------------------------------------------------------------
// DatastoreClient
// ---------------------------------------------------------------------------

/// Blocking client for a CKAN `datastore_search` endpoint.
///
/// One GET per call, fixed timeout, no retries.
pub struct DatastoreClient {
    client: Client,
    search_url: String,
}

impl DatastoreClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, QueryError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(QueryError::ClientBuild)?;
        Ok(Self {
            client,
            search_url: format!("{}{DATASTORE_SEARCH_PATH}", base_url.trim_end_matches('/')),
        })
    }

    /// Fetch up to `limit` records of `resource_id`.
    ///
    /// # Errors
    ///
    /// - [`QueryError::Connection`] – network failure or timeout.
    /// - [`QueryError::Status`] – any non-200 status.
    /// - [`QueryError::Decode`] – body is not the expected JSON.
    /// - [`QueryError::Unsuccessful`] – the body's `success` flag is false.
    /// - [`QueryError::NoRecords`] – successful but empty.
    pub fn search(&self, resource_id: &str, limit: u32) -> Result<RemoteTable, QueryError> {
        log::debug!("GET {} resource_id={resource_id} limit={limit}", self.search_url);

        let response = self
            .client
            .get(&self.search_url)
            .query(&[("resource_id", resource_id)])
            .query(&[("limit", limit)])
            .send()?;

        let status = response.status().as_u16();
        let body = response.bytes()?;
        interpret_response(status, &body)
    }
}

/// Turn a raw HTTP status and body into rows or the matching failure.
pub fn interpret_response(status: u16, body: &[u8]) -> Result<RemoteTable, QueryError> {
    if status != 200 {
        return Err(QueryError::Status(status));
    }

    let parsed: DatastoreResponse = serde_json::from_slice(body)?;
    if !parsed.success {
        return Err(QueryError::Unsuccessful);
    }

    let records = parsed
        .result
        .and_then(|r| r.records)
        .unwrap_or_default();
    if records.is_empty() {
        return Err(QueryError::NoRecords);
    }
    Ok(RemoteTable::from_records(records))
}
