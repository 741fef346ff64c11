//! On-demand query against the datos.gob.cl datastore API.

mod client;
mod error;
mod table;

use std::ops::RangeInclusive;
use std::sync::Arc;

pub use client::DatastoreClient;
pub use error::QueryError;
pub use table::RemoteTable;

use crate::advisory::Advisory;
use crate::cache::MemoCache;

/// Rows a single query may ask for.
pub const ROW_LIMIT_RANGE: RangeInclusive<u32> = 10..=200;

/// Memo table for query outcomes, keyed by `(resource_id, limit)`.
pub type QueryCache = MemoCache<(String, u32), QueryOutcome>;

/// Clamp a user-entered row count into [`ROW_LIMIT_RANGE`].
pub fn clamp_row_limit(requested: i64) -> u32 {
    let lo = i64::from(*ROW_LIMIT_RANGE.start());
    let hi = i64::from(*ROW_LIMIT_RANGE.end());
    // Both bounds fit in u32, so the clamped value does too.
    u32::try_from(requested.clamp(lo, hi)).unwrap_or(*ROW_LIMIT_RANGE.start())
}

/// What the query panel shows after a submit: rows, or a notice saying why not.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryOutcome {
    pub table: Option<RemoteTable>,
    pub advisory: Advisory,
}

impl QueryOutcome {
    fn from_result(result: Result<RemoteTable, QueryError>) -> Self {
        match result {
            Ok(table) => {
                log::info!("datastore query returned {} rows", table.len());
                QueryOutcome {
                    advisory: Advisory::success("Data retrieved from the API."),
                    table: Some(table),
                }
            }
            Err(e) => {
                log::warn!("datastore query gave no data: {e}");
                QueryOutcome {
                    table: None,
                    advisory: e.to_advisory(),
                }
            }
        }
    }
}

/// Run (or replay) the query for `resource_id` / `limit`.
///
/// Every outcome, failures included, is remembered for the process lifetime
/// so a repeated submit shows the same result without another request.
pub fn run_query(
    cache: &QueryCache,
    client: &DatastoreClient,
    resource_id: &str,
    limit: u32,
) -> Arc<QueryOutcome> {
    let resource_id = resource_id.trim();
    let key = (resource_id.to_string(), limit);
    cache.get_or_insert_with(&key, || {
        QueryOutcome::from_result(client.search(resource_id, limit))
    })
}
