use thiserror::Error;

use crate::advisory::{Advisory, Severity};

/// Every way a datastore query can come back without rows.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("could not build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    #[error("connection error talking to the datastore: {0}")]
    Connection(#[from] reqwest::Error),

    #[error("datastore request failed (status code {0})")]
    Status(u16),

    #[error("malformed datastore response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("the API responded but 'success' is false; check the resource id")]
    Unsuccessful,

    #[error("the API returned no records for this resource")]
    NoRecords,
}

impl QueryError {
    pub fn severity(&self) -> Severity {
        match self {
            QueryError::ClientBuild(_)
            | QueryError::Connection(_)
            | QueryError::Status(_)
            | QueryError::Decode(_) => Severity::Error,
            QueryError::Unsuccessful => Severity::Warning,
            QueryError::NoRecords => Severity::Info,
        }
    }

    pub fn to_advisory(&self) -> Advisory {
        Advisory::new(self.severity(), self.to_string())
    }
}
