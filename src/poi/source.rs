use std::fmt;

use async_trait::async_trait;

use super::types::PoiRecord;
use crate::core::geo::BoundingBox;

/// Errors from a POI lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryError {
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// The data source returned an error response.
    Api { status: u16, message: String },
    /// Failed to decode the response body.
    Parse(String),
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryError::Network(msg) => write!(f, "network error: {msg}"),
            QueryError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            QueryError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for QueryError {}

/// Read-only source of parking nodes within a bounding box.
#[async_trait]
pub trait PoiSource: Send + Sync {
    async fn parking_nodes(&self, bbox: &BoundingBox) -> Result<Vec<PoiRecord>, QueryError>;
}
