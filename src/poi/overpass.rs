//! Overpass API client.
//!
//! Issues a single read-only query for nodes tagged `amenity=parking`
//! within a bounding box:
//!
//! ```text
//! <endpoint>?data=[out:json];node["amenity"="parking"](<south>,<west>,<north>,<east>);out;
//! ```

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};

use super::source::{PoiSource, QueryError};
use super::types::{OverpassResponse, PoiRecord};
use crate::core::geo::BoundingBox;

pub const DEFAULT_OVERPASS_URL: &str = "https://overpass-api.de/api/interpreter";

/// Bound on the whole request. Overpass mirrors occasionally hang; without
/// this a stuck query would never report back.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct OverpassClient {
    endpoint: String,
    client: reqwest::Client,
}

impl OverpassClient {
    /// Creates a client against the public Overpass endpoint, or a custom
    /// one (used by tests to point at a mock server).
    pub fn new(endpoint: Option<String>) -> Self {
        Self::with_timeout(endpoint, DEFAULT_REQUEST_TIMEOUT)
    }

    pub fn with_timeout(endpoint: Option<String>, timeout: Duration) -> Self {
        Self {
            endpoint: endpoint.unwrap_or_else(|| DEFAULT_OVERPASS_URL.to_string()),
            client: reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
        }
    }

    /// Overpass QL filter for parking nodes within `bbox`.
    fn query_expression(bbox: &BoundingBox) -> String {
        format!(
            "[out:json];node[\"amenity\"=\"parking\"]({},{},{},{});out;",
            bbox.south, bbox.west, bbox.north, bbox.east
        )
    }
}

#[async_trait]
impl PoiSource for OverpassClient {
    async fn parking_nodes(&self, bbox: &BoundingBox) -> Result<Vec<PoiRecord>, QueryError> {
        let data = Self::query_expression(bbox);
        debug!("Overpass query: {data}");

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("data", data.as_str())])
            .send()
            .await
            .map_err(|e| QueryError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Overpass API error: {} - {}", status.as_u16(), message);
            return Err(QueryError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| QueryError::Network(e.to_string()))?;
        let decoded: OverpassResponse =
            serde_json::from_str(&body).map_err(|e| QueryError::Parse(e.to_string()))?;

        let records = decoded.into_records();
        info!("Overpass returned {} parking node(s)", records.len());
        Ok(records)
    }
}
