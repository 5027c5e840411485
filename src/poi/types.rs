//! Parking records and the Overpass transport shapes they are decoded from.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::geo::GeoPosition;

/// Display fallbacks for tags missing from a record.
pub const FALLBACK_NAME: &str = "Parking";
pub const FALLBACK_PARKING_TYPE: &str = "Ground";
pub const FALLBACK_OPERATOR: &str = "Private";

/// One parking node from the POI database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoiRecord {
    pub id: i64,
    pub position: GeoPosition,
    /// Raw OSM tags (name, parking, operator, ...). Ordered for stable
    /// display output.
    pub tags: BTreeMap<String, String>,
}

impl PoiRecord {
    // Empty tag values fall back too, matching the original panel behavior.
    fn tag_or<'a>(&'a self, key: &str, fallback: &'a str) -> &'a str {
        self.tags
            .get(key)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
            .unwrap_or(fallback)
    }

    /// Display name, falling back to "Parking".
    pub fn name(&self) -> &str {
        self.tag_or("name", FALLBACK_NAME)
    }

    /// Parking type (surface, multi-storey, ...), falling back to "Ground".
    pub fn parking_type(&self) -> &str {
        self.tag_or("parking", FALLBACK_PARKING_TYPE)
    }

    /// Operator, falling back to "Private".
    pub fn operator(&self) -> &str {
        self.tag_or("operator", FALLBACK_OPERATOR)
    }
}

/// Top-level Overpass response body.
#[derive(Debug, Deserialize)]
pub struct OverpassResponse {
    #[serde(default)]
    pub elements: Vec<OverpassElement>,
}

/// One node element as Overpass serializes it.
#[derive(Debug, Deserialize)]
pub struct OverpassElement {
    pub id: i64,
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

impl OverpassResponse {
    /// Maps the transport shape into domain records, preserving order.
    pub fn into_records(self) -> Vec<PoiRecord> {
        self.elements
            .into_iter()
            .map(|element| PoiRecord {
                id: element.id,
                position: GeoPosition::new(element.lat, element.lon),
                tags: element.tags,
            })
            .collect()
    }
}
