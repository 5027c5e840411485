//! Geographic value types: positions, the visible map region, and the
//! query bounding box.

use serde::{Deserialize, Serialize};

/// Half-width of the parking query box, in degrees, applied symmetrically
/// on both axes.
pub const QUERY_HALF_WIDTH_DEG: f64 = 0.01;

/// Region center shown before any position is known (Midtown Manhattan).
pub const DEFAULT_CENTER_LATITUDE: f64 = 40.748817;
pub const DEFAULT_CENTER_LONGITUDE: f64 = -73.985428;

/// Spans used at startup and after a successful geolocation.
pub const DEFAULT_LATITUDE_SPAN: f64 = 0.015;
pub const DEFAULT_LONGITUDE_SPAN: f64 = 0.021;

/// Tighter latitude span used when recentering on a map tap.
pub const TAP_LATITUDE_SPAN: f64 = 0.005;

/// A point on the globe. Immutable: later fixes replace, never mutate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPosition {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPosition {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// The visible map viewport: a center plus angular spans. Owned by the
/// display layer; the core only publishes new values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapRegion {
    pub center: GeoPosition,
    pub latitude_span: f64,
    pub longitude_span: f64,
}

impl MapRegion {
    /// Region centered on `center` with the standard spans.
    pub fn centered_on(center: GeoPosition) -> Self {
        Self {
            center,
            latitude_span: DEFAULT_LATITUDE_SPAN,
            longitude_span: DEFAULT_LONGITUDE_SPAN,
        }
    }

    /// Region for a map tap: same center semantics, tighter latitude span.
    pub fn tapped(center: GeoPosition) -> Self {
        Self {
            center,
            latitude_span: TAP_LATITUDE_SPAN,
            longitude_span: DEFAULT_LONGITUDE_SPAN,
        }
    }
}

impl Default for MapRegion {
    fn default() -> Self {
        Self::centered_on(GeoPosition::new(
            DEFAULT_CENTER_LATITUDE,
            DEFAULT_CENTER_LONGITUDE,
        ))
    }
}

/// Axis-aligned latitude/longitude rectangle used to filter POI queries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl BoundingBox {
    /// Symmetric box of [`QUERY_HALF_WIDTH_DEG`] around `center`.
    ///
    /// Latitudes clamp to +/-90 and longitudes to +/-180. A box touching
    /// the antimeridian is truncated rather than split, so the edges stay
    /// well-ordered for the query expression.
    pub fn around(center: GeoPosition) -> Self {
        Self {
            south: (center.latitude - QUERY_HALF_WIDTH_DEG).clamp(-90.0, 90.0),
            west: (center.longitude - QUERY_HALF_WIDTH_DEG).clamp(-180.0, 180.0),
            north: (center.latitude + QUERY_HALF_WIDTH_DEG).clamp(-90.0, 90.0),
            east: (center.longitude + QUERY_HALF_WIDTH_DEG).clamp(-180.0, 180.0),
        }
    }
}
