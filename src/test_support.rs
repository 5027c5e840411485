//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::core::geo::{BoundingBox, GeoPosition};
use crate::core::state::App;
use crate::platform::location::{LocationError, LocationOptions, LocationProvider, PositionFix};
use crate::platform::permission::{PermissionKind, PermissionProvider, PermissionState};
use crate::poi::source::{PoiSource, QueryError};
use crate::poi::types::PoiRecord;

/// Permission provider with scripted check/request outcomes.
pub struct ScriptedPermissions {
    on_check: PermissionState,
    on_request: PermissionState,
    pub requests: AtomicUsize,
}

impl ScriptedPermissions {
    pub fn new(on_check: PermissionState, on_request: PermissionState) -> Self {
        Self {
            on_check,
            on_request,
            requests: AtomicUsize::new(0),
        }
    }

    pub fn granted() -> Self {
        Self::new(PermissionState::Granted, PermissionState::Granted)
    }

    pub fn denied() -> Self {
        Self::new(PermissionState::Denied, PermissionState::Denied)
    }
}

#[async_trait]
impl PermissionProvider for ScriptedPermissions {
    async fn check(&self, _kind: PermissionKind) -> PermissionState {
        self.on_check
    }

    async fn request(&self, _kind: PermissionKind) -> PermissionState {
        self.requests.fetch_add(1, Ordering::SeqCst);
        self.on_request
    }
}

/// Location provider with a scripted outcome and a call counter.
pub struct FixedLocation {
    outcome: Result<GeoPosition, String>,
    pub calls: AtomicUsize,
}

impl FixedLocation {
    pub fn at(position: GeoPosition) -> Self {
        Self {
            outcome: Ok(position),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            outcome: Err(message.to_string()),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl LocationProvider for FixedLocation {
    async fn current_position(
        &self,
        _options: &LocationOptions,
    ) -> Result<PositionFix, LocationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.outcome {
            Ok(position) => Ok(PositionFix::now(*position)),
            Err(message) => Err(LocationError::Unavailable(message.clone())),
        }
    }
}

/// Never resolves within any sane test timeout; for exercising the bound.
pub struct HangingLocation;

#[async_trait]
impl LocationProvider for HangingLocation {
    async fn current_position(
        &self,
        _options: &LocationOptions,
    ) -> Result<PositionFix, LocationError> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Err(LocationError::Unavailable("hung".into()))
    }
}

/// POI source returning scripted spots, optionally after a delay.
pub struct ScriptedSpots {
    spots: Vec<PoiRecord>,
    delay: Option<Duration>,
}

impl ScriptedSpots {
    pub fn empty() -> Self {
        Self::with(Vec::new())
    }

    pub fn with(spots: Vec<PoiRecord>) -> Self {
        Self { spots, delay: None }
    }

    pub fn delayed(spots: Vec<PoiRecord>, delay: Duration) -> Self {
        Self {
            spots,
            delay: Some(delay),
        }
    }
}

#[async_trait]
impl PoiSource for ScriptedSpots {
    async fn parking_nodes(&self, _bbox: &BoundingBox) -> Result<Vec<PoiRecord>, QueryError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        Ok(self.spots.clone())
    }
}

/// POI source that always fails.
pub struct FailingSpots;

#[async_trait]
impl PoiSource for FailingSpots {
    async fn parking_nodes(&self, _bbox: &BoundingBox) -> Result<Vec<PoiRecord>, QueryError> {
        Err(QueryError::Network("connection refused".into()))
    }
}

/// A parking record at the given coordinates with no tags.
pub fn test_spot(id: i64, latitude: f64, longitude: f64) -> PoiRecord {
    PoiRecord {
        id,
        position: GeoPosition::new(latitude, longitude),
        tags: Default::default(),
    }
}

/// A parking record with a name tag.
pub fn test_spot_named(id: i64, name: &str) -> PoiRecord {
    let mut record = test_spot(id, 40.001, -73.995);
    record.tags.insert("name".to_string(), name.to_string());
    record
}

/// Creates a fresh App at its defaults.
pub fn test_app() -> App {
    App::new()
}
