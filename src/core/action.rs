//! # Actions
//!
//! Everything that can happen on the screen becomes an `Action`.
//! The OS answers the permission prompt? That's `Action::PermissionResolved`.
//! A parking query comes back? That's `Action::SpotsReceived`.
//!
//! The `update()` function takes the current state and an action, mutates
//! the state, and returns the `Effect` the driver must launch next. No I/O
//! here - permission prompts, geolocation, and fetching live in workflow.rs.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! Query results carry the generation they were issued under, and `update()`
//! drops any result whose generation is no longer current. A slow early
//! query can therefore never overwrite a later one, even when its response
//! arrives last.

use log::{info, warn};

use crate::core::geo::{GeoPosition, MapRegion};
use crate::core::state::{App, Phase};
use crate::core::workflow::WorkflowError;
use crate::platform::permission::PermissionState;
use crate::poi::types::PoiRecord;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Screen start: kick off the permission → position → query chain.
    Initialize,
    /// Final permission state after the check (and, if needed, request) round.
    PermissionResolved(PermissionState),
    PositionResolved(GeoPosition),
    PositionFailed(String),
    /// User tapped the map: manual position override and re-query.
    MapTapped(GeoPosition),
    SpotsReceived {
        generation: u64,
        spots: Vec<PoiRecord>,
    },
    QueryFailed {
        generation: u64,
        message: String,
    },
    /// User tapped a marker: publish it for the detail panel.
    SelectSpot(PoiRecord),
}

/// Async work the driver must start after an update.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// Run the permission → position chain.
    ResolveLocation,
    /// Fetch parking nodes around `center`, reporting back under `generation`.
    FetchSpots {
        center: GeoPosition,
        generation: u64,
    },
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Initialize => {
            app.phase = Phase::CheckingPermission;
            app.status_message = String::from("Checking location permission");
            Effect::ResolveLocation
        }
        Action::PermissionResolved(PermissionState::Granted) => {
            app.phase = Phase::ResolvingPosition;
            app.status_message = String::from("Locating");
            Effect::None
        }
        Action::PermissionResolved(state) => {
            // Still not granted after the request round. The map stays at
            // the default region and remains usable through taps.
            warn!("Location permission not granted ({state:?})");
            fail(app, WorkflowError::PermissionDenied)
        }
        Action::PositionResolved(position) => {
            app.current_position = Some(position);
            app.region = MapRegion::centered_on(position);
            begin_query(app, position)
        }
        Action::PositionFailed(message) => {
            warn!("Could not resolve position: {message}");
            fail(app, WorkflowError::PositionUnavailable(message))
        }
        Action::MapTapped(position) => {
            app.current_position = Some(position);
            app.region = MapRegion::tapped(position);
            begin_query(app, position)
        }
        Action::SpotsReceived { generation, spots } => {
            if generation != app.query_generation {
                info!(
                    "Discarding stale query result (generation {generation}, current {})",
                    app.query_generation
                );
                return Effect::None;
            }
            // Keep the selection only if the same node is still in the new
            // list, refreshed to the incoming record.
            if let Some(previous) = app.selected.take() {
                app.selected = spots.iter().find(|s| s.id == previous.id).cloned();
            }
            app.spots = spots;
            app.phase = Phase::Ready;
            app.status_message = format!("{} parking spot(s) nearby", app.spots.len());
            app.error = None;
            Effect::None
        }
        Action::QueryFailed {
            generation,
            message,
        } => {
            if generation != app.query_generation {
                info!(
                    "Discarding stale query failure (generation {generation}, current {})",
                    app.query_generation
                );
                return Effect::None;
            }
            warn!("Parking query failed: {message}");
            // Previous spots are kept; only the status reflects the failure.
            fail(app, WorkflowError::QueryFailed(message))
        }
        Action::SelectSpot(record) => {
            app.status_message = format!("Selected {}", record.name());
            app.selected = Some(record);
            Effect::None
        }
    }
}

fn begin_query(app: &mut App, center: GeoPosition) -> Effect {
    app.query_generation += 1;
    app.phase = Phase::Querying;
    app.status_message = String::from("Searching for parking");
    Effect::FetchSpots {
        center,
        generation: app.query_generation,
    }
}

fn fail(app: &mut App, error: WorkflowError) -> Effect {
    app.status_message = error.to_string();
    app.error = Some(error.to_string());
    app.phase = Phase::Failed(error);
    Effect::None
}
