//! # Workflow Driver
//!
//! The async side of the screen: resolves permission and position, fetches
//! parking nodes, and reports everything back as actions on a channel. The
//! reducer in action.rs owns all state; tasks spawned here never touch it
//! directly, so there is nothing to lock.
//!
//! ```text
//! initialize():  check permission ──► request (if needed) ──► position fix
//!                      │                    │                     │
//!                      └────────────────────┴── actions ──────────┘
//!                                                 │
//! spawn_query(): bounding box ──► POI source ──► SpotsReceived | QueryFailed
//! ```

use std::fmt;
use std::sync::Arc;

use log::{info, warn};
use tokio::sync::mpsc::Sender;

use crate::core::action::Action;
use crate::core::geo::{BoundingBox, GeoPosition};
use crate::platform::location::{LocationOptions, LocationProvider};
use crate::platform::permission::{PermissionKind, PermissionProvider, PermissionState};
use crate::poi::source::PoiSource;

/// Failure outcomes of the pipeline. All non-fatal: each is logged, shown
/// in the status line, and leaves the last-known-good state in place.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowError {
    /// Permission still not granted after the request round.
    PermissionDenied,
    /// Position resolution timed out or the device reported an error.
    PositionUnavailable(String),
    /// Network or decode failure on the parking query.
    QueryFailed(String),
}

impl fmt::Display for WorkflowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkflowError::PermissionDenied => write!(f, "location permission not granted"),
            WorkflowError::PositionUnavailable(msg) => {
                write!(f, "position unavailable: {msg}")
            }
            WorkflowError::QueryFailed(msg) => write!(f, "parking query failed: {msg}"),
        }
    }
}

impl std::error::Error for WorkflowError {}

pub struct Workflow {
    permissions: Arc<dyn PermissionProvider>,
    location: Arc<dyn LocationProvider>,
    poi: Arc<dyn PoiSource>,
    options: LocationOptions,
    permission_kind: PermissionKind,
    actions: Sender<Action>,
}

impl Workflow {
    pub fn new(
        permissions: Arc<dyn PermissionProvider>,
        location: Arc<dyn LocationProvider>,
        poi: Arc<dyn PoiSource>,
        options: LocationOptions,
        permission_kind: PermissionKind,
        actions: Sender<Action>,
    ) -> Self {
        Self {
            permissions,
            location,
            poi,
            options,
            permission_kind,
            actions,
        }
    }

    /// Runs the permission → position chain once, emitting the outcome as
    /// actions. Position resolution is bounded by `options.timeout`; cached
    /// fixes up to `options.max_cache_age` old are acceptable.
    ///
    /// The screen state is updated through the channel either way; the
    /// returned error only lets callers log the first failure.
    pub async fn initialize(&self) -> Result<(), WorkflowError> {
        let mut state = self.permissions.check(self.permission_kind).await;
        if state != PermissionState::Granted {
            info!("Permission not granted on check ({state:?}), requesting");
            state = self.permissions.request(self.permission_kind).await;
        }
        self.send(Action::PermissionResolved(state)).await;
        if state != PermissionState::Granted {
            return Err(WorkflowError::PermissionDenied);
        }

        let resolution =
            tokio::time::timeout(self.options.timeout, self.location.current_position(&self.options))
                .await;
        match resolution {
            Ok(Ok(fix)) => {
                info!(
                    "Position resolved: ({}, {})",
                    fix.position.latitude, fix.position.longitude
                );
                self.send(Action::PositionResolved(fix.position)).await;
                Ok(())
            }
            Ok(Err(e)) => {
                let message = e.to_string();
                self.send(Action::PositionFailed(message.clone())).await;
                Err(WorkflowError::PositionUnavailable(message))
            }
            Err(_) => {
                let message = format!("no fix within {:?}", self.options.timeout);
                self.send(Action::PositionFailed(message.clone())).await;
                Err(WorkflowError::PositionUnavailable(message))
            }
        }
    }

    /// Spawns [`Workflow::initialize`] in the background.
    pub fn spawn_initialize(self: &Arc<Self>) {
        let workflow = Arc::clone(self);
        tokio::spawn(async move {
            if let Err(e) = workflow.initialize().await {
                warn!("Startup location chain failed: {e}");
            }
        });
    }

    /// Fetches parking nodes around `center` in the background, reporting
    /// the outcome under `generation` so the reducer can discard it if a
    /// newer query has been issued meanwhile.
    pub fn spawn_query(self: &Arc<Self>, center: GeoPosition, generation: u64) {
        let workflow = Arc::clone(self);
        tokio::spawn(async move {
            let bbox = BoundingBox::around(center);
            let action = match workflow.poi.parking_nodes(&bbox).await {
                Ok(spots) => Action::SpotsReceived { generation, spots },
                Err(e) => Action::QueryFailed {
                    generation,
                    message: e.to_string(),
                },
            };
            workflow.send(action).await;
        });
    }

    async fn send(&self, action: Action) {
        if self.actions.send(action).await.is_err() {
            warn!("Action channel closed: receiver dropped");
        }
    }
}
