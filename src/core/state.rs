//! # Screen State
//!
//! Core state for the parking map screen. Domain logic only - no rendering,
//! no OS types. The display layer observes this struct and draws from it.
//!
//! ```text
//! App
//! ├── phase: Phase                   // where the startup pipeline is
//! ├── region: MapRegion              // visible viewport (center + spans)
//! ├── current_position: Option<GeoPosition>  // device fix or manual tap
//! ├── spots: Vec<PoiRecord>          // parking nodes, replaced wholesale
//! ├── selected: Option<PoiRecord>    // detail-panel record
//! ├── status_message: String         // status line text
//! └── error: Option<String>          // last failure, non-blocking
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.
//! This keeps things predictable, so no surprise mutations.

use crate::core::geo::{GeoPosition, MapRegion};
use crate::core::workflow::WorkflowError;
use crate::poi::types::PoiRecord;

/// Where the permission → position → query pipeline currently is.
#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    Idle,
    CheckingPermission,
    ResolvingPosition,
    Querying,
    Ready,
    Failed(WorkflowError),
}

pub struct App {
    pub phase: Phase,
    pub region: MapRegion,
    pub current_position: Option<GeoPosition>,
    pub spots: Vec<PoiRecord>,
    pub selected: Option<PoiRecord>,
    pub status_message: String,
    pub error: Option<String>,
    /// Generation of the newest issued query. Results tagged with an older
    /// generation are discarded by the reducer.
    pub(crate) query_generation: u64,
}

impl App {
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            region: MapRegion::default(),
            current_position: None,
            spots: Vec::new(),
            selected: None,
            status_message: String::from("Idle"),
            error: None,
            query_generation: 0,
        }
    }

    /// Generation of the newest issued query.
    pub fn current_generation(&self) -> u64 {
        self.query_generation
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
