//! # Platform Services
//!
//! Seams for the host facilities the workflow depends on: the runtime
//! permission machinery and the positioning service. A mobile shell plugs
//! in its OS bindings here; the demo binary uses the desktop adapters in
//! [`providers`]; tests use scripted fakes.

pub mod location;
pub mod permission;
pub mod providers;

pub use location::{LocationError, LocationOptions, LocationProvider, PositionFix};
pub use permission::{PermissionKind, PermissionProvider, PermissionState};
