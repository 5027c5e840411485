use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::core::geo::GeoPosition;

/// Options forwarded to a position lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocationOptions {
    pub high_accuracy: bool,
    /// Upper bound on the whole resolution. The workflow also enforces this
    /// from the outside, so a misbehaving provider cannot stall the screen.
    pub timeout: Duration,
    /// Oldest cached fix a provider may serve instead of acquiring a new one.
    pub max_cache_age: Duration,
}

impl Default for LocationOptions {
    fn default() -> Self {
        Self {
            high_accuracy: true,
            timeout: Duration::from_secs(15),
            max_cache_age: Duration::from_secs(10),
        }
    }
}

/// A resolved position plus when it was acquired.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionFix {
    pub position: GeoPosition,
    pub acquired_at: DateTime<Utc>,
}

impl PositionFix {
    /// A fix acquired right now.
    pub fn now(position: GeoPosition) -> Self {
        Self {
            position,
            acquired_at: Utc::now(),
        }
    }

    /// Whether the fix is at most `max_age` old as of `now`.
    pub fn is_fresh(&self, now: DateTime<Utc>, max_age: Duration) -> bool {
        chrono::Duration::from_std(max_age)
            .map(|age| now.signed_duration_since(self.acquired_at) <= age)
            .unwrap_or(true)
    }
}

/// Position resolution failures.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationError {
    /// The device or service could not produce a position.
    Unavailable(String),
    Network(String),
    InvalidResponse(String),
}

impl fmt::Display for LocationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocationError::Unavailable(msg) => write!(f, "position unavailable: {msg}"),
            LocationError::Network(msg) => write!(f, "network error: {msg}"),
            LocationError::InvalidResponse(msg) => write!(f, "invalid response: {msg}"),
        }
    }
}

impl std::error::Error for LocationError {}

/// Seam for the host's positioning service.
#[async_trait]
pub trait LocationProvider: Send + Sync {
    async fn current_position(
        &self,
        options: &LocationOptions,
    ) -> Result<PositionFix, LocationError>;
}
