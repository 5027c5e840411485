//! IP-based geolocation, standing in for device GPS on desktop hosts.
//!
//! Accuracy is city-level at best, which is plenty for a parking search
//! box 0.02 degrees wide. The last fix is cached and re-served while it is
//! younger than the caller's `max_cache_age`, mirroring how mobile
//! geolocation APIs honor a maximum-age option.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use log::{debug, info};
use serde::Deserialize;

use crate::core::geo::GeoPosition;
use crate::platform::location::{LocationError, LocationOptions, LocationProvider, PositionFix};

pub const DEFAULT_IP_API_URL: &str = "https://ipapi.co/json/";

#[derive(Deserialize)]
struct IpApiResult {
    latitude: Option<f64>,
    longitude: Option<f64>,
    city: Option<String>,
    country_name: Option<String>,
}

pub struct IpLocationProvider {
    endpoint: String,
    client: reqwest::Client,
    last_fix: Mutex<Option<PositionFix>>,
}

impl IpLocationProvider {
    /// Creates a provider against the public ipapi.co endpoint, or a custom
    /// one (used by tests to point at a mock server).
    pub fn new(endpoint: Option<String>) -> Self {
        Self {
            endpoint: endpoint.unwrap_or_else(|| DEFAULT_IP_API_URL.to_string()),
            client: reqwest::Client::new(),
            last_fix: Mutex::new(None),
        }
    }

    async fn geolocate(&self) -> Result<PositionFix, LocationError> {
        let response = self
            .client
            .get(&self.endpoint)
            .header("User-Agent", "parkscout/0.1")
            .send()
            .await
            .map_err(|e| LocationError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(LocationError::Network(format!(
                "HTTP {}",
                response.status().as_u16()
            )));
        }

        let result: IpApiResult = response
            .json()
            .await
            .map_err(|e| LocationError::InvalidResponse(e.to_string()))?;

        let latitude = result
            .latitude
            .ok_or_else(|| LocationError::InvalidResponse("no latitude".into()))?;
        let longitude = result
            .longitude
            .ok_or_else(|| LocationError::InvalidResponse("no longitude".into()))?;

        if let (Some(city), Some(country)) = (&result.city, &result.country_name) {
            info!("IP geolocation resolved near {city}, {country}");
        }

        Ok(PositionFix::now(GeoPosition::new(latitude, longitude)))
    }

    fn cached_fix(&self) -> Option<PositionFix> {
        *self.last_fix.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn store_fix(&self, fix: PositionFix) {
        *self.last_fix.lock().unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(fix);
    }
}

#[async_trait]
impl LocationProvider for IpLocationProvider {
    async fn current_position(
        &self,
        options: &LocationOptions,
    ) -> Result<PositionFix, LocationError> {
        if let Some(fix) = self.cached_fix() {
            if fix.is_fresh(Utc::now(), options.max_cache_age) {
                debug!("Serving cached IP fix from {}", fix.acquired_at);
                return Ok(fix);
            }
        }

        let fix = self.geolocate().await?;
        self.store_fix(fix);
        Ok(fix)
    }
}
