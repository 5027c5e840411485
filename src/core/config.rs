//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.parkscout/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::core::geo::{DEFAULT_CENTER_LATITUDE, DEFAULT_CENTER_LONGITUDE, GeoPosition};
use crate::platform::location::LocationOptions;
use crate::poi::overpass::{DEFAULT_OVERPASS_URL, DEFAULT_REQUEST_TIMEOUT};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ParkscoutConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub overpass: OverpassConfig,
    #[serde(default)]
    pub location: LocationConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Region center shown before any position is known.
    pub default_latitude: Option<f64>,
    pub default_longitude: Option<f64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct OverpassConfig {
    pub endpoint: Option<String>,
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LocationConfig {
    pub high_accuracy: Option<bool>,
    pub timeout_secs: Option<u64>,
    pub max_cache_age_secs: Option<u64>,
    /// IP geolocation endpoint used by the desktop location adapter.
    pub ip_api_endpoint: Option<String>,
}

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub overpass_endpoint: String,
    pub request_timeout: Duration,
    pub location: LocationOptions,
    pub ip_api_endpoint: Option<String>,
    pub default_center: GeoPosition,
    /// Manual position from CLI flags or env vars. Set means: skip
    /// geolocation and query here directly, like a map tap.
    pub manual_position: Option<GeoPosition>,
}

/// CLI flag values fed into resolution (None = not specified).
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub endpoint: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.parkscout/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".parkscout").join("config.toml"))
}

/// Load config from `~/.parkscout/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `ParkscoutConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<ParkscoutConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(ParkscoutConfig::default());
        }
    };

    if !path.exists() {
        info!(
            "No config file found, generating default at {}",
            path.display()
        );
        generate_default_config(&path);
        return Ok(ParkscoutConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: ParkscoutConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &PathBuf) {
    let default_content = r#"# Parkscout Configuration
# All settings are optional — defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# default_latitude = 40.748817      # Region center before a position is known
# default_longitude = -73.985428

# [overpass]
# endpoint = "https://overpass-api.de/api/interpreter"
# request_timeout_secs = 30         # Or set PARKSCOUT_OVERPASS_URL env var

# [location]
# high_accuracy = true
# timeout_secs = 15                 # Bound on position resolution
# max_cache_age_secs = 10           # Oldest acceptable cached fix
# ip_api_endpoint = "https://ipapi.co/json/"
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env
/// vars → CLI flags.
pub fn resolve(config: &ParkscoutConfig, cli: &CliOverrides) -> ResolvedConfig {
    // Overpass endpoint: CLI → env → config → default
    let overpass_endpoint = cli
        .endpoint
        .clone()
        .or_else(|| std::env::var("PARKSCOUT_OVERPASS_URL").ok())
        .or_else(|| config.overpass.endpoint.clone())
        .unwrap_or_else(|| DEFAULT_OVERPASS_URL.to_string());

    let request_timeout = config
        .overpass
        .request_timeout_secs
        .map(Duration::from_secs)
        .unwrap_or(DEFAULT_REQUEST_TIMEOUT);

    let defaults = LocationOptions::default();
    let location = LocationOptions {
        high_accuracy: config.location.high_accuracy.unwrap_or(defaults.high_accuracy),
        timeout: config
            .location
            .timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(defaults.timeout),
        max_cache_age: config
            .location
            .max_cache_age_secs
            .map(Duration::from_secs)
            .unwrap_or(defaults.max_cache_age),
    };

    let default_center = GeoPosition::new(
        config
            .general
            .default_latitude
            .unwrap_or(DEFAULT_CENTER_LATITUDE),
        config
            .general
            .default_longitude
            .unwrap_or(DEFAULT_CENTER_LONGITUDE),
    );

    // Manual position: CLI → env → none
    let manual_position = position_from(cli.latitude, cli.longitude).or_else(|| {
        position_from(
            env_f64("PARKSCOUT_LAT"),
            env_f64("PARKSCOUT_LON"),
        )
    });

    ResolvedConfig {
        overpass_endpoint,
        request_timeout,
        location,
        ip_api_endpoint: config.location.ip_api_endpoint.clone(),
        default_center,
        manual_position,
    }
}

fn position_from(latitude: Option<f64>, longitude: Option<f64>) -> Option<GeoPosition> {
    match (latitude, longitude) {
        (Some(lat), Some(lon)) => Some(GeoPosition::new(lat, lon)),
        (None, None) => None,
        _ => {
            warn!("Manual position needs both latitude and longitude, ignoring");
            None
        }
    }
}

fn env_f64(key: &str) -> Option<f64> {
    let raw = std::env::var(key).ok()?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring {key}: '{raw}' is not a number");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = ParkscoutConfig::default();
        assert!(config.general.default_latitude.is_none());
        assert!(config.overpass.endpoint.is_none());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let config = ParkscoutConfig::default();
        let resolved = resolve(&config, &CliOverrides::default());
        assert_eq!(resolved.overpass_endpoint, DEFAULT_OVERPASS_URL);
        assert_eq!(resolved.request_timeout, DEFAULT_REQUEST_TIMEOUT);
        assert_eq!(resolved.location, LocationOptions::default());
        assert_eq!(resolved.default_center.latitude, DEFAULT_CENTER_LATITUDE);
        assert!(resolved.manual_position.is_none());
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = ParkscoutConfig {
            general: GeneralConfig {
                default_latitude: Some(59.3293),
                default_longitude: Some(18.0686),
            },
            overpass: OverpassConfig {
                endpoint: Some("http://localhost:9000".to_string()),
                request_timeout_secs: Some(5),
            },
            location: LocationConfig {
                high_accuracy: Some(false),
                timeout_secs: Some(7),
                max_cache_age_secs: Some(3),
                ip_api_endpoint: None,
            },
        };
        let resolved = resolve(&config, &CliOverrides::default());
        assert_eq!(resolved.overpass_endpoint, "http://localhost:9000");
        assert_eq!(resolved.request_timeout, Duration::from_secs(5));
        assert!(!resolved.location.high_accuracy);
        assert_eq!(resolved.location.timeout, Duration::from_secs(7));
        assert_eq!(resolved.location.max_cache_age, Duration::from_secs(3));
        assert_eq!(resolved.default_center, GeoPosition::new(59.3293, 18.0686));
    }

    #[test]
    fn test_resolve_cli_endpoint_wins() {
        let config = ParkscoutConfig {
            overpass: OverpassConfig {
                endpoint: Some("http://from-config".to_string()),
                request_timeout_secs: None,
            },
            ..Default::default()
        };
        let cli = CliOverrides {
            endpoint: Some("http://from-cli".to_string()),
            ..Default::default()
        };
        let resolved = resolve(&config, &cli);
        assert_eq!(resolved.overpass_endpoint, "http://from-cli");
    }

    #[test]
    fn test_resolve_cli_position_becomes_manual() {
        let cli = CliOverrides {
            endpoint: None,
            latitude: Some(40.0),
            longitude: Some(-74.0),
        };
        let resolved = resolve(&ParkscoutConfig::default(), &cli);
        assert_eq!(
            resolved.manual_position,
            Some(GeoPosition::new(40.0, -74.0))
        );
    }

    #[test]
    fn test_half_a_position_is_ignored() {
        let cli = CliOverrides {
            endpoint: None,
            latitude: Some(40.0),
            longitude: None,
        };
        let resolved = resolve(&ParkscoutConfig::default(), &cli);
        assert!(resolved.manual_position.is_none());
    }

    #[test]
    fn test_toml_round_trip() {
        let toml_str = r#"
[general]
default_latitude = 48.8566
default_longitude = 2.3522

[overpass]
endpoint = "http://localhost:9000"
request_timeout_secs = 20

[location]
timeout_secs = 10
"#;
        let config: ParkscoutConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.default_latitude, Some(48.8566));
        assert_eq!(
            config.overpass.endpoint.as_deref(),
            Some("http://localhost:9000")
        );
        assert_eq!(config.overpass.request_timeout_secs, Some(20));
        assert_eq!(config.location.timeout_secs, Some(10));
        assert!(config.location.high_accuracy.is_none());
    }

    #[test]
    fn test_sparse_toml_parses() {
        // Only override one thing — everything else stays default
        let toml_str = r#"
[overpass]
endpoint = "http://localhost:9000"
"#;
        let config: ParkscoutConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.overpass.endpoint.as_deref(),
            Some("http://localhost:9000")
        );
        assert!(config.general.default_latitude.is_none());
        assert!(config.location.timeout_secs.is_none());
    }
}
