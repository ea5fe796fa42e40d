//! Application configuration
//!
//! Loaded from `wayline.toml` (or an explicit path) with
//! `WAYLINE_`-prefixed environment variable overrides, e.g.
//! `WAYLINE_GEOAPIFY__API_KEY`. Credentials are never embedded in code;
//! the Geoapify API key arrives through this configuration and lives in
//! a `SecretString`.

use std::path::Path;

use application::SearchBoxConfig;
use domain::GeoLocation;
use integration_geoapify::GeoapifyConfig;
use serde::{Deserialize, Serialize};

/// Shared default for boolean `true` fields across config structs
pub(crate) const fn default_true() -> bool {
    true
}

/// Geographic location configuration (latitude/longitude pair)
///
/// Configured as inline table: `{ latitude = 40.4167, longitude = -3.7038 }`
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GeoLocationConfig {
    /// Latitude (-90.0 to 90.0)
    pub latitude: f64,
    /// Longitude (-180.0 to 180.0)
    pub longitude: f64,
}

impl GeoLocationConfig {
    /// Convert to the domain `GeoLocation` value object
    ///
    /// Returns `None` if the coordinates are out of range.
    #[must_use]
    pub fn to_geo_location(&self) -> Option<GeoLocation> {
        GeoLocation::new(self.latitude, self.longitude).ok()
    }
}

/// Device location configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationConfig {
    /// Maximum time to wait for a location fix, in seconds
    #[serde(default = "default_location_timeout_secs")]
    pub timeout_secs: u64,

    /// Whether location access is granted; when false every read fails
    /// with a permission error
    #[serde(default = "default_true")]
    pub allow_access: bool,

    /// Fixed location served to the application (headless deployments
    /// have no GPS stack)
    #[serde(default)]
    pub fixed: Option<GeoLocationConfig>,
}

const fn default_location_timeout_secs() -> u64 {
    10
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_location_timeout_secs(),
            allow_access: true,
            fixed: None,
        }
    }
}

/// Top-level application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Geoapify API settings (autocomplete + routing)
    #[serde(default)]
    pub geoapify: GeoapifyConfig,

    /// Search box behavior (debounce, minimum query length)
    #[serde(default)]
    pub search: SearchBoxConfig,

    /// Device location settings
    #[serde(default)]
    pub location: LocationConfig,
}

impl AppConfig {
    /// Load configuration from `wayline.toml` (if present) and
    /// environment overrides
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be read or deserialized.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_with(None)
    }

    /// Load configuration from an explicit file path (required when
    /// given) and environment overrides
    ///
    /// # Errors
    ///
    /// Returns an error if a source cannot be read or deserialized.
    pub fn load_with(path: Option<&Path>) -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder();

        let builder = match path {
            Some(path) => builder.add_source(config::File::from(path)),
            None => builder.add_source(config::File::with_name("wayline").required(false)),
        };

        let builder = builder.add_source(
            config::Environment::with_prefix("WAYLINE")
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error message if any section is invalid.
    pub fn validate(&self) -> Result<(), String> {
        self.geoapify.validate()?;

        if self.location.timeout_secs == 0 {
            return Err("location.timeout_secs must be greater than 0".to_string());
        }

        if self.search.debounce_ms == 0 {
            return Err("search.debounce_ms must be greater than 0".to_string());
        }

        Ok(())
    }
}
