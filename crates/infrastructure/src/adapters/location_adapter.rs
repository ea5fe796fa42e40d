//! Configured location provider - Implements LocationPort from static
//! configuration
//!
//! Headless deployments have no GPS stack; this provider serves the
//! coordinate configured under `[location]`, and simulates permission
//! denial when access is disabled there.

use application::ports::{LocationError, LocationPort};
use async_trait::async_trait;
use domain::GeoLocation;
use tracing::warn;

use crate::config::LocationConfig;

/// Location source backed by configuration
#[derive(Debug)]
pub struct ConfiguredLocationProvider {
    location: Option<GeoLocation>,
    allow_access: bool,
}

impl ConfiguredLocationProvider {
    /// Create a provider from the location configuration
    #[must_use]
    pub fn from_config(config: &LocationConfig) -> Self {
        Self {
            location: config
                .fixed
                .as_ref()
                .and_then(crate::config::GeoLocationConfig::to_geo_location),
            allow_access: config.allow_access,
        }
    }

    /// Create a provider serving a fixed location
    #[must_use]
    pub const fn fixed(location: GeoLocation) -> Self {
        Self {
            location: Some(location),
            allow_access: true,
        }
    }
}

#[async_trait]
impl LocationPort for ConfiguredLocationProvider {
    async fn current_location(&self) -> Result<GeoLocation, LocationError> {
        if !self.allow_access {
            warn!("Location access disabled in configuration");
            return Err(LocationError::PermissionDenied);
        }

        self.location.ok_or_else(|| {
            LocationError::Unavailable("no location configured".to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::config::GeoLocationConfig;

    use super::*;

    #[tokio::test]
    async fn serves_the_configured_location() {
        let config = LocationConfig {
            fixed: Some(GeoLocationConfig {
                latitude: 40.4167,
                longitude: -3.7038,
            }),
            ..LocationConfig::default()
        };
        let provider = ConfiguredLocationProvider::from_config(&config);

        let location = provider.current_location().await.expect("location");
        assert!((location.latitude() - 40.4167).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn denied_access_is_permission_denied() {
        let config = LocationConfig {
            allow_access: false,
            fixed: Some(GeoLocationConfig {
                latitude: 40.0,
                longitude: -3.0,
            }),
            ..LocationConfig::default()
        };
        let provider = ConfiguredLocationProvider::from_config(&config);

        let result = provider.current_location().await;
        assert!(matches!(result, Err(LocationError::PermissionDenied)));
    }

    #[tokio::test]
    async fn missing_location_is_unavailable() {
        let provider = ConfiguredLocationProvider::from_config(&LocationConfig::default());

        let result = provider.current_location().await;
        assert!(matches!(result, Err(LocationError::Unavailable(_))));
    }

    #[tokio::test]
    async fn out_of_range_configured_location_is_unavailable() {
        let config = LocationConfig {
            fixed: Some(GeoLocationConfig {
                latitude: 95.0,
                longitude: 0.0,
            }),
            ..LocationConfig::default()
        };
        let provider = ConfiguredLocationProvider::from_config(&config);

        let result = provider.current_location().await;
        assert!(matches!(result, Err(LocationError::Unavailable(_))));
    }

    #[tokio::test]
    async fn fixed_constructor() {
        let provider = ConfiguredLocationProvider::fixed(GeoLocation::new_unchecked(1.0, 2.0));
        assert!(provider.current_location().await.is_ok());
    }
}
