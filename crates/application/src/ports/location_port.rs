//! Device location port
//!
//! Defines the interface for acquiring a one-shot device location fix.

use async_trait::async_trait;
use domain::GeoLocation;
#[cfg(test)]
use mockall::automock;
use thiserror::Error;

/// Errors that can occur acquiring the device location
#[derive(Debug, Error)]
pub enum LocationError {
    /// The user or platform declined location access; terminal for the
    /// session's location-dependent features
    #[error("Location permission denied")]
    PermissionDenied,

    /// No location fix could be produced
    #[error("Location unavailable: {0}")]
    Unavailable(String),

    /// The location request did not complete in time
    #[error("Location request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },
}

/// Port for one-shot device location reads
#[cfg_attr(test, automock)]
#[async_trait]
pub trait LocationPort: Send + Sync {
    /// Acquire the current device location
    async fn current_location(&self) -> Result<GeoLocation, LocationError>;
}
