//! Application-level errors

use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Route requested without an origin
    #[error("Origin is not set")]
    MissingOrigin,

    /// Route requested without a destination
    #[error("Destination is not set")]
    MissingDestination,

    /// The provider found no route between the waypoints
    #[error("No route found from {from} to {to}")]
    RouteNotFound {
        /// Origin description
        from: String,
        /// Destination description
        to: String,
    },

    /// A waypoint changed while the route was being fetched; the result
    /// no longer corresponds to the current pair and was discarded
    #[error("Route request superseded by a waypoint change")]
    RouteSuperseded,

    /// External service error
    #[error("External service error: {0}")]
    ExternalService(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl ApplicationError {
    /// Check if this error is a pre-flight validation failure (no network
    /// request was made)
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::MissingOrigin | Self::MissingDestination)
    }

    /// Check if this error is retryable
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::ExternalService(_) | Self::RouteSuperseded)
    }
}
