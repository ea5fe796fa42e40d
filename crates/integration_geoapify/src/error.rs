//! Geoapify error types

use thiserror::Error;

/// Errors that can occur talking to the Geoapify API
#[derive(Debug, Error)]
pub enum GeoapifyError {
    /// Connection to the service failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// HTTP request failed (non-2xx status)
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Response body could not be parsed or lacked expected fields
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Well-formed routing response with zero route features
    #[error("No route found from {from} to {to}")]
    RouteNotFound {
        /// Origin description
        from: String,
        /// Destination description
        to: String,
    },

    /// Rate limit exceeded
    #[error("Rate limit exceeded, retry after {retry_after_secs:?} seconds")]
    RateLimitExceeded {
        /// Seconds to wait before retrying (if provided by the API)
        retry_after_secs: Option<u64>,
    },

    /// Request timed out
    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl GeoapifyError {
    /// Returns true if this error is retryable
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed(_)
                | Self::RequestFailed(_)
                | Self::Timeout { .. }
                | Self::RateLimitExceeded { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_errors() {
        assert!(GeoapifyError::ConnectionFailed("test".to_string()).is_retryable());
        assert!(GeoapifyError::RequestFailed("HTTP 500".to_string()).is_retryable());
        assert!(GeoapifyError::Timeout { timeout_secs: 10 }.is_retryable());
        assert!(
            GeoapifyError::RateLimitExceeded {
                retry_after_secs: Some(30)
            }
            .is_retryable()
        );
    }

    #[test]
    fn test_non_retryable_errors() {
        assert!(!GeoapifyError::ParseError("test".to_string()).is_retryable());
        assert!(!GeoapifyError::Configuration("test".to_string()).is_retryable());
        assert!(
            !GeoapifyError::RouteNotFound {
                from: "A".to_string(),
                to: "B".to_string(),
            }
            .is_retryable()
        );
    }

    #[test]
    fn test_error_display() {
        let err = GeoapifyError::RouteNotFound {
            from: "40.4167, -3.7038".to_string(),
            to: "40.4530, -3.6883".to_string(),
        };
        assert!(err.to_string().contains("40.4167"));
        assert!(err.to_string().contains("No route found"));

        let err = GeoapifyError::Timeout { timeout_secs: 10 };
        assert!(err.to_string().contains("10"));
    }
}
