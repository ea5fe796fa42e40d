//! Device location acquisition
//!
//! Wraps a [`LocationPort`] with a bounded wait: a location request that
//! does not produce a fix within the configured window fails with a
//! timeout instead of hanging. Permission denial is logged and surfaced
//! to the caller; it is terminal for location-dependent features in the
//! session.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use domain::GeoLocation;
use tracing::{debug, instrument, warn};

use crate::ports::{LocationError, LocationPort};

/// One-shot device location reader with a bounded wait
pub struct DeviceLocator {
    port: Arc<dyn LocationPort>,
    timeout: Duration,
}

impl DeviceLocator {
    /// Create a locator with the given timeout
    #[must_use]
    pub fn new(port: Arc<dyn LocationPort>, timeout_secs: u64) -> Self {
        Self {
            port,
            timeout: Duration::from_secs(timeout_secs),
        }
    }

    /// Acquire the current device location
    ///
    /// # Errors
    ///
    /// Returns `LocationError::Timeout` when no fix arrives within the
    /// configured window; permission denial and provider failures pass
    /// through.
    #[instrument(skip(self))]
    pub async fn current_location(&self) -> Result<GeoLocation, LocationError> {
        let timeout_secs = self.timeout.as_secs();

        match tokio::time::timeout(self.timeout, self.port.current_location()).await {
            Ok(Ok(location)) => {
                debug!(%location, "Device location acquired");
                Ok(location)
            },
            Ok(Err(err)) => {
                warn!(error = %err, "Device location unavailable");
                Err(err)
            },
            Err(_) => {
                warn!(timeout_secs, "Device location request timed out");
                Err(LocationError::Timeout { timeout_secs })
            },
        }
    }
}

impl fmt::Debug for DeviceLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeviceLocator")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}
