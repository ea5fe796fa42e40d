//! Routing port
//!
//! Defines the interface for fetching a driving route between two
//! waypoints from a routing provider.

use async_trait::async_trait;
use domain::{GeoLocation, RoutePath};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for route fetching
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RoutingPort: Send + Sync {
    /// Fetch a driving route between origin and destination
    ///
    /// Fails with [`ApplicationError::RouteNotFound`] when the provider
    /// has no route for the pair; transport failures surface as
    /// [`ApplicationError::ExternalService`].
    async fn fetch_route(
        &self,
        origin: GeoLocation,
        destination: GeoLocation,
    ) -> Result<RoutePath, ApplicationError>;
}
