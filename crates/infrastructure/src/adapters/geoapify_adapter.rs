//! Geoapify adapters - Implement SuggestionPort and RoutingPort using
//! integration_geoapify

use application::error::ApplicationError;
use application::ports::{RoutingPort, SuggestionPort};
use async_trait::async_trait;
use domain::{AddressSuggestion, GeoLocation, RoutePath};
use integration_geoapify::{
    AutocompleteClient, GeoapifyAutocompleteClient, GeoapifyConfig, GeoapifyError,
    GeoapifyRoutingClient, RoutingClient,
};

/// Map an integration error to an application error
///
/// `RouteNotFound` stays distinguishable from transport failures so the
/// presentation layer can report "no route exists" differently from "the
/// request failed".
fn map_error(err: GeoapifyError) -> ApplicationError {
    match err {
        GeoapifyError::RouteNotFound { from, to } => ApplicationError::RouteNotFound { from, to },
        GeoapifyError::Configuration(msg) => ApplicationError::Configuration(msg),
        other => ApplicationError::ExternalService(other.to_string()),
    }
}

/// Adapter for address autocomplete using the Geoapify API
#[derive(Debug)]
pub struct GeoapifySuggestionAdapter {
    client: GeoapifyAutocompleteClient,
}

impl GeoapifySuggestionAdapter {
    /// Create a new adapter
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP
    /// client fails to initialize.
    pub fn new(config: &GeoapifyConfig) -> Result<Self, ApplicationError> {
        let client = GeoapifyAutocompleteClient::new(config).map_err(map_error)?;
        Ok(Self { client })
    }
}

#[async_trait]
impl SuggestionPort for GeoapifySuggestionAdapter {
    async fn suggest(
        &self,
        query: &str,
        bias: Option<GeoLocation>,
    ) -> Result<Vec<AddressSuggestion>, ApplicationError> {
        self.client.suggest(query, bias).await.map_err(map_error)
    }
}

/// Adapter for route fetching using the Geoapify API
#[derive(Debug)]
pub struct GeoapifyRoutingAdapter {
    client: GeoapifyRoutingClient,
}

impl GeoapifyRoutingAdapter {
    /// Create a new adapter
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP
    /// client fails to initialize.
    pub fn new(config: &GeoapifyConfig) -> Result<Self, ApplicationError> {
        let client = GeoapifyRoutingClient::new(config).map_err(map_error)?;
        Ok(Self { client })
    }
}

#[async_trait]
impl RoutingPort for GeoapifyRoutingAdapter {
    async fn fetch_route(
        &self,
        origin: GeoLocation,
        destination: GeoLocation,
    ) -> Result<RoutePath, ApplicationError> {
        self.client
            .fetch_route(origin, destination)
            .await
            .map_err(map_error)
    }
}
