//! Geoapify integration for Wayline
//!
//! Clients for two endpoints of the [Geoapify](https://www.geoapify.com) API:
//! address autocomplete (partial text to ranked address candidates) and
//! routing (driving path between two waypoints).
//!
//! # Architecture
//!
//! The crate follows a client-trait pattern: [`AutocompleteClient`] defines
//! the suggestion interface, implemented by [`GeoapifyAutocompleteClient`];
//! [`RoutingClient`] defines route fetching, implemented by
//! [`GeoapifyRoutingClient`]. Both share [`GeoapifyConfig`] and the
//! [`GeoapifyError`] taxonomy. Responses are normalized into the domain
//! model (`AddressSuggestion`, `RoutePath`) with GeoJSON (lon, lat) pairs
//! swapped into (lat, lon).
//!
//! # Example
//!
//! ```rust,ignore
//! use integration_geoapify::{GeoapifyConfig, GeoapifyRoutingClient, RoutingClient};
//!
//! let config = GeoapifyConfig::default().with_api_key("...");
//! let client = GeoapifyRoutingClient::new(&config)?;
//!
//! let route = client.fetch_route(
//!     GeoLocation::new(40.4167, -3.7038)?, // origin
//!     GeoLocation::new(40.4530, -3.6883)?, // destination
//! ).await?;
//! ```

mod autocomplete;
mod config;
mod error;
mod routing;

pub use autocomplete::{AutocompleteClient, GeoapifyAutocompleteClient};
pub use config::GeoapifyConfig;
pub use error::GeoapifyError;
pub use routing::{GeoapifyRoutingClient, RoutingClient};
