//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer and loads the
//! application configuration.

pub mod adapters;
pub mod config;

pub use adapters::{ConfiguredLocationProvider, GeoapifyRoutingAdapter, GeoapifySuggestionAdapter};
pub use config::{AppConfig, GeoLocationConfig, LocationConfig};
