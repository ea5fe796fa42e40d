//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod geoapify_adapter;
mod location_adapter;

pub use geoapify_adapter::{GeoapifyRoutingAdapter, GeoapifySuggestionAdapter};
pub use location_adapter::ConfiguredLocationProvider;
