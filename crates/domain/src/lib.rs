//! Domain layer for Wayline
//!
//! Contains the pure data model of the route planner: geographic
//! coordinates, address suggestions, and route paths. This layer has no
//! I/O and no external dependencies beyond serde.

pub mod entities;
pub mod value_objects;

pub use entities::{AddressSuggestion, RouteMetrics, RoutePath};
pub use value_objects::{GeoLocation, InvalidCoordinates};
