//! Domain entities - Objects with identity and lifecycle

mod address_suggestion;
mod route_path;

pub use address_suggestion::AddressSuggestion;
pub use route_path::{RouteMetrics, RoutePath};
