//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these ports.

mod location_port;
mod routing_port;
mod suggestion_port;

pub use location_port::{LocationError, LocationPort};
#[cfg(test)]
pub use location_port::MockLocationPort;
pub use routing_port::RoutingPort;
#[cfg(test)]
pub use routing_port::MockRoutingPort;
pub use suggestion_port::SuggestionPort;
#[cfg(test)]
pub use suggestion_port::MockSuggestionPort;
