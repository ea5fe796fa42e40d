//! Address suggestion port
//!
//! Defines the interface for autocomplete lookups against a geocoding
//! provider.

use async_trait::async_trait;
use domain::{AddressSuggestion, GeoLocation};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for address autocomplete operations
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SuggestionPort: Send + Sync {
    /// Fetch address suggestions for partial text, optionally biased
    /// towards a location
    async fn suggest(
        &self,
        query: &str,
        bias: Option<GeoLocation>,
    ) -> Result<Vec<AddressSuggestion>, ApplicationError>;
}
