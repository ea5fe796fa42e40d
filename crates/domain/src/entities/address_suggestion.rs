//! Address suggestion entity

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::value_objects::GeoLocation;

/// One candidate address returned by autocomplete for partial user text
///
/// Suggestions live only as long as the input text that produced them:
/// they are discarded when the text changes or when one of them is
/// committed as an origin or destination.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AddressSuggestion {
    /// Provider-assigned place identifier
    pub place_id: String,
    /// Formatted, human-readable address
    pub label: String,
    /// Resolved coordinate of the address
    pub location: GeoLocation,
}

impl AddressSuggestion {
    /// Create a new suggestion
    #[must_use]
    pub fn new(
        place_id: impl Into<String>,
        label: impl Into<String>,
        location: GeoLocation,
    ) -> Self {
        Self {
            place_id: place_id.into(),
            label: label.into(),
            location,
        }
    }
}

impl fmt::Display for AddressSuggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label)
    }
}
