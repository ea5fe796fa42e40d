//! Geoapify client configuration

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// Configuration shared by the autocomplete and routing clients
///
/// The API key is injected here rather than embedded anywhere in code; it
/// is wrapped in a `SecretString` and never serialized back out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeoapifyConfig {
    /// Base URL for the Geoapify API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Geoapify API key (sensitive - uses SecretString)
    #[serde(default, skip_serializing)]
    pub api_key: Option<SecretString>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum number of autocomplete suggestions to request
    #[serde(default = "default_suggestion_limit")]
    pub suggestion_limit: u8,

    /// Minimum query length (in characters, after trimming) for
    /// autocomplete; shorter queries short-circuit to an empty result
    /// without a network call
    #[serde(default = "default_min_query_len")]
    pub min_query_len: usize,
}

fn default_base_url() -> String {
    "https://api.geoapify.com/v1".to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

const fn default_suggestion_limit() -> u8 {
    5
}

const fn default_min_query_len() -> usize {
    3
}

impl Default for GeoapifyConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
            suggestion_limit: default_suggestion_limit(),
            min_query_len: default_min_query_len(),
        }
    }
}

impl GeoapifyConfig {
    /// Set the API key
    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(SecretString::from(key.into()));
        self
    }

    /// The API key in plaintext, if one is configured
    #[must_use]
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_ref().map(ExposeSecret::expose_secret)
    }

    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            timeout_secs: 5,
            ..Default::default()
        }
        .with_api_key("test-api-key")
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error message if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("base_url must not be empty".to_string());
        }

        if self.api_key().is_none_or(str::is_empty) {
            return Err("api_key must be set".to_string());
        }

        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }

        if self.suggestion_limit == 0 {
            return Err("suggestion_limit must be greater than 0".to_string());
        }

        if self.suggestion_limit > 20 {
            return Err("suggestion_limit must be 20 or less".to_string());
        }

        if self.min_query_len == 0 {
            return Err("min_query_len must be greater than 0".to_string());
        }

        Ok(())
    }
}
