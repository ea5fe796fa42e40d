//! Geoapify address autocomplete client
//!
//! Turns partial user text into ranked address candidates via the
//! `/geocode/autocomplete` endpoint. Queries below the configured minimum
//! length never reach the network.

use std::time::Duration;

use async_trait::async_trait;
use domain::{AddressSuggestion, GeoLocation};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::config::GeoapifyConfig;
use crate::error::GeoapifyError;

/// Trait for address autocomplete clients
#[async_trait]
pub trait AutocompleteClient: Send + Sync {
    /// Fetch address suggestions for partial text
    ///
    /// An optional bias coordinate ranks results near that location
    /// higher. Queries shorter than the configured minimum length (after
    /// trimming) return an empty list without issuing a request.
    async fn suggest(
        &self,
        query: &str,
        bias: Option<GeoLocation>,
    ) -> Result<Vec<AddressSuggestion>, GeoapifyError>;
}

/// Geoapify-backed autocomplete client
#[derive(Debug)]
pub struct GeoapifyAutocompleteClient {
    client: Client,
    config: GeoapifyConfig,
}

impl GeoapifyAutocompleteClient {
    /// Create a new autocomplete client
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP
    /// client cannot be initialized.
    pub fn new(config: &GeoapifyConfig) -> Result<Self, GeoapifyError> {
        config.validate().map_err(GeoapifyError::Configuration)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GeoapifyError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// Format a proximity bias query parameter
    fn bias_param(bias: GeoLocation) -> String {
        format!("proximity:{},{}", bias.latitude(), bias.longitude())
    }

    /// Parse an autocomplete feature collection into suggestions
    fn parse_suggestions(body: &str) -> Result<Vec<AddressSuggestion>, GeoapifyError> {
        let raw: RawFeatureCollection =
            serde_json::from_str(body).map_err(|e| GeoapifyError::ParseError(e.to_string()))?;

        raw.features
            .into_iter()
            .map(|feature| {
                let location = GeoLocation::from_lon_lat(feature.geometry.coordinates)
                    .map_err(|e| GeoapifyError::ParseError(e.to_string()))?;
                Ok(AddressSuggestion::new(
                    feature.properties.place_id.unwrap_or_default(),
                    feature.properties.formatted,
                    location,
                ))
            })
            .collect()
    }
}

#[async_trait]
impl AutocompleteClient for GeoapifyAutocompleteClient {
    #[instrument(skip(self))]
    async fn suggest(
        &self,
        query: &str,
        bias: Option<GeoLocation>,
    ) -> Result<Vec<AddressSuggestion>, GeoapifyError> {
        let query = query.trim();
        if query.chars().count() < self.config.min_query_len {
            debug!(query, "Query below minimum length, skipping request");
            return Ok(Vec::new());
        }

        let url = format!("{}/geocode/autocomplete", self.config.base_url);

        // api_key presence is checked by validate() at construction
        let mut params = vec![
            ("text", query.to_string()),
            ("limit", self.config.suggestion_limit.to_string()),
            ("apiKey", self.config.api_key().unwrap_or_default().to_string()),
        ];

        if let Some(bias) = bias {
            params.push(("bias", Self::bias_param(bias)));
        }

        debug!(%url, "Fetching address suggestions");

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GeoapifyError::Timeout {
                        timeout_secs: self.config.timeout_secs,
                    }
                } else {
                    GeoapifyError::ConnectionFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(GeoapifyError::RateLimitExceeded {
                retry_after_secs: response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse().ok()),
            });
        }

        if !status.is_success() {
            return Err(GeoapifyError::RequestFailed(format!("HTTP {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| GeoapifyError::ParseError(e.to_string()))?;

        let suggestions = Self::parse_suggestions(&body)?;
        debug!(count = suggestions.len(), "Suggestions received");
        Ok(suggestions)
    }
}

// --- Raw API response types for deserialization ---

#[derive(Debug, Deserialize)]
struct RawFeatureCollection {
    #[serde(default)]
    features: Vec<RawFeature>,
}

#[derive(Debug, Deserialize)]
struct RawFeature {
    properties: RawProperties,
    geometry: RawPointGeometry,
}

#[derive(Debug, Deserialize)]
struct RawProperties {
    formatted: String,
    place_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawPointGeometry {
    coordinates: [f64; 2],
}
