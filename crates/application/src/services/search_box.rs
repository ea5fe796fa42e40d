//! Debounced address search box
//!
//! Owns the state of one search input (origin or destination): the
//! current text, the visible suggestion list, and the committed
//! coordinate. Keystrokes are coalesced with a trailing-edge debounce so
//! the geocoding provider only sees the query once typing pauses.
//!
//! Responses are tagged with the generation of the input that scheduled
//! them. A keystroke arriving inside the debounce window cancels the
//! still-pending fetch; a fetch whose window already elapsed runs to
//! completion and its response is discarded on arrival if the generation
//! moved on. Two boxes never share state.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use domain::{AddressSuggestion, GeoLocation};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tokio::task::AbortHandle;
use tracing::{debug, instrument, warn};

use crate::ports::SuggestionPort;

/// Search box tuning knobs
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SearchBoxConfig {
    /// Trailing-edge debounce window in milliseconds
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Minimum query length (in characters, after trimming); shorter
    /// input clears the list without scheduling a fetch
    #[serde(default = "default_min_query_len")]
    pub min_query_len: usize,
}

const fn default_debounce_ms() -> u64 {
    300
}

const fn default_min_query_len() -> usize {
    3
}

impl Default for SearchBoxConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            min_query_len: default_min_query_len(),
        }
    }
}

/// Per-box mutable state
#[derive(Debug, Default)]
struct SearchState {
    text: String,
    suggestions: Vec<AddressSuggestion>,
    committed: Option<GeoLocation>,
    /// Bumped on every input/select/clear; fetches carry the generation
    /// they were scheduled under and stale responses are dropped
    generation: u64,
}

/// One debounced search input backed by a [`SuggestionPort`]
pub struct SearchBox {
    port: Arc<dyn SuggestionPort>,
    debounce: Duration,
    min_query_len: usize,
    state: Arc<Mutex<SearchState>>,
    /// Proximity bias applied to scheduled fetches (the device location)
    bias: parking_lot::Mutex<Option<GeoLocation>>,
    /// The scheduled-but-not-yet-fired fetch, tagged with its generation;
    /// owned here so teardown and newer keystrokes can cancel it
    pending: Arc<parking_lot::Mutex<Option<(u64, AbortHandle)>>>,
}

impl SearchBox {
    /// Create a search box over a suggestion port
    #[must_use]
    pub fn new(port: Arc<dyn SuggestionPort>, config: &SearchBoxConfig) -> Self {
        Self {
            port,
            debounce: Duration::from_millis(config.debounce_ms),
            min_query_len: config.min_query_len,
            state: Arc::new(Mutex::new(SearchState::default())),
            bias: parking_lot::Mutex::new(None),
            pending: Arc::new(parking_lot::Mutex::new(None)),
        }
    }

    /// Set the proximity bias for subsequent fetches
    pub fn set_bias(&self, bias: Option<GeoLocation>) {
        *self.bias.lock() = bias;
    }

    /// Record a keystroke and (re)schedule the suggestion fetch
    ///
    /// The fetch fires only after the debounce window elapses without
    /// further input. Sub-threshold input clears the visible list and
    /// schedules nothing. Fetch failures are logged and degrade to an
    /// empty list; they never propagate.
    #[instrument(skip(self))]
    pub async fn input(&self, text: &str) {
        let generation = {
            let mut state = self.state.lock().await;
            state.text = text.to_string();
            state.generation += 1;
            state.generation
        };

        // cancel the previously scheduled fetch if its window has not
        // elapsed; one already past the window runs to completion and is
        // filtered by the generation check on arrival
        if let Some((_, handle)) = self.pending.lock().take() {
            handle.abort();
        }

        let query = text.trim().to_string();
        if query.chars().count() < self.min_query_len {
            self.state.lock().await.suggestions.clear();
            return;
        }

        let port = Arc::clone(&self.port);
        let state = Arc::clone(&self.state);
        let pending = Arc::clone(&self.pending);
        let bias = *self.bias.lock();
        let debounce = self.debounce;

        let task = tokio::spawn(async move {
            tokio::time::sleep(debounce).await;

            // the window elapsed: deregister so later keystrokes cannot
            // abort a request that is about to hit the network
            {
                let mut slot = pending.lock();
                if slot.as_ref().is_some_and(|(tag, _)| *tag == generation) {
                    *slot = None;
                }
            }

            let result = port.suggest(&query, bias).await;

            let mut state = state.lock().await;
            if state.generation != generation {
                debug!(query, "Discarding stale suggestion response");
                return;
            }
            match result {
                Ok(suggestions) => state.suggestions = suggestions,
                Err(err) => {
                    warn!(error = %err, query, "Suggestion fetch failed");
                    state.suggestions.clear();
                },
            }
        });

        *self.pending.lock() = Some((generation, task.abort_handle()));
    }

    /// Commit a suggestion as this box's coordinate
    ///
    /// Replaces the text with the suggestion label, clears the list, and
    /// invalidates any fetch still in flight.
    pub async fn select(&self, suggestion: &AddressSuggestion) -> GeoLocation {
        if let Some((_, handle)) = self.pending.lock().take() {
            handle.abort();
        }

        let mut state = self.state.lock().await;
        state.generation += 1;
        state.text = suggestion.label.clone();
        state.suggestions.clear();
        state.committed = Some(suggestion.location);
        suggestion.location
    }

    /// Reset the box: text, suggestions, and committed coordinate
    pub async fn clear(&self) {
        if let Some((_, handle)) = self.pending.lock().take() {
            handle.abort();
        }

        let mut state = self.state.lock().await;
        state.generation += 1;
        state.text.clear();
        state.suggestions.clear();
        state.committed = None;
    }

    /// The current input text
    pub async fn text(&self) -> String {
        self.state.lock().await.text.clone()
    }

    /// The currently visible suggestions
    pub async fn suggestions(&self) -> Vec<AddressSuggestion> {
        self.state.lock().await.suggestions.clone()
    }

    /// The committed coordinate, if a suggestion has been selected
    pub async fn committed(&self) -> Option<GeoLocation> {
        self.state.lock().await.committed
    }
}

impl Drop for SearchBox {
    fn drop(&mut self) {
        if let Some((_, handle)) = self.pending.lock().take() {
            handle.abort();
        }
    }
}

impl fmt::Debug for SearchBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchBox")
            .field("debounce", &self.debounce)
            .field("min_query_len", &self.min_query_len)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex as StdMutex;

    use async_trait::async_trait;

    use super::*;
    use crate::error::ApplicationError;

    /// Records every query that reaches the port; optionally delays the
    /// response per query to simulate slow in-flight requests.
    struct RecordingPort {
        calls: StdMutex<Vec<String>>,
        delays_ms: StdMutex<std::collections::HashMap<String, u64>>,
        fail: bool,
    }

    impl RecordingPort {
        fn new() -> Self {
            Self {
                calls: StdMutex::new(Vec::new()),
                delays_ms: StdMutex::new(std::collections::HashMap::new()),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::new()
            }
        }

        fn delay(self, query: &str, ms: u64) -> Self {
            self.delays_ms
                .lock()
                .unwrap()
                .insert(query.to_string(), ms);
            self
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn suggestion_for(query: &str) -> AddressSuggestion {
            AddressSuggestion::new(
                format!("id-{query}"),
                format!("{query} result"),
                GeoLocation::new_unchecked(40.0, -3.0),
            )
        }
    }

    #[async_trait]
    impl SuggestionPort for RecordingPort {
        async fn suggest(
            &self,
            query: &str,
            _bias: Option<GeoLocation>,
        ) -> Result<Vec<AddressSuggestion>, ApplicationError> {
            self.calls.lock().unwrap().push(query.to_string());

            let delay = self.delays_ms.lock().unwrap().get(query).copied();
            if let Some(ms) = delay {
                tokio::time::sleep(Duration::from_millis(ms)).await;
            }

            if self.fail {
                return Err(ApplicationError::ExternalService("boom".to_string()));
            }
            Ok(vec![Self::suggestion_for(query)])
        }
    }

    fn search_box(port: Arc<RecordingPort>) -> SearchBox {
        SearchBox::new(port, &SearchBoxConfig::default())
    }

    /// Let spawned tasks run up to the current (paused) instant
    async fn drain() {
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
    }

    /// Move paused time forward, letting every timer due in the window
    /// fire in deadline order
    async fn advance(ms: u64) {
        tokio::time::sleep(Duration::from_millis(ms)).await;
        drain().await;
    }

    #[tokio::test(start_paused = true)]
    async fn only_last_of_rapid_inputs_reaches_the_port() {
        let port = Arc::new(RecordingPort::new());
        let search_box = search_box(Arc::clone(&port));

        search_box.input("Mai").await;
        advance(100).await;
        search_box.input("Main").await;
        advance(100).await;
        search_box.input("Main S").await;
        advance(100).await;
        search_box.input("Main St").await;
        advance(300).await;

        assert_eq!(port.calls(), vec!["Main St".to_string()]);
        let suggestions = search_box.suggestions().await;
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].label, "Main St result");
    }

    #[tokio::test(start_paused = true)]
    async fn sub_threshold_input_schedules_nothing_and_clears_list() {
        let port = Arc::new(RecordingPort::new());
        let search_box = search_box(Arc::clone(&port));

        search_box.input("Main").await;
        advance(300).await;
        assert_eq!(search_box.suggestions().await.len(), 1);

        search_box.input("Ma").await;
        advance(1000).await;

        assert!(search_box.suggestions().await.is_empty());
        assert_eq!(port.calls(), vec!["Main".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn whitespace_only_input_is_sub_threshold() {
        let port = Arc::new(RecordingPort::new());
        let search_box = search_box(Arc::clone(&port));

        search_box.input("   a   ").await;
        advance(1000).await;

        assert!(port.calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn stale_response_does_not_overwrite_newer_list() {
        // "alpha st" is slow: its window elapses, the request fires, and
        // while it is in flight the text changes and "beta st" completes
        let port = Arc::new(RecordingPort::new().delay("alpha st", 500));
        let search_box = search_box(Arc::clone(&port));

        search_box.input("alpha st").await;
        advance(300).await; // window elapses, slow fetch is now in flight

        search_box.input("beta st").await;
        advance(300).await; // beta fires and completes immediately

        let suggestions = search_box.suggestions().await;
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].label, "beta st result");

        advance(300).await; // alpha's late response arrives

        let suggestions = search_box.suggestions().await;
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].label, "beta st result");
        assert_eq!(
            port.calls(),
            vec!["alpha st".to_string(), "beta st".to_string()]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn select_commits_and_discards_in_flight_response() {
        let port = Arc::new(RecordingPort::new().delay("alpha st", 500));
        let search_box = search_box(Arc::clone(&port));

        search_box.input("alpha st").await;
        advance(300).await; // slow fetch in flight

        let chosen = AddressSuggestion::new(
            "chosen",
            "Alpha Street 7",
            GeoLocation::new_unchecked(41.0, -4.0),
        );
        let committed = search_box.select(&chosen).await;
        assert_eq!(committed, GeoLocation::new_unchecked(41.0, -4.0));

        advance(600).await; // late response arrives after the selection

        assert!(search_box.suggestions().await.is_empty());
        assert_eq!(search_box.text().await, "Alpha Street 7");
        assert_eq!(
            search_box.committed().await,
            Some(GeoLocation::new_unchecked(41.0, -4.0))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn clear_resets_everything() {
        let port = Arc::new(RecordingPort::new());
        let search_box = search_box(Arc::clone(&port));

        search_box.input("Main").await;
        advance(300).await;
        let suggestion = search_box.suggestions().await[0].clone();
        search_box.select(&suggestion).await;

        search_box.clear().await;

        assert!(search_box.text().await.is_empty());
        assert!(search_box.suggestions().await.is_empty());
        assert!(search_box.committed().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn fetch_failure_degrades_to_empty_list() {
        let port = Arc::new(RecordingPort::failing());
        let search_box = search_box(Arc::clone(&port));

        search_box.input("Main").await;
        advance(300).await;

        assert!(search_box.suggestions().await.is_empty());
        assert_eq!(port.calls(), vec!["Main".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn bias_is_forwarded_to_the_port() {
        struct BiasCheckingPort {
            seen: StdMutex<Option<Option<GeoLocation>>>,
        }

        #[async_trait]
        impl SuggestionPort for BiasCheckingPort {
            async fn suggest(
                &self,
                _query: &str,
                bias: Option<GeoLocation>,
            ) -> Result<Vec<AddressSuggestion>, ApplicationError> {
                *self.seen.lock().unwrap() = Some(bias);
                Ok(Vec::new())
            }
        }

        let port = Arc::new(BiasCheckingPort {
            seen: StdMutex::new(None),
        });
        let search_box = SearchBox::new(Arc::clone(&port) as Arc<dyn SuggestionPort>, &SearchBoxConfig::default());

        let bias = GeoLocation::new_unchecked(52.52, 13.405);
        search_box.set_bias(Some(bias));
        search_box.input("Main").await;
        advance(300).await;

        assert_eq!(*port.seen.lock().unwrap(), Some(Some(bias)));
    }

    #[test]
    fn config_defaults() {
        let config = SearchBoxConfig::default();
        assert_eq!(config.debounce_ms, 300);
        assert_eq!(config.min_query_len, 3);
    }
}
