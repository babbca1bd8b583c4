//! Search repository: input sanitization and outbound rate limiting
//!
//! Free-text search is the one user-driven path that can hammer the
//! remote API, so outbound calls are spaced by a single-slot debounce
//! gate: at most one deferred call is pending at a time, and a newer
//! query takes the slot over from an older one.

use crate::{
    client::ApiClient,
    constants::{
        API_BASE_URL, SEARCH_MAX_QUERY_LEN, SEARCH_MIN_QUERY_LEN, SEARCH_RESULT_LIMIT,
        SEARCH_WINDOW_MS,
    },
    error::ApiError,
    types::SearchResult,
};
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{sleep_until, Instant};

/// `/search` response envelope
#[derive(Debug, Deserialize)]
struct SearchEnvelope {
    #[serde(default)]
    coins: Vec<SearchResult>,
}

/// Outcome of a search call
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// Results from the remote API, at most ten
    Results(Vec<SearchResult>),
    /// Query too short after sanitization; cleared locally, no network
    Cleared,
    /// A newer query took over the pending slot while this one waited
    Superseded,
}

/// Performs the actual network search; mocked in tests.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    async fn fetch(&self, query: &str) -> Result<Vec<SearchResult>, ApiError>;
}

struct HttpSearchBackend {
    client: ApiClient,
}

#[async_trait]
impl SearchBackend for HttpSearchBackend {
    async fn fetch(&self, query: &str) -> Result<Vec<SearchResult>, ApiError> {
        let url = format!("{API_BASE_URL}/search");
        let envelope: SearchEnvelope = self
            .client
            .get_json_with(&url, &[("query", query)])
            .await?;

        let mut coins = envelope.coins;
        coins.truncate(SEARCH_RESULT_LIMIT);
        Ok(coins)
    }
}

/// Single-slot debounce state: when the window opened and which
/// generation currently owns the pending slot.
#[derive(Debug)]
struct DebounceGate {
    window: Duration,
    last_fired: Option<Instant>,
    generation: u64,
}

enum Admission {
    /// Fire now; the window restarts at this call
    Immediate,
    /// Wait until the window's end, then re-check slot ownership
    Deferred { until: Instant, token: u64 },
}

/// Repository for free-text coin search
pub struct SearchRepository {
    backend: Arc<dyn SearchBackend>,
    gate: Mutex<DebounceGate>,
}

impl SearchRepository {
    pub fn new(client: ApiClient) -> Self {
        Self::with_backend(Arc::new(HttpSearchBackend { client }))
    }

    /// Primarily for tests with a mock backend.
    pub fn with_backend(backend: Arc<dyn SearchBackend>) -> Self {
        Self::with_window(backend, Duration::from_millis(SEARCH_WINDOW_MS))
    }

    /// Custom debounce window, for tests that exercise the gate quickly.
    pub fn with_window(backend: Arc<dyn SearchBackend>, window: Duration) -> Self {
        Self {
            backend,
            gate: Mutex::new(DebounceGate {
                window,
                last_fired: None,
                generation: 0,
            }),
        }
    }

    /// Searches for coins matching `query`.
    ///
    /// The query is sanitized before anything else happens; too-short
    /// queries resolve [`SearchOutcome::Cleared`] without a network
    /// round-trip. A call landing inside the rate-limit window is
    /// deferred to the window's end, and only the newest deferred query
    /// actually goes out - older ones resolve
    /// [`SearchOutcome::Superseded`].
    pub async fn search(&self, query: &str) -> Result<SearchOutcome, ApiError> {
        let query = sanitize_query(query);
        if query.chars().count() < SEARCH_MIN_QUERY_LEN {
            return Ok(SearchOutcome::Cleared);
        }

        let admission = {
            let mut gate = self.gate.lock().await;
            gate.generation += 1;
            let token = gate.generation;
            match gate.last_fired {
                Some(fired) if fired.elapsed() < gate.window => Admission::Deferred {
                    until: fired + gate.window,
                    token,
                },
                _ => {
                    gate.last_fired = Some(Instant::now());
                    Admission::Immediate
                }
            }
        };

        if let Admission::Deferred { until, token } = admission {
            sleep_until(until).await;
            let mut gate = self.gate.lock().await;
            if gate.generation != token {
                tracing::debug!(query = %query, "search superseded by a newer query");
                return Ok(SearchOutcome::Superseded);
            }
            gate.last_fired = Some(Instant::now());
        }

        let results = self.backend.fetch(&query).await?;
        tracing::debug!(query = %query, count = results.len(), "search complete");
        Ok(SearchOutcome::Results(results))
    }
}

/// Strips `< > " ' &`, trims surrounding whitespace and truncates to the
/// maximum query length. Runs before any network activity.
pub fn sanitize_query(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, '<' | '>' | '"' | '\'' | '&'))
        .collect();
    cleaned.trim().chars().take(SEARCH_MAX_QUERY_LEN).collect()
}
