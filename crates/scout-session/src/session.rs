//! Search session state machine.
//!
//! A [`SearchSession`] owns the query, loading flag, and result list for one
//! front end. It sends at most one search at a time and folds the backend's
//! answer back into [`SessionState`], which observers can follow through
//! [`SearchSession::subscribe`].
//!
//! ```text
//! Idle ──submit──▶ Searching ──response/failure──▶ Settled
//!  ▲                                                  │
//!  └───────────────────────reset──────────────────────┘
//! ```

use std::sync::Arc;

use scout_commerce::catalog::Product;
use scout_commerce::search::{Locale, LocaleStrategy, Query, SearchRequest};
use scout_data::FetchError;
use serde::Serialize;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::backend::SearchBackend;

/// Coarse phase of a session, derived from [`SessionState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionPhase {
    /// Nothing searched yet, or the user started over.
    Idle,
    /// A request is in flight.
    Searching,
    /// The last request finished, successfully or not.
    Settled,
}

impl SessionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionPhase::Idle => "idle",
            SessionPhase::Searching => "searching",
            SessionPhase::Settled => "settled",
        }
    }
}

/// Everything a front end needs to render the search page.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SessionState {
    /// Set when a search is submitted; cleared only by [`SearchSession::reset`].
    pub has_searched: bool,
    /// True while a request is in flight. Old `results` stay visible meanwhile.
    pub loading: bool,
    /// Results of the last settled search, in backend order.
    pub results: Vec<Product>,
    /// Query of the most recent submission.
    pub query: Option<String>,
    /// Locale sent with the most recent submission.
    pub locale: Option<Locale>,
    /// Incremented on every accepted submission.
    pub generation: u64,
    /// Why the last search failed. Results are empty whenever this is set.
    pub last_error: Option<String>,
}

impl SessionState {
    pub fn phase(&self) -> SessionPhase {
        if self.loading {
            SessionPhase::Searching
        } else if self.has_searched {
            SessionPhase::Settled
        } else {
            SessionPhase::Idle
        }
    }

    /// Settled with nothing to show, whether the backend found nothing or
    /// the request failed.
    pub fn is_empty_result(&self) -> bool {
        self.phase() == SessionPhase::Settled && self.results.is_empty()
    }
}

/// Why a submission did not send a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// The query was blank after trimming.
    EmptyQuery,
    /// Another search is still in flight.
    InFlight,
    /// The session was closed.
    Closed,
}

/// What [`SearchSession::submit`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// No request was sent and state is unchanged.
    Ignored(IgnoreReason),
    /// The backend answered; `count` results are now in state.
    Settled { count: usize },
    /// The request failed; results were cleared.
    Failed { reason: String },
    /// The session closed while the request was in flight. State untouched.
    Cancelled,
    /// A newer submission owns the state; this response was dropped.
    Discarded,
}

/// Single-flight search state machine over a [`SearchBackend`].
pub struct SearchSession<B: SearchBackend> {
    backend: Arc<B>,
    ambient: Locale,
    strategy: LocaleStrategy,
    state: watch::Sender<SessionState>,
    cancel: CancellationToken,
}

impl<B: SearchBackend> SearchSession<B> {
    /// Create a session.
    ///
    /// `ambient` is the environment's language preference, supplied by the
    /// caller rather than read from a global.
    pub fn new(backend: B, ambient: Locale) -> Self {
        let (state, _) = watch::channel(SessionState::default());
        Self {
            backend: Arc::new(backend),
            ambient,
            strategy: LocaleStrategy::Detect,
            state,
            cancel: CancellationToken::new(),
        }
    }

    /// Choose where each search's locale comes from.
    pub fn with_locale_strategy(mut self, strategy: LocaleStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn ambient_locale(&self) -> &Locale {
        &self.ambient
    }

    pub fn locale_strategy(&self) -> LocaleStrategy {
        self.strategy
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Follow every state transition.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// Submit a query.
    ///
    /// Blank queries, submissions while a search is in flight, and
    /// submissions after [`close`](Self::close) are ignored without touching
    /// state. Otherwise exactly one request is sent and the session settles
    /// with its results, or with no results if it failed.
    pub async fn submit(&self, raw: &str) -> SubmitOutcome {
        let Ok(query) = Query::parse(raw) else {
            tracing::debug!("ignoring blank query");
            return SubmitOutcome::Ignored(IgnoreReason::EmptyQuery);
        };
        if self.cancel.is_cancelled() {
            return SubmitOutcome::Ignored(IgnoreReason::Closed);
        }

        let locale = self.strategy.resolve(&self.ambient, &query);
        let mut generation = 0;
        let started = self.state.send_if_modified(|state| {
            if state.loading {
                return false;
            }
            state.loading = true;
            state.has_searched = true;
            state.generation += 1;
            state.query = Some(query.to_string());
            state.locale = Some(locale.clone());
            state.last_error = None;
            generation = state.generation;
            true
        });
        if !started {
            tracing::debug!(query = %query, "search already in flight, ignoring submit");
            return SubmitOutcome::Ignored(IgnoreReason::InFlight);
        }

        let request = SearchRequest::new(&query, locale);
        tracing::debug!(
            query = request.query(),
            locale = %request.locale(),
            generation,
            "submitting search"
        );

        let result = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => {
                tracing::debug!(generation, "session closed during search");
                return SubmitOutcome::Cancelled;
            }
            result = self.backend.search(&request) => result,
        };

        self.settle(generation, result)
    }

    /// Start over: the page goes back to its initial prompt.
    ///
    /// Results stay in memory until the next search settles, and an
    /// in-flight request is not cancelled.
    pub fn reset(&self) {
        self.state.send_if_modified(|state| {
            let changed = state.has_searched;
            state.has_searched = false;
            changed
        });
    }

    /// Tear the session down. In-flight searches return
    /// [`SubmitOutcome::Cancelled`] and later submits are ignored.
    pub fn close(&self) {
        self.cancel.cancel();
    }

    pub fn is_closed(&self) -> bool {
        self.cancel.is_cancelled()
    }

    fn settle(&self, generation: u64, result: Result<Vec<Product>, FetchError>) -> SubmitOutcome {
        let mut outcome = SubmitOutcome::Discarded;
        self.state.send_if_modified(|state| {
            if state.generation != generation {
                tracing::debug!(
                    generation,
                    latest = state.generation,
                    "discarding stale search response"
                );
                return false;
            }

            state.loading = false;
            match result {
                Ok(products) => {
                    tracing::info!(generation, count = products.len(), "search settled");
                    outcome = SubmitOutcome::Settled {
                        count: products.len(),
                    };
                    state.results = products;
                }
                Err(e) => {
                    tracing::warn!(generation, error = %e, "search failed");
                    outcome = SubmitOutcome::Failed {
                        reason: e.to_string(),
                    };
                    state.results.clear();
                    state.last_error = Some(e.to_string());
                }
            }
            true
        });
        outcome
    }
}

impl<B: SearchBackend> Drop for SearchSession<B> {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
