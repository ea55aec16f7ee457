//! Debounced title search with stale-response protection.
//!
//! Every keystroke restarts the debounce timer and issues a new sequence
//! token. A response is applied only if its token is still the latest one,
//! so a slow response for an old query can never overwrite a newer result.

use reel_models::MovieSummary;
use reel_sources::MovieCatalog;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchPhase {
    Idle,
    /// Waiting for the debounce timer or for an issued request
    Pending,
    Resolved,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchSession {
    pub query: String,
    pub phase: SearchPhase,
    pub results: Vec<MovieSummary>,
    /// Whether the suggestion list is shown
    pub visible: bool,
    /// Sequence token of the latest input
    pub token: u64,
}

impl SearchSession {
    fn idle(query: String, token: u64) -> Self {
        Self {
            query,
            phase: SearchPhase::Idle,
            results: Vec::new(),
            visible: false,
            token,
        }
    }

    /// A search completed and matched nothing
    pub fn is_not_found(&self) -> bool {
        self.phase == SearchPhase::Resolved && self.results.is_empty()
    }
}

pub struct SearchController {
    catalog: Arc<dyn MovieCatalog>,
    debounce: Duration,
    state: Arc<watch::Sender<SearchSession>>,
    next_token: u64,
    timer: Option<JoinHandle<()>>,
}

impl SearchController {
    pub fn new(catalog: Arc<dyn MovieCatalog>, debounce: Duration) -> Self {
        let (state, _) = watch::channel(SearchSession::idle(String::new(), 0));
        Self {
            catalog,
            debounce,
            state: Arc::new(state),
            next_token: 0,
            timer: None,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<SearchSession> {
        self.state.subscribe()
    }

    pub fn session(&self) -> SearchSession {
        self.state.borrow().clone()
    }

    /// Record new input text. Must be called from within a tokio runtime.
    ///
    /// Blank text hides the suggestions immediately and issues no request.
    /// Otherwise a request for `text` is issued once no further input arrives
    /// for the debounce interval.
    pub fn input(&mut self, text: &str) {
        self.cancel_timer();
        let token = self.issue_token();

        if text.trim().is_empty() {
            self.state
                .send_modify(|session| *session = SearchSession::idle(text.to_string(), token));
            return;
        }

        self.state.send_modify(|session| {
            session.query = text.to_string();
            session.phase = SearchPhase::Pending;
            session.token = token;
        });

        let catalog = self.catalog.clone();
        let state = self.state.clone();
        let debounce = self.debounce;
        let query = text.to_string();

        self.timer = Some(tokio::spawn(async move {
            tokio::time::sleep(debounce).await;
            // Once issued, the request outlives the timer; later input only
            // makes its response stale.
            tokio::spawn(run_search(catalog, state, query, token));
        }));
    }

    /// Pick a suggestion. The session is reset and any in-flight response is
    /// made stale. Returns `None` when `index` is out of range.
    pub fn select(&mut self, index: usize) -> Option<MovieSummary> {
        let chosen = self.state.borrow().results.get(index).cloned()?;
        self.cancel_timer();
        let token = self.issue_token();
        self.state
            .send_modify(|session| *session = SearchSession::idle(String::new(), token));
        debug!(id = chosen.id, title = %chosen.title, "Selected search result");
        Some(chosen)
    }

    /// Wait for the latest input to be answered. Returns at once when no
    /// search is pending.
    pub async fn settle(&self) -> SearchSession {
        let mut rx = self.subscribe();
        loop {
            {
                let session = rx.borrow_and_update();
                if session.phase != SearchPhase::Pending {
                    return session.clone();
                }
            }
            if rx.changed().await.is_err() {
                return self.session();
            }
        }
    }

    pub fn clear(&mut self) {
        self.cancel_timer();
        let token = self.issue_token();
        self.state
            .send_modify(|session| *session = SearchSession::idle(String::new(), token));
    }

    fn issue_token(&mut self) -> u64 {
        self.next_token += 1;
        self.next_token
    }

    fn cancel_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

impl Drop for SearchController {
    fn drop(&mut self) {
        self.cancel_timer();
    }
}

async fn run_search(
    catalog: Arc<dyn MovieCatalog>,
    state: Arc<watch::Sender<SearchSession>>,
    query: String,
    token: u64,
) {
    debug!(query = %query, token, "Issuing search");
    let outcome = catalog.search_by_title(&query).await;

    state.send_if_modified(|session| {
        if session.token != token {
            debug!(token, latest = session.token, "Discarding stale search response");
            return false;
        }
        match outcome {
            Ok(results) => {
                session.visible = !results.is_empty();
                session.results = results;
                session.phase = SearchPhase::Resolved;
            }
            Err(e) => {
                warn!("Search for '{}' failed: {}", query, e);
                session.results.clear();
                session.visible = false;
                session.phase = SearchPhase::Failed;
            }
        }
        true
    });
}
