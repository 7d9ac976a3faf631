//! Search workflow state machine: query and mode inputs, the fetched result
//! set, client-side pagination over it, and the record being inspected.

use shared::{domain::SearchMode, protocol::SearchResult};
use tracing::{debug, info};

use crate::{config::SessionConfig, error::GatewayError, MemoGateway};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    Idle,
    Searching,
    Results,
    Failed,
}

/// Handle for one issued search. Only the most recently issued ticket may
/// complete; older ones are discarded when they come back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    seq: u64,
    mode: SearchMode,
    query: String,
}

impl SearchTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    pub fn query(&self) -> &str {
        &self.query
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied(SearchState),
    Stale,
}

pub fn total_pages(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size.max(1)).max(1)
}

pub fn clamp_page(requested: usize, len: usize, page_size: usize) -> usize {
    requested.clamp(1, total_pages(len, page_size))
}

/// Keeps records whose title, snippet or body contains `query` verbatim.
/// Order is preserved, so filtering twice is the same as filtering once.
pub fn filter_exact(results: Vec<SearchResult>, query: &str) -> Vec<SearchResult> {
    results
        .into_iter()
        .filter(|result| result.contains_text(query))
        .collect()
}

#[derive(Debug)]
pub struct SearchSession {
    config: SessionConfig,
    query: String,
    mode: SearchMode,
    state: SearchState,
    results: Vec<SearchResult>,
    page: usize,
    selected: Option<SearchResult>,
    error: Option<String>,
    last_seq: u64,
    inflight: Option<u64>,
}

impl Default for SearchSession {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl SearchSession {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            query: String::new(),
            mode: SearchMode::default(),
            state: SearchState::Idle,
            results: Vec::new(),
            page: 1,
            selected: None,
            error: None,
            last_seq: 0,
            inflight: None,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_mode(&mut self, mode: SearchMode) {
        self.mode = mode;
    }

    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    pub fn state(&self) -> SearchState {
        self.state
    }

    pub fn is_searching(&self) -> bool {
        self.state == SearchState::Searching
    }

    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn selected(&self) -> Option<&SearchResult> {
        self.selected.as_ref()
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.results.len(), self.config.page_size())
    }

    /// The slice of `results` shown on the current page.
    pub fn visible(&self) -> &[SearchResult] {
        let len = self.results.len();
        let start = ((self.page - 1) * self.config.page_size()).min(len);
        let end = (start + self.config.page_size()).min(len);
        &self.results[start..end]
    }

    /// Moves to `requested`, clamped into the valid range. Never fetches.
    pub fn set_page(&mut self, requested: usize) -> usize {
        self.page = clamp_page(requested, self.results.len(), self.config.page_size());
        self.page
    }

    pub fn select(&mut self, uuid: &str) -> Option<&SearchResult> {
        let found = self.results.iter().find(|result| result.uuid == uuid)?.clone();
        self.selected = Some(found);
        self.selected.as_ref()
    }

    pub fn dismiss(&mut self) {
        self.selected = None;
    }

    /// Enters `Searching` and stamps a ticket for the request about to be
    /// issued. Any ticket handed out earlier becomes stale.
    pub fn begin_search(&mut self) -> SearchTicket {
        self.last_seq += 1;
        self.inflight = Some(self.last_seq);
        self.state = SearchState::Searching;
        self.error = None;
        self.selected = None;
        self.page = 1;

        debug!(seq = self.last_seq, mode = %self.mode, "search started");
        SearchTicket {
            seq: self.last_seq,
            mode: self.mode,
            query: self.query.clone(),
        }
    }

    pub fn complete(
        &mut self,
        ticket: SearchTicket,
        outcome: Result<Vec<SearchResult>, GatewayError>,
    ) -> Completion {
        if self.inflight != Some(ticket.seq) {
            debug!(
                seq = ticket.seq,
                latest = self.last_seq,
                "discarding stale search response"
            );
            return Completion::Stale;
        }
        self.inflight = None;

        match outcome {
            Ok(results) => {
                self.results = match ticket.mode {
                    SearchMode::Exact => filter_exact(results, &ticket.query),
                    SearchMode::Semantic => results,
                };
                self.state = SearchState::Results;
                info!(
                    mode = %ticket.mode,
                    results = self.results.len(),
                    "search completed"
                );
            }
            Err(err) => {
                self.results.clear();
                self.error = Some(err.to_string());
                self.state = SearchState::Failed;
                info!(mode = %ticket.mode, error = %err, "search failed");
            }
        }
        self.page = clamp_page(self.page, self.results.len(), self.config.page_size());

        Completion::Applied(self.state)
    }

    /// Runs one full search round: exactly one gateway call chosen by mode.
    pub async fn submit<G>(&mut self, gateway: &G) -> Completion
    where
        G: MemoGateway + ?Sized,
    {
        let ticket = self.begin_search();
        let outcome = match ticket.mode {
            SearchMode::Semantic => {
                gateway
                    .search_memos(&ticket.query, self.config.search_limit())
                    .await
            }
            SearchMode::Exact => gateway.list_memos().await,
        };
        self.complete(ticket, outcome)
    }
}

#[cfg(test)]
#[path = "tests/search_session_tests.rs"]
mod tests;
