use super::{CrowdSource, ScanResult};
use crate::domain::{Coordinates, Place};
use crate::error::ScanError;

/// The only failure text a user ever sees, whatever the cause
pub const SCAN_FAILED_MESSAGE: &str = "Scan failed. Unable to retrieve crowd telemetry.";

/// Identifies one started search; completions for older tickets are stale
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SearchTicket(u64);

#[derive(Debug, Clone, PartialEq, Default)]
pub enum SearchState {
    #[default]
    Idle,
    Searching {
        ticket: SearchTicket,
        query: String,
    },
    Succeeded(ScanResult),
    Failed(String),
}

/// State container for one interactive session.
///
/// Owned by the top-level shell and passed down by reference. Holds the
/// startup location fix (fixed for the session) and the displayed result,
/// which is replaced wholesale by each search.
#[derive(Debug, Default)]
pub struct SearchSession {
    location: Option<Coordinates>,
    state: SearchState,
    last_query: Option<String>,
    latest_ticket: u64,
}

impl SearchSession {
    pub fn new(location: Option<Coordinates>) -> Self {
        Self {
            location,
            ..Self::default()
        }
    }

    pub fn location(&self) -> Option<Coordinates> {
        self.location
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn last_query(&self) -> Option<&str> {
        self.last_query.as_deref()
    }

    pub fn has_searched(&self) -> bool {
        self.latest_ticket > 0
    }

    pub fn is_searching(&self) -> bool {
        matches!(self.state, SearchState::Searching { .. })
    }

    /// Places currently on display; empty unless the last search succeeded
    pub fn places(&self) -> &[Place] {
        match &self.state {
            SearchState::Succeeded(result) => &result.places,
            _ => &[],
        }
    }

    /// Enter the searching state for `query`, clearing any shown results.
    ///
    /// Returns `None` and leaves the state untouched for a blank query.
    pub fn begin(&mut self, query: &str) -> Option<SearchTicket> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }

        self.latest_ticket += 1;
        let ticket = SearchTicket(self.latest_ticket);
        self.last_query = Some(query.to_string());
        self.state = SearchState::Searching {
            ticket,
            query: query.to_string(),
        };

        tracing::info!(query, ticket = ticket.0, "scan started");
        Some(ticket)
    }

    /// Record the outcome of the search identified by `ticket`.
    ///
    /// Outcomes for anything but the most recently started search are
    /// dropped, so a slow earlier response can never overwrite a newer one.
    /// Returns whether the outcome was applied.
    pub fn complete(&mut self, ticket: SearchTicket, outcome: Result<ScanResult, ScanError>) -> bool {
        if ticket.0 != self.latest_ticket {
            tracing::debug!(
                ticket = ticket.0,
                latest = self.latest_ticket,
                "discarding stale scan response"
            );
            return false;
        }

        self.state = match outcome {
            Ok(result) => {
                tracing::info!(places = result.places.len(), "scan finished");
                SearchState::Succeeded(result)
            }
            Err(e) => {
                tracing::error!(error = %e, cause = ?std::error::Error::source(&e), "scan failed");
                SearchState::Failed(SCAN_FAILED_MESSAGE.to_string())
            }
        };
        true
    }

    /// Run a full search against `source`: begin, one call, complete.
    ///
    /// Returns `None` when the query is blank.
    pub fn search<S: CrowdSource + ?Sized>(&mut self, source: &S, query: &str) -> Option<&SearchState> {
        let ticket = self.begin(query)?;
        let outcome = source.scan(query.trim(), self.location);
        self.complete(ticket, outcome);
        Some(&self.state)
    }

    /// Repeat the most recent query, if there is one
    pub fn refresh<S: CrowdSource + ?Sized>(&mut self, source: &S) -> Option<&SearchState> {
        let query = self.last_query.clone()?;
        self.search(source, &query)
    }
}
