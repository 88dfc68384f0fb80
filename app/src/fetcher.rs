//! Suggestion/result fetching
//!
//! Failures never reach the caller: they become an empty list and a log
//! line. Every fetch takes a request id and only the newest id may write
//! its result, so a slow earlier response cannot overwrite a newer one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;

use crate::client::LookupService;
use crate::entry::DictionaryEntry;
use crate::query::SearchRequest;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuggestionState {
    pub entries: Vec<DictionaryEntry>,
    /// The newest request has not completed yet
    pub in_flight: bool,
}

pub struct SuggestionFetcher {
    service: Arc<dyn LookupService>,
    state: watch::Sender<SuggestionState>,
    latest: AtomicU64,
}

impl SuggestionFetcher {
    pub fn new(service: Arc<dyn LookupService>) -> Self {
        let (state, _) = watch::channel(SuggestionState::default());
        Self {
            service,
            state,
            latest: AtomicU64::new(0),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<SuggestionState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> SuggestionState {
        self.state.borrow().clone()
    }

    /// Empty the list and invalidate anything still in flight
    pub fn clear(&self) {
        self.latest.fetch_add(1, Ordering::SeqCst);
        self.state.send_modify(|state| {
            state.entries.clear();
            state.in_flight = false;
        });
    }

    pub async fn fetch(&self, request: &SearchRequest) {
        if request.is_empty() {
            self.clear();
            return;
        }

        let id = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.send_modify(|state| state.in_flight = true);
        let _in_flight = InFlight { fetcher: self, id };

        let entries = match self.service.lookup(request).await {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(term = request.term(), error = %e, "lookup failed");
                Vec::new()
            }
        };

        if self.latest.load(Ordering::SeqCst) != id {
            tracing::debug!(request_id = id, term = request.term(), "discarding stale response");
            return;
        }

        self.state.send_modify(|state| {
            state.entries = entries;
            state.in_flight = false;
        });
    }
}

/// Clears `in_flight` when a fetch ends by any path, including the future
/// being dropped mid-lookup, as long as no newer request has started.
struct InFlight<'a> {
    fetcher: &'a SuggestionFetcher,
    id: u64,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.fetcher.latest.load(Ordering::SeqCst) != self.id {
            return;
        }
        self.fetcher.state.send_if_modified(|state| {
            let was_in_flight = state.in_flight;
            state.in_flight = false;
            was_in_flight
        });
    }
}
