//! Search/home screen: input, filter chips, suggestions and recent searches

use std::sync::Arc;
use tokio::sync::watch;

use crate::client::LookupService;
use crate::config::ClientConfig;
use crate::debounce::Debouncer;
use crate::entry::DictionaryEntry;
use crate::fetcher::{SuggestionFetcher, SuggestionState};
use crate::history::SearchHistory;
use crate::query::{FilterSelection, FilterTag, SearchRequest};
use crate::store::KeyValueStore;

pub struct HomeScreen {
    query: String,
    filter: FilterSelection,
    fetcher: Arc<SuggestionFetcher>,
    debouncer: Debouncer<SearchRequest>,
    history: SearchHistory,
}

impl HomeScreen {
    pub fn mount(
        service: Arc<dyn LookupService>,
        store: Arc<dyn KeyValueStore>,
        config: &ClientConfig,
    ) -> Self {
        let fetcher = Arc::new(SuggestionFetcher::new(service));

        let debouncer = {
            let fetcher = Arc::clone(&fetcher);
            Debouncer::new(config.debounce, move |request: SearchRequest| {
                let fetcher = Arc::clone(&fetcher);
                async move { fetcher.fetch(&request).await }
            })
        };

        Self {
            query: String::new(),
            filter: FilterSelection::default(),
            fetcher,
            debouncer,
            history: SearchHistory::load(store, config.history_limit),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn filter(&self) -> Option<FilterTag> {
        self.filter.active()
    }

    pub fn suggestions(&self) -> SuggestionState {
        self.fetcher.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<SuggestionState> {
        self.fetcher.subscribe()
    }

    pub fn history(&self) -> &[String] {
        self.history.terms()
    }

    fn current_request(&self) -> SearchRequest {
        SearchRequest::new(&self.query, self.filter.active())
    }

    /// Keystrokes go through the debouncer; blank input clears the list
    /// right away.
    pub fn on_input_change(&mut self, text: &str) {
        self.query = text.to_string();

        let request = self.current_request();
        if request.is_empty() {
            self.debouncer.cancel();
            self.fetcher.clear();
            return;
        }

        self.debouncer.trigger(request);
    }

    /// Filter changes are deliberate, so they fetch immediately and replace
    /// any pending debounced call.
    pub async fn toggle_filter(&mut self, tag: FilterTag) -> Option<FilterTag> {
        let active = self.filter.toggle(tag);
        tracing::debug!(filter = ?active, "filter changed");

        let request = self.current_request();
        if !request.is_empty() {
            self.debouncer.cancel();
            self.fetcher.fetch(&request).await;
        }

        active
    }

    /// Confirm the typed query. Returns the request to open the results
    /// screen with, or `None` for blank input.
    pub fn submit(&mut self) -> Option<SearchRequest> {
        let request = self.current_request();
        if request.is_empty() {
            return None;
        }
        Some(self.confirm(request))
    }

    pub fn select_suggestion(&mut self, entry: &DictionaryEntry) -> Option<SearchRequest> {
        self.select_term(&entry.headword)
    }

    pub fn select_history(&mut self, term: &str) -> Option<SearchRequest> {
        self.select_term(term)
    }

    pub fn clear_history(&mut self) {
        if let Err(e) = self.history.clear() {
            tracing::warn!(error = %e, "failed to persist cleared history");
        }
    }

    fn select_term(&mut self, term: &str) -> Option<SearchRequest> {
        let request = SearchRequest::new(term, self.filter.active());
        if request.is_empty() {
            return None;
        }
        self.query = request.term().to_string();
        Some(self.confirm(request))
    }

    fn confirm(&mut self, request: SearchRequest) -> SearchRequest {
        self.debouncer.cancel();
        if let Err(e) = self.history.record(request.term()) {
            tracing::warn!(term = request.term(), error = %e, "failed to persist search history");
        }
        request
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetcher::tests::{entry, FakeLookup};
    use crate::history::HISTORY_KEY;
    use crate::store::MemoryStore;
    use std::time::Duration;

    fn mount(service: Arc<FakeLookup>, store: Arc<MemoryStore>) -> HomeScreen {
        HomeScreen::mount(service, store, &ClientConfig::default())
    }

    async fn settle(ms: u64) {
        tokio::time::sleep(Duration::from_millis(ms)).await;
        tokio::task::yield_now().await;
    }

    #[tokio::test(start_paused = true)]
    async fn typing_fetches_once_after_pause() {
        let service = Arc::new(FakeLookup::default());
        service.answer("अश्वगंधा", vec![entry("अश्वगंधा")]);
        let mut screen = mount(service.clone(), Arc::new(MemoryStore::new()));

        for text in ["अ", "अश्व", "अश्वगं", "अश्वगंधा"] {
            screen.on_input_change(text);
            settle(50).await;
        }
        settle(600).await;

        let requests = service.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0], SearchRequest::new("अश्वगंधा", None));
        assert_eq!(screen.suggestions().entries.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn blank_input_clears_without_fetching() {
        let service = Arc::new(FakeLookup::default());
        let mut screen = mount(service.clone(), Arc::new(MemoryStore::new()));

        screen.on_input_change("वा");
        screen.on_input_change("  ");
        settle(1000).await;

        assert!(service.requests().is_empty());
        assert!(screen.suggestions().entries.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn filter_change_fetches_immediately() {
        let service = Arc::new(FakeLookup::default());
        service.answer("ज्वर", vec![entry("ज्वर")]);
        let mut screen = mount(service.clone(), Arc::new(MemoryStore::new()));

        screen.on_input_change("ज्वर");
        let active = screen.toggle_filter(FilterTag::Definition).await;
        assert_eq!(active, Some(FilterTag::Definition));

        // The debounced call was replaced by the immediate one
        settle(1000).await;
        let requests = service.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].filter(), Some(FilterTag::Definition));
        assert_eq!(screen.suggestions().entries.len(), 1);

        assert_eq!(screen.toggle_filter(FilterTag::Definition).await, None);
        assert_eq!(service.requests().last().unwrap().filter(), None);
    }

    #[tokio::test]
    async fn filter_change_without_term_does_not_fetch() {
        let service = Arc::new(FakeLookup::default());
        let mut screen = mount(service.clone(), Arc::new(MemoryStore::new()));

        screen.toggle_filter(FilterTag::Headword).await;
        assert_eq!(screen.toggle_filter(FilterTag::Reference).await, Some(FilterTag::Reference));
        assert!(service.requests().is_empty());
    }

    #[tokio::test]
    async fn submit_records_history_and_returns_request() {
        let store = Arc::new(MemoryStore::new());
        let mut screen = mount(Arc::new(FakeLookup::default()), store.clone());

        screen.on_input_change(" गुडूची ");
        screen.toggle_filter(FilterTag::Headword).await;
        let request = screen.submit().unwrap();

        assert_eq!(request, SearchRequest::new("गुडूची", Some(FilterTag::Headword)));
        assert_eq!(screen.history(), ["गुडूची"]);
        assert_eq!(store.get(HISTORY_KEY).unwrap().as_deref(), Some("[\"गुडूची\"]"));
    }

    #[tokio::test]
    async fn blank_submit_goes_nowhere() {
        let store = Arc::new(MemoryStore::new());
        let mut screen = mount(Arc::new(FakeLookup::default()), store.clone());
        assert!(screen.submit().is_none());
        assert!(screen.history().is_empty());
    }

    #[tokio::test]
    async fn history_and_suggestion_taps_update_history() {
        let store = Arc::new(MemoryStore::new());
        let mut screen = mount(Arc::new(FakeLookup::default()), store.clone());

        screen.select_suggestion(&entry("वात")).unwrap();
        screen.select_suggestion(&entry("पित्त")).unwrap();
        let request = screen.select_history("वात").unwrap();

        assert_eq!(request.term(), "वात");
        assert_eq!(screen.query(), "वात");
        assert_eq!(screen.history(), ["वात", "पित्त"]);

        let remounted = mount(Arc::new(FakeLookup::default()), store);
        assert_eq!(remounted.history(), ["वात", "पित्त"]);
    }

    #[tokio::test]
    async fn clear_history_empties_list() {
        let store = Arc::new(MemoryStore::new());
        let mut screen = mount(Arc::new(FakeLookup::default()), store);
        screen.select_history("कफ");
        screen.clear_history();
        assert!(screen.history().is_empty());
    }
}
