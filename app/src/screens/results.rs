//! Results screen: full entries for a confirmed search, favorites and
//! pronunciation

use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::client::LookupService;
use crate::entry::DictionaryEntry;
use crate::favorites::Favorites;
use crate::fetcher::{SuggestionFetcher, SuggestionState};
use crate::query::SearchRequest;
use crate::speech::{Speaker, SpeechSettings};
use crate::store::KeyValueStore;

pub struct ResultsScreen {
    request: SearchRequest,
    fetcher: Arc<SuggestionFetcher>,
    initial_load: Option<JoinHandle<()>>,
    favorites: Favorites,
    speaker: Arc<dyn Speaker>,
    speech: SpeechSettings,
}

impl ResultsScreen {
    /// Load favorites and start the same lookup the home screen previewed.
    /// Returns before the lookup finishes; watch `subscribe` or await
    /// `loaded`. Must be called from within a tokio runtime.
    pub fn mount(
        request: SearchRequest,
        service: Arc<dyn LookupService>,
        store: Arc<dyn KeyValueStore>,
        speaker: Arc<dyn Speaker>,
    ) -> Self {
        let fetcher = Arc::new(SuggestionFetcher::new(service));

        let initial_load = {
            let fetcher = Arc::clone(&fetcher);
            let request = request.clone();
            tokio::spawn(async move { fetcher.fetch(&request).await })
        };

        Self {
            request,
            fetcher,
            initial_load: Some(initial_load),
            favorites: Favorites::load(store),
            speaker,
            speech: SpeechSettings::default(),
        }
    }

    /// Wait for the lookup started by `mount`
    pub async fn loaded(&mut self) {
        if let Some(task) = self.initial_load.take() {
            if let Err(e) = task.await {
                tracing::warn!(term = self.request.term(), error = %e, "results load task failed");
            }
        }
    }

    pub fn request(&self) -> &SearchRequest {
        &self.request
    }

    pub fn results(&self) -> Vec<DictionaryEntry> {
        self.fetcher.snapshot().entries
    }

    pub fn is_loading(&self) -> bool {
        let starting = self.initial_load.as_ref().is_some_and(|task| !task.is_finished());
        starting || self.fetcher.snapshot().in_flight
    }

    pub fn subscribe(&self) -> watch::Receiver<SuggestionState> {
        self.fetcher.subscribe()
    }

    pub fn favorites(&self) -> &[String] {
        self.favorites.terms()
    }

    pub fn is_favorite(&self, headword: &str) -> bool {
        self.favorites.contains(headword)
    }

    /// Returns whether the headword is a favorite afterwards
    pub fn toggle_favorite(&mut self, headword: &str) -> bool {
        match self.favorites.toggle(headword) {
            Ok(now_favorite) => now_favorite,
            Err(e) => {
                tracing::warn!(headword, error = %e, "failed to persist favorites");
                self.favorites.contains(headword)
            }
        }
    }

    pub fn speak(&self, entry: &DictionaryEntry) {
        self.speaker.speak(&entry.headword, &self.speech);
    }
}

impl Drop for ResultsScreen {
    fn drop(&mut self) {
        if let Some(task) = self.initial_load.take() {
            task.abort();
        }
    }
}
