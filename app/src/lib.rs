//! Shabda - Sanskrit and Ayurveda dictionary lookup
//!
//! Client core: debounced suggestions, lookup over the remote API, and
//! locally persisted search history and favorites.

pub mod error;
pub mod config;
pub mod paths;
pub mod entry;
pub mod query;
pub mod store;
pub mod history;
pub mod favorites;
pub mod debounce;
pub mod client;
pub mod fetcher;
pub mod speech;
pub mod screens;
pub mod state;

pub use error::ShabdaError;
pub use config::ClientConfig;
pub use entry::{DictionaryEntry, LookupResponse};
pub use query::{normalize_term, FilterSelection, FilterTag, SearchRequest};
pub use store::{KeyValueStore, MemoryStore, SqliteStore};
pub use history::SearchHistory;
pub use favorites::Favorites;
pub use debounce::Debouncer;
pub use client::{HttpLookupClient, LookupService};
pub use fetcher::{SuggestionFetcher, SuggestionState};
pub use speech::{LogSpeaker, Speaker, SpeechSettings};
pub use screens::{HomeScreen, ResultsScreen};
pub use state::AppState;
