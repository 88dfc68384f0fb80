//! Recent searches, most recent first

use std::sync::Arc;

use crate::error::ShabdaError;
use crate::query::normalize_term;
use crate::store::{load_string_list, save_string_list, KeyValueStore};

pub const HISTORY_KEY: &str = "search_history";

/// Move `term` to the front of `terms`, dropping any older copy, and keep at
/// most `limit` entries.
pub fn push_recent(terms: &mut Vec<String>, term: &str, limit: usize) {
    terms.retain(|t| t != term);
    terms.insert(0, term.to_string());
    terms.truncate(limit);
}

pub struct SearchHistory {
    terms: Vec<String>,
    limit: usize,
    store: Arc<dyn KeyValueStore>,
}

impl SearchHistory {
    /// Load the persisted list. Never fails: anything unreadable is treated
    /// as a first run.
    pub fn load(store: Arc<dyn KeyValueStore>, limit: usize) -> Self {
        let mut terms = Vec::new();
        for term in load_string_list(store.as_ref(), HISTORY_KEY).into_iter().rev() {
            push_recent(&mut terms, &term, limit);
        }

        tracing::debug!(count = terms.len(), "search history loaded");
        Self { terms, limit, store }
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Record a confirmed search. The in-memory list is updated before the
    /// write, so it stays current even if persisting fails.
    pub fn record(&mut self, term: &str) -> Result<(), ShabdaError> {
        let term = normalize_term(term);
        if term.is_empty() {
            return Ok(());
        }

        push_recent(&mut self.terms, &term, self.limit);
        save_string_list(self.store.as_ref(), HISTORY_KEY, &self.terms)
    }

    pub fn clear(&mut self) -> Result<(), ShabdaError> {
        self.terms.clear();
        save_string_list(self.store.as_ref(), HISTORY_KEY, &self.terms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn empty_history() -> (Arc<MemoryStore>, SearchHistory) {
        let store = Arc::new(MemoryStore::new());
        let history = SearchHistory::load(store.clone(), 5);
        (store, history)
    }

    #[test]
    fn keeps_five_most_recent() {
        let (_, mut history) = empty_history();
        for term in ["अ", "ब", "क", "ड", "इ", "फ"] {
            history.record(term).unwrap();
        }
        assert_eq!(history.terms(), ["फ", "इ", "ड", "क", "ब"]);
    }

    #[test]
    fn recording_most_recent_again_changes_nothing() {
        let (_, mut history) = empty_history();
        history.record("वात").unwrap();
        history.record("पित्त").unwrap();
        let before = history.terms().to_vec();

        history.record("पित्त").unwrap();
        assert_eq!(history.terms(), before.as_slice());
    }

    #[test]
    fn existing_term_moves_to_front() {
        let (_, mut history) = empty_history();
        for term in ["वात", "पित्त", "कफ"] {
            history.record(term).unwrap();
        }
        history.record("वात").unwrap();
        assert_eq!(history.terms(), ["वात", "कफ", "पित्त"]);
    }

    #[test]
    fn never_duplicates_or_overflows() {
        let (_, mut history) = empty_history();
        let terms = ["a", "b", "a", "c", "d", "b", "e", "f", "a", "g", "c"];
        for term in terms {
            history.record(term).unwrap();
            let mut seen = history.terms().to_vec();
            seen.sort();
            seen.dedup();
            assert_eq!(seen.len(), history.terms().len());
            assert!(history.terms().len() <= 5);
        }
    }

    #[test]
    fn blank_terms_are_ignored() {
        let (store, mut history) = empty_history();
        history.record("   ").unwrap();
        assert!(history.is_empty());
        assert_eq!(store.get(HISTORY_KEY).unwrap(), None);
    }

    #[test]
    fn persists_after_each_record_and_reloads() {
        let (store, mut history) = empty_history();
        history.record("अश्वगंधा").unwrap();
        history.record("गुडूची").unwrap();

        assert_eq!(
            store.get(HISTORY_KEY).unwrap().as_deref(),
            Some("[\"गुडूची\",\"अश्वगंधा\"]")
        );

        let reloaded = SearchHistory::load(store, 5);
        assert_eq!(reloaded.terms(), ["गुडूची", "अश्वगंधा"]);
    }

    #[test]
    fn load_repairs_oversized_stored_list() {
        let store = Arc::new(MemoryStore::new());
        store
            .set(HISTORY_KEY, r#"["a","b","a","c","d","e","f"]"#)
            .unwrap();

        let history = SearchHistory::load(store, 5);
        assert_eq!(history.terms(), ["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn clear_persists_empty_list() {
        let (store, mut history) = empty_history();
        history.record("कफ").unwrap();
        history.clear().unwrap();
        assert!(history.is_empty());
        assert_eq!(store.get(HISTORY_KEY).unwrap().as_deref(), Some("[]"));
    }
}
