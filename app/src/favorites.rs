//! Favorited headwords

use std::sync::Arc;

use crate::error::ShabdaError;
use crate::store::{load_string_list, save_string_list, KeyValueStore};

pub const FAVORITES_KEY: &str = "favorites";

/// Set of favorited headwords. Kept in insertion order so the stored array
/// is stable between writes.
pub struct Favorites {
    terms: Vec<String>,
    store: Arc<dyn KeyValueStore>,
}

impl Favorites {
    pub fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let mut terms: Vec<String> = Vec::new();
        for term in load_string_list(store.as_ref(), FAVORITES_KEY) {
            if !terms.contains(&term) {
                terms.push(term);
            }
        }

        tracing::debug!(count = terms.len(), "favorites loaded");
        Self { terms, store }
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn contains(&self, term: &str) -> bool {
        self.terms.iter().any(|t| t == term)
    }

    /// Add the term if absent, remove it if present, then persist.
    /// Returns whether the term is a favorite afterwards.
    pub fn toggle(&mut self, term: &str) -> Result<bool, ShabdaError> {
        let now_favorite = match self.terms.iter().position(|t| t == term) {
            Some(idx) => {
                self.terms.remove(idx);
                false
            }
            None => {
                self.terms.push(term.to_string());
                true
            }
        };

        save_string_list(self.store.as_ref(), FAVORITES_KEY, &self.terms)?;
        Ok(now_favorite)
    }
}
