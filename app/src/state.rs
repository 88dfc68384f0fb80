//! Application state management

use anyhow::{Context, Result};
use std::sync::Arc;

use crate::client::{HttpLookupClient, LookupService};
use crate::config::ClientConfig;
use crate::paths::{ensure_data_dir, settings_db_path};
use crate::query::SearchRequest;
use crate::screens::{HomeScreen, ResultsScreen};
use crate::speech::{LogSpeaker, Speaker};
use crate::store::{KeyValueStore, MemoryStore, SqliteStore};

/// Long-lived collaborators shared by every screen
pub struct AppState {
    pub config: ClientConfig,
    pub lookup: Arc<dyn LookupService>,
    pub store: Arc<dyn KeyValueStore>,
    pub speaker: Arc<dyn Speaker>,
}

impl AppState {
    /// Initialize application state. A settings database that cannot be
    /// opened is not fatal: the session falls back to in-memory storage.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let lookup = HttpLookupClient::new(config.api_url.clone(), config.request_timeout)
            .context("Failed to create lookup client")?;

        let store: Arc<dyn KeyValueStore> = match Self::open_settings(&config) {
            Ok(store) => Arc::new(store),
            Err(e) => {
                tracing::warn!(error = %e, "settings storage unavailable, history will not persist");
                Arc::new(MemoryStore::new())
            }
        };

        tracing::info!(api_url = %config.api_url, data_dir = ?config.data_dir, "app state initialized");

        Ok(Self {
            config,
            lookup: Arc::new(lookup),
            store,
            speaker: Arc::new(LogSpeaker),
        })
    }

    fn open_settings(config: &ClientConfig) -> Result<SqliteStore> {
        ensure_data_dir(&config.data_dir)?;
        let path = settings_db_path(&config.data_dir);
        SqliteStore::open(&path).with_context(|| format!("Failed to open settings at {:?}", path))
    }

    pub fn home_screen(&self) -> HomeScreen {
        HomeScreen::mount(Arc::clone(&self.lookup), Arc::clone(&self.store), &self.config)
    }

    pub fn results_screen(&self, request: SearchRequest) -> ResultsScreen {
        ResultsScreen::mount(
            request,
            Arc::clone(&self.lookup),
            Arc::clone(&self.store),
            Arc::clone(&self.speaker),
        )
    }
}
