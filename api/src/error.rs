//! Error types for the lookup server

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LexiconError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Import error: {0}")]
    Import(String),
}
