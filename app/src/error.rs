//! Error types for Shabda

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShabdaError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Lookup API error: {0}")]
    Api(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

impl From<reqwest::Error> for ShabdaError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ShabdaError::Decode(e.to_string())
        } else {
            ShabdaError::Network(e.to_string())
        }
    }
}

impl From<rusqlite::Error> for ShabdaError {
    fn from(e: rusqlite::Error) -> Self {
        ShabdaError::Database(e.to_string())
    }
}

impl serde::Serialize for ShabdaError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_display_string() {
        let err = ShabdaError::Api("lookup failed".to_string());
        let json = serde_json::to_string(&err).unwrap();
        assert_eq!(json, "\"Lookup API error: lookup failed\"");
    }
}
