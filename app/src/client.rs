//! Lookup API client

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

use crate::entry::{DictionaryEntry, LookupResponse};
use crate::error::ShabdaError;
use crate::query::SearchRequest;

/// Anything that can answer a `SearchRequest`
#[async_trait]
pub trait LookupService: Send + Sync {
    async fn lookup(&self, request: &SearchRequest) -> Result<Vec<DictionaryEntry>, ShabdaError>;
}

#[derive(Serialize)]
struct WordQuery<'a> {
    word: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    filter: Option<&'static str>,
}

/// `GET {base_url}/word?word=..&filter=..`
#[derive(Clone)]
pub struct HttpLookupClient {
    client: Client,
    base_url: String,
}

impl HttpLookupClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ShabdaError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ShabdaError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl LookupService for HttpLookupClient {
    async fn lookup(&self, request: &SearchRequest) -> Result<Vec<DictionaryEntry>, ShabdaError> {
        let url = format!("{}/word", self.base_url);
        let query = WordQuery {
            word: request.term(),
            filter: request.filter().map(|f| f.as_str()),
        };

        tracing::debug!(term = request.term(), filter = ?query.filter, "lookup request");

        let response = self.client.get(&url).query(&query).send().await?;

        if !response.status().is_success() {
            return Err(ShabdaError::Api(format!("HTTP {}", response.status())));
        }

        let body: LookupResponse = response.json().await?;

        if !body.success {
            return Err(ShabdaError::Api(
                body.error.unwrap_or_else(|| "lookup reported failure".to_string()),
            ));
        }

        tracing::debug!(count = body.results.len(), "lookup response");
        Ok(body.results)
    }
}
