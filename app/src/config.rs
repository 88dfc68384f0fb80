//! Client configuration from environment variables

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::paths::get_data_dir;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:3000";
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;
pub const DEFAULT_HISTORY_LIMIT: usize = 5;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the lookup API, without the `/word` path
    pub api_url: String,
    /// Quiet period after the last keystroke before suggestions are fetched
    pub debounce: Duration,
    pub request_timeout: Duration,
    pub history_limit: usize,
    pub data_dir: PathBuf,
}

impl ClientConfig {
    pub fn from_env() -> Self {
        let api_url = env::var("SHABDA_API_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let debounce_ms = parse_var("SHABDA_DEBOUNCE_MS").unwrap_or(DEFAULT_DEBOUNCE_MS);

        let timeout_secs =
            parse_var("SHABDA_REQUEST_TIMEOUT_SECS").unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);

        let history_limit = parse_var("SHABDA_HISTORY_LIMIT")
            .filter(|limit: &usize| *limit > 0)
            .unwrap_or(DEFAULT_HISTORY_LIMIT);

        Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            debounce: Duration::from_millis(debounce_ms),
            request_timeout: Duration::from_secs(timeout_secs),
            history_limit,
            data_dir: get_data_dir(),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            history_limit: DEFAULT_HISTORY_LIMIT,
            data_dir: PathBuf::from("data"),
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}
