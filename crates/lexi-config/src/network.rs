use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};

fn default_dictionary_url() -> String {
    "https://api.dictionaryapi.dev/api/v2/entries".to_string()
}

fn default_suggestion_url() -> String {
    "https://api.datamuse.com/sug".to_string()
}

fn default_request_timeout_ms() -> u64 {
    10_000
}

/// Remote API endpoints
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct NetworkConfig {
    /// Base of `{base}/{language}/{word}` lookups
    #[serde(default = "default_dictionary_url")]
    pub dictionary_url: String,
    /// Base of `{base}?s={prefix}&max={limit}` suggestions
    #[serde(default = "default_suggestion_url")]
    pub suggestion_url: String,
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            dictionary_url: default_dictionary_url(),
            suggestion_url: default_suggestion_url(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

impl NetworkConfig {
    pub fn new() -> Self {
        let dictionary_url =
            env::var("LEXI_DICTIONARY_URL").unwrap_or_else(|_| default_dictionary_url());

        let suggestion_url =
            env::var("LEXI_SUGGESTION_URL").unwrap_or_else(|_| default_suggestion_url());

        let request_timeout_ms = env::var("LEXI_REQUEST_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_request_timeout_ms);

        Self {
            dictionary_url,
            suggestion_url,
            request_timeout_ms,
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}
