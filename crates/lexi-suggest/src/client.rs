use std::time::Duration;

use async_trait::async_trait;
use lexi_core::SuggestionService;
use reqwest::Url;
use serde::Deserialize;

/// Client for `{base}?s={prefix}&max={limit}` word suggestions.
///
/// Suggestions are an enhancement only: every failure is logged and turned
/// into an empty list.
#[derive(Clone)]
pub struct SuggestionClient {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Deserialize)]
struct WireSuggestion {
    #[serde(default)]
    word: String,
}

impl SuggestionClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Up to `limit` completions for `prefix`, in server order
    pub async fn fetch_suggestions(&self, prefix: &str, limit: usize) -> Vec<String> {
        let limit_param = limit.to_string();
        let url = match Url::parse_with_params(
            &self.base_url,
            &[("s", prefix), ("max", limit_param.as_str())],
        ) {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!("Invalid suggestion endpoint {}: {}", self.base_url, e);
                return Vec::new();
            }
        };

        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!("Suggestion request failed: {}", e);
                return Vec::new();
            }
        };

        if !response.status().is_success() {
            tracing::debug!("Suggestion request returned HTTP {}", response.status());
            return Vec::new();
        }

        match response.json::<Vec<WireSuggestion>>().await {
            Ok(items) => items
                .into_iter()
                .map(|item| item.word)
                .filter(|word| !word.trim().is_empty())
                .take(limit)
                .collect(),
            Err(e) => {
                tracing::debug!("Failed to parse suggestions: {}", e);
                Vec::new()
            }
        }
    }
}

#[async_trait]
impl SuggestionService for SuggestionClient {
    async fn fetch_suggestions(&self, prefix: &str, limit: usize) -> Vec<String> {
        SuggestionClient::fetch_suggestions(self, prefix, limit).await
    }
}
