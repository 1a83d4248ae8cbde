use std::time::Duration;

use async_trait::async_trait;
use lexi_core::{DictionaryService, LookupError};
use lexi_types::LookupResult;
use reqwest::{StatusCode, Url};

use crate::wire::WireEntry;

/// Client for `{base}/{language}/{word}` dictionary lookups
#[derive(Clone)]
pub struct DictionaryClient {
    client: reqwest::Client,
    base_url: String,
}

impl DictionaryClient {
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

    fn entry_url(&self, word: &str, language_code: &str) -> Result<Url, LookupError> {
        if word.is_empty() || language_code.is_empty() {
            return Err(LookupError::InvalidRequest(
                "word and language code must not be empty".to_string(),
            ));
        }

        let raw = format!(
            "{}/{}/{}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(language_code),
            urlencoding::encode(word)
        );

        Url::parse(&raw).map_err(|e| LookupError::InvalidRequest(format!("{raw}: {e}")))
    }

    /// Fetch the first entry for `word`
    pub async fn fetch_entry(
        &self,
        word: &str,
        language_code: &str,
    ) -> Result<LookupResult, LookupError> {
        let url = self.entry_url(word, language_code)?;
        tracing::debug!("GET {url}");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| LookupError::RequestFailed(e.to_string()))?;

        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(LookupError::EmptyResults {
                word: word.to_string(),
            });
        }

        if !status.is_success() {
            return Err(LookupError::RequestFailed(format!("HTTP {status}")));
        }

        let entries: Vec<WireEntry> = response
            .json()
            .await
            .map_err(|e| LookupError::RequestFailed(format!("Failed to parse response: {e}")))?;

        tracing::debug!("{} entries for '{word}' ({language_code})", entries.len());

        entries
            .into_iter()
            .next()
            .map(LookupResult::from)
            .ok_or_else(|| LookupError::EmptyResults {
                word: word.to_string(),
            })
    }
}

#[async_trait]
impl DictionaryService for DictionaryClient {
    async fn fetch_entry(
        &self,
        word: &str,
        language_code: &str,
    ) -> Result<LookupResult, LookupError> {
        DictionaryClient::fetch_entry(self, word, language_code).await
    }
}
