use lexi_types::LookupResult;

use crate::error::LookupError;

/// Remote dictionary lookup
#[async_trait::async_trait]
pub trait DictionaryService: Send + Sync {
    /// Look up `word` in the dictionary for `language_code`.
    ///
    /// `word` is expected to be trimmed and non-empty.
    async fn fetch_entry(&self, word: &str, language_code: &str)
    -> Result<LookupResult, LookupError>;
}

/// Remote word completion
#[async_trait::async_trait]
pub trait SuggestionService: Send + Sync {
    /// Up to `limit` completions for `prefix`, in server order.
    ///
    /// Failures yield an empty list.
    async fn fetch_suggestions(&self, prefix: &str, limit: usize) -> Vec<String>;
}
