//! Controller tests against in-memory fakes of the remote services

mod event_loop_tests;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use kanal::AsyncReceiver;
use lexi_config::search::SearchConfig;
use lexi_core::{DictionaryService, LookupError, Preferences, SuggestionService};
use lexi_types::{Definition, LookupErrorKind, LookupResult, Meaning};
use tokio_util::sync::CancellationToken;

use crate::search::{Completion, SearchController, Services};

type Scripted = (Duration, Result<LookupResult, LookupErrorKind>);

/// Dictionary answering from a script; unknown words are not found
#[derive(Default)]
pub struct FakeDictionary {
    responses: HashMap<String, Scripted>,
    calls: Mutex<Vec<(String, String)>>,
}

impl FakeDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(
        mut self,
        word: &str,
        delay: Duration,
        outcome: Result<LookupResult, LookupErrorKind>,
    ) -> Self {
        self.responses.insert(word.to_string(), (delay, outcome));
        self
    }

    /// `(word, language_code)` of every request, in order
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl DictionaryService for FakeDictionary {
    async fn fetch_entry(
        &self,
        word: &str,
        language_code: &str,
    ) -> Result<LookupResult, LookupError> {
        self.calls
            .lock()
            .unwrap()
            .push((word.to_string(), language_code.to_string()));

        let (delay, outcome) = self
            .responses
            .get(word)
            .cloned()
            .unwrap_or((Duration::ZERO, Err(LookupErrorKind::EmptyResults)));

        tokio::time::sleep(delay).await;

        outcome.map_err(|kind| match kind {
            LookupErrorKind::InvalidRequest => LookupError::InvalidRequest("bad".into()),
            LookupErrorKind::RequestFailed => LookupError::RequestFailed("offline".into()),
            LookupErrorKind::EmptyResults => LookupError::EmptyResults {
                word: word.to_string(),
            },
        })
    }
}

/// Suggestion service returning a fixed list
#[derive(Default)]
pub struct FakeSuggestions {
    words: Vec<String>,
    calls: Mutex<Vec<String>>,
}

impl FakeSuggestions {
    pub fn with_words(words: &[&str]) -> Self {
        Self {
            words: words.iter().map(|w| w.to_string()).collect(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Prefixes requested, in order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SuggestionService for FakeSuggestions {
    async fn fetch_suggestions(&self, prefix: &str, limit: usize) -> Vec<String> {
        self.calls.lock().unwrap().push(prefix.to_string());
        self.words.iter().take(limit).cloned().collect()
    }
}

pub fn entry(word: &str, phonetic: Option<&str>, definition: &str) -> LookupResult {
    LookupResult {
        word: word.to_string(),
        phonetic: phonetic.map(str::to_string),
        meanings: vec![Meaning {
            part_of_speech: Some("noun".to_string()),
            definitions: vec![Definition {
                text: definition.to_string(),
                example: None,
            }],
        }],
        source_urls: vec![],
    }
}

pub fn controller_with(
    dictionary: Arc<FakeDictionary>,
    suggestions: Arc<FakeSuggestions>,
    preferences: Preferences,
    settings: SearchConfig,
) -> SearchController {
    SearchController::new(
        Services {
            dictionary,
            suggestions,
        },
        preferences,
        settings,
        CancellationToken::new(),
    )
}

pub fn controller(
    dictionary: Arc<FakeDictionary>,
    suggestions: Arc<FakeSuggestions>,
) -> SearchController {
    controller_with(
        dictionary,
        suggestions,
        Preferences::in_memory(),
        SearchConfig::default(),
    )
}

pub async fn next_completion(rx: &AsyncReceiver<Completion>) -> Completion {
    tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("completion should arrive")
        .expect("completion channel open")
}

/// True when nothing arrives within a generous window
pub async fn stays_quiet(rx: &AsyncReceiver<Completion>) -> bool {
    tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .is_err()
}
