use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use lexi_config::search::SearchConfig;
use lexi_core::{
    DefaultPreprocessor, DictionaryService, LookupError, Preferences, Preprocessor,
    SuggestionService,
};
use lexi_types::{
    AppEvent, DictionaryId, ErrorInfo, LookupResult, SearchPhase, SessionSnapshot,
};
use tokio_util::sync::CancellationToken;

use crate::tasks::TaskSlot;

/// Remote collaborators of the search surface
#[derive(Clone)]
pub struct Services {
    pub dictionary: Arc<dyn DictionaryService>,
    pub suggestions: Arc<dyn SuggestionService>,
}

/// Outcome of a background task, tagged with the generation that started it
#[derive(Debug)]
pub enum Completion {
    Suggestions {
        generation: u64,
        words: Vec<String>,
    },
    Lookup {
        generation: u64,
        word: String,
        outcome: Result<LookupResult, LookupError>,
    },
    Reveal {
        generation: u64,
    },
}

/// Message shown in place of results
pub fn user_message(error: &LookupError) -> String {
    match error {
        LookupError::EmptyResults { word } => format!("No definitions found for \"{word}\"."),
        LookupError::RequestFailed(_) => {
            "Couldn't reach the dictionary service. Check your connection and try again."
                .to_string()
        }
        LookupError::InvalidRequest(_) => {
            "That search couldn't be sent. Try a different word.".to_string()
        }
    }
}

/// Owns the search session and is its only mutator.
///
/// Background work (debounced suggestions, lookups, the delayed reveal of
/// meanings) runs in spawned tasks that report back as [`Completion`]s; a
/// completion is applied only while its generation is still current.
pub struct SearchController {
    session: SessionSnapshot,
    settings: SearchConfig,
    preferences: Preferences,
    services: Services,
    preprocessor: DefaultPreprocessor,

    suggestion_task: TaskSlot,
    lookup_task: TaskSlot,
    reveal_task: TaskSlot,

    completion_tx: AsyncSender<Completion>,
    completion_rx: AsyncReceiver<Completion>,
}

impl SearchController {
    pub fn new(
        services: Services,
        preferences: Preferences,
        settings: SearchConfig,
        cancel: CancellationToken,
    ) -> Self {
        let session = SessionSnapshot {
            enabled_dictionaries: preferences.enabled_dictionaries(),
            suggestions_enabled: preferences.suggestions_enabled(),
            ..Default::default()
        };

        let (completion_tx, completion_rx) = kanal::unbounded_async();

        Self {
            session,
            settings,
            preferences,
            services,
            preprocessor: DefaultPreprocessor,
            suggestion_task: TaskSlot::new(cancel.clone()),
            lookup_task: TaskSlot::new(cancel.clone()),
            reveal_task: TaskSlot::new(cancel),
            completion_tx,
            completion_rx,
        }
    }

    pub fn session(&self) -> &SessionSnapshot {
        &self.session
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.session.clone()
    }

    /// Receiver of background task outcomes, to be fed back into [`Self::apply`]
    pub fn completions(&self) -> AsyncReceiver<Completion> {
        self.completion_rx.clone()
    }

    /// Dispatch a presentation event. Returns whether the session changed.
    pub fn handle_event(&mut self, event: AppEvent) -> bool {
        match event {
            AppEvent::QueryChanged(text) => self.query_changed(text),
            AppEvent::Submit => self.submit(),
            AppEvent::SelectSuggestion(word) => self.select_suggestion(word),
            AppEvent::SelectDictionary(id) => self.select_dictionary(id),
            AppEvent::SetDictionaryEnabled { id, enabled } => {
                self.set_dictionary_enabled(id, enabled)
            }
            AppEvent::SetSuggestionsEnabled(enabled) => self.set_suggestions_enabled(enabled),
            AppEvent::Close => false,
        }
    }

    pub fn query_changed(&mut self, text: impl Into<String>) -> bool {
        self.suggestion_task.cancel();
        self.session.suggestions.clear();
        self.session.query = text.into();

        // Length is judged on what the user typed, before NFC composition
        let typed_chars = self.session.query.trim().chars().count();
        let wants_suggestions =
            self.session.suggestions_enabled && typed_chars >= self.settings.min_suggest_chars;
        let prefix = self.preprocessor.process(&self.session.query);

        if self.session.phase != SearchPhase::Loading {
            self.session.phase = if wants_suggestions {
                SearchPhase::Suggesting
            } else {
                SearchPhase::Idle
            };
        }

        if wants_suggestions {
            self.spawn_suggestions(prefix);
        }

        true
    }

    fn spawn_suggestions(&mut self, prefix: String) {
        let (generation, token) = self.suggestion_task.begin();
        let service = Arc::clone(&self.services.suggestions);
        let tx = self.completion_tx.clone();
        let debounce = self.settings.debounce();
        let limit = self.settings.suggestion_limit;

        tokio::spawn(async move {
            let fetch = async {
                tokio::time::sleep(debounce).await;
                tracing::debug!("Fetching suggestions for '{prefix}'");
                service.fetch_suggestions(&prefix, limit).await
            };

            tokio::select! {
                biased;

                _ = token.cancelled() => {
                    tracing::trace!("Suggestion task {generation} cancelled");
                }
                words = fetch => {
                    let _ = tx.send(Completion::Suggestions { generation, words }).await;
                }
            }
        });
    }

    pub fn submit(&mut self) -> bool {
        let word = self.preprocessor.process(&self.session.query);
        if word.is_empty() {
            tracing::debug!("Ignoring submit of empty query");
            return false;
        }

        self.suggestion_task.cancel();
        self.reveal_task.cancel();
        self.session.suggestions.clear();
        self.session.result = None;
        self.session.error = None;
        self.session.details_visible = false;

        let dictionary = self.resolve_dictionary();
        self.session.active_dictionary = dictionary;
        self.session.phase = SearchPhase::Loading;

        tracing::info!("Looking up '{word}' in {dictionary}");

        let (generation, token) = self.lookup_task.begin();
        let service = Arc::clone(&self.services.dictionary);
        let tx = self.completion_tx.clone();
        let language_code = dictionary.language_code();

        tokio::spawn(async move {
            tokio::select! {
                biased;

                _ = token.cancelled() => {
                    tracing::trace!("Lookup task {generation} cancelled");
                }
                outcome = service.fetch_entry(&word, language_code) => {
                    let _ = tx.send(Completion::Lookup { generation, word, outcome }).await;
                }
            }
        });

        true
    }

    /// Put `word` into the search field and look it up
    pub fn select_suggestion(&mut self, word: impl Into<String>) -> bool {
        self.suggestion_task.cancel();
        self.session.suggestions.clear();
        self.session.query = word.into();

        // A blank word submits nothing but the query and list still changed
        if !self.submit() && self.session.phase == SearchPhase::Suggesting {
            self.session.phase = SearchPhase::Idle;
        }
        true
    }

    /// Selected dictionary if still enabled, else the first enabled one
    fn resolve_dictionary(&self) -> DictionaryId {
        let enabled = &self.session.enabled_dictionaries;

        self.session
            .selected_dictionary
            .filter(|id| enabled.contains(id))
            .or_else(|| enabled.first().copied())
            .unwrap_or_default()
    }

    pub fn select_dictionary(&mut self, id: DictionaryId) -> bool {
        if !self.session.enabled_dictionaries.contains(&id) {
            tracing::warn!("Cannot select disabled dictionary {id}");
            return false;
        }

        self.session.selected_dictionary = Some(id);
        true
    }

    pub fn set_dictionary_enabled(&mut self, id: DictionaryId, enabled: bool) -> bool {
        let changed = if enabled {
            self.session.enabled_dictionaries.insert(id)
        } else {
            self.session.enabled_dictionaries.remove(&id)
        };

        if !changed {
            return false;
        }

        if !enabled && self.session.selected_dictionary == Some(id) {
            self.session.selected_dictionary = None;
        }

        if let Err(e) = self
            .preferences
            .set_enabled_dictionaries(&self.session.enabled_dictionaries)
        {
            tracing::error!("Failed to save enabled dictionaries: {e}");
        }

        true
    }

    pub fn set_suggestions_enabled(&mut self, enabled: bool) -> bool {
        if self.session.suggestions_enabled == enabled {
            return false;
        }

        self.session.suggestions_enabled = enabled;

        if !enabled {
            self.suggestion_task.cancel();
            self.session.suggestions.clear();
            if self.session.phase == SearchPhase::Suggesting {
                self.session.phase = SearchPhase::Idle;
            }
        }

        if let Err(e) = self.preferences.set_suggestions_enabled(enabled) {
            tracing::error!("Failed to save suggestion preference: {e}");
        }

        true
    }

    /// Apply a background outcome. Stale outcomes are dropped.
    ///
    /// Returns whether the session changed.
    pub fn apply(&mut self, completion: Completion) -> bool {
        match completion {
            Completion::Suggestions { generation, words } => {
                if !self.suggestion_task.is_current(generation) {
                    tracing::debug!("Dropping stale suggestions (generation {generation})");
                    return false;
                }
                self.suggestion_task.finish(generation);

                self.session.suggestions = words
                    .into_iter()
                    .take(self.settings.suggestion_display_cap)
                    .collect();

                if self.session.phase == SearchPhase::Suggesting {
                    self.session.phase = SearchPhase::Idle;
                }
            }
            Completion::Lookup {
                generation,
                word,
                outcome,
            } => {
                if !self.lookup_task.is_current(generation) {
                    tracing::debug!("Dropping stale lookup of '{word}' (generation {generation})");
                    return false;
                }
                self.lookup_task.finish(generation);

                match outcome {
                    Ok(result) => {
                        tracing::info!("Found '{}' ({} meanings)", result.word, result.meanings.len());
                        self.session.phase = SearchPhase::Success;
                        self.session.result = Some(result);
                        self.session.error = None;
                        self.spawn_reveal();
                    }
                    Err(e) => {
                        tracing::warn!("Lookup of '{word}' failed: {e}");
                        self.session.phase = SearchPhase::Error;
                        self.session.result = None;
                        self.session.error = Some(ErrorInfo {
                            kind: e.kind(),
                            message: user_message(&e),
                        });
                    }
                }
            }
            Completion::Reveal { generation } => {
                if !self.reveal_task.is_current(generation) {
                    return false;
                }
                self.reveal_task.finish(generation);
                self.session.details_visible = true;
            }
        }

        true
    }

    fn spawn_reveal(&mut self) {
        let (generation, token) = self.reveal_task.begin();
        let delay = self.settings.reveal_delay();

        if delay.is_zero() {
            self.reveal_task.finish(generation);
            self.session.details_visible = true;
            return;
        }

        self.session.details_visible = false;
        let tx = self.completion_tx.clone();

        tokio::spawn(async move {
            tokio::select! {
                biased;

                _ = token.cancelled() => {}
                _ = tokio::time::sleep(delay) => {
                    let _ = tx.send(Completion::Reveal { generation }).await;
                }
            }
        });
    }

    #[cfg(test)]
    pub(crate) fn lookup_generation(&self) -> u64 {
        self.lookup_task.generation()
    }

    #[cfg(test)]
    pub(crate) fn reveal_generation(&self) -> u64 {
        self.reveal_task.generation()
    }
}
