use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::dictionary::DictionaryId;
use crate::entry::LookupResult;

/// Events sent from the presentation layer to the search controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    QueryChanged(String),
    Submit,
    /// Replace the query with a suggestion and submit it
    SelectSuggestion(String),
    SelectDictionary(DictionaryId),
    SetDictionaryEnabled {
        id: DictionaryId,
        enabled: bool,
    },
    SetSuggestionsEnabled(bool),
    Close,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SearchPhase {
    #[default]
    Idle,
    /// Debounce pending or suggestion fetch in flight
    Suggesting,
    /// Primary lookup in flight
    Loading,
    Success,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LookupErrorKind {
    InvalidRequest,
    RequestFailed,
    EmptyResults,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    pub kind: LookupErrorKind,
    pub message: String,
}

/// Everything the presentation layer needs to render the search surface
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub query: String,
    pub phase: SearchPhase,
    pub result: Option<LookupResult>,
    pub error: Option<ErrorInfo>,
    pub suggestions: Vec<String>,
    /// Dictionary used by the latest submit
    pub active_dictionary: DictionaryId,
    /// Dictionary picked by the user, if any
    pub selected_dictionary: Option<DictionaryId>,
    pub enabled_dictionaries: BTreeSet<DictionaryId>,
    pub suggestions_enabled: bool,
    /// Meanings are revealed shortly after the result header
    pub details_visible: bool,
}
