use serde::{Deserialize, Serialize};

/// A dictionary entry for one word
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LookupResult {
    pub word: String,
    pub phonetic: Option<String>,
    pub meanings: Vec<Meaning>,
    pub source_urls: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Meaning {
    pub part_of_speech: Option<String>,
    pub definitions: Vec<Definition>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Definition {
    pub text: String,
    pub example: Option<String>,
}

impl LookupResult {
    /// First non-empty leading definition across meanings, in order.
    ///
    /// Only the first definition of each meaning is considered.
    pub fn primary_definition(&self) -> Option<&str> {
        self.meanings
            .iter()
            .filter_map(|meaning| meaning.definitions.first())
            .map(|definition| definition.text.as_str())
            .find(|text| !text.is_empty())
    }
}
