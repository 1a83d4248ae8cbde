use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Dictionaries served by the remote lookup API.
///
/// Declaration order is the order used when a fallback dictionary has to be
/// picked from the enabled set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum DictionaryId {
    #[default]
    English,
    Hindi,
    Spanish,
    French,
    Japanese,
    Russian,
    German,
    Italian,
    Korean,
    BrazilianPortuguese,
    Arabic,
    Turkish,
}

impl DictionaryId {
    pub const ALL: [DictionaryId; 12] = [
        DictionaryId::English,
        DictionaryId::Hindi,
        DictionaryId::Spanish,
        DictionaryId::French,
        DictionaryId::Japanese,
        DictionaryId::Russian,
        DictionaryId::German,
        DictionaryId::Italian,
        DictionaryId::Korean,
        DictionaryId::BrazilianPortuguese,
        DictionaryId::Arabic,
        DictionaryId::Turkish,
    ];

    /// Label shown to the user
    pub fn display_name(self) -> &'static str {
        match self {
            DictionaryId::English => "English",
            DictionaryId::Hindi => "Hindi",
            DictionaryId::Spanish => "Spanish",
            DictionaryId::French => "French",
            DictionaryId::Japanese => "Japanese",
            DictionaryId::Russian => "Russian",
            DictionaryId::German => "German",
            DictionaryId::Italian => "Italian",
            DictionaryId::Korean => "Korean",
            DictionaryId::BrazilianPortuguese => "Brazilian Portuguese",
            DictionaryId::Arabic => "Arabic",
            DictionaryId::Turkish => "Turkish",
        }
    }

    /// Language code used in the lookup API path
    pub fn language_code(self) -> &'static str {
        match self {
            DictionaryId::English => "en",
            DictionaryId::Hindi => "hi",
            DictionaryId::Spanish => "es",
            DictionaryId::French => "fr",
            DictionaryId::Japanese => "ja",
            DictionaryId::Russian => "ru",
            DictionaryId::German => "de",
            DictionaryId::Italian => "it",
            DictionaryId::Korean => "ko",
            DictionaryId::BrazilianPortuguese => "pt-BR",
            DictionaryId::Arabic => "ar",
            DictionaryId::Turkish => "tr",
        }
    }

    /// Key written to the preference store.
    ///
    /// Independent of `display_name` so relabelling never orphans stored values.
    pub fn code(self) -> &'static str {
        self.language_code()
    }

    /// Resolve a stored value.
    ///
    /// Accepts the stable code as well as the display name written by older
    /// builds, both case-insensitively.
    pub fn from_persisted(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL.into_iter().find(|id| {
            id.code().eq_ignore_ascii_case(value) || id.display_name().eq_ignore_ascii_case(value)
        })
    }

    /// Dictionaries enabled on first run
    pub fn default_enabled() -> BTreeSet<DictionaryId> {
        BTreeSet::from([
            DictionaryId::English,
            DictionaryId::Spanish,
            DictionaryId::French,
            DictionaryId::German,
        ])
    }
}

impl fmt::Display for DictionaryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown dictionary: {0}")]
pub struct UnknownDictionary(pub String);

impl FromStr for DictionaryId {
    type Err = UnknownDictionary;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_persisted(s).ok_or_else(|| UnknownDictionary(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn codes_and_names_are_unique() {
        let codes: HashSet<_> = DictionaryId::ALL.iter().map(|id| id.code()).collect();
        let names: HashSet<_> = DictionaryId::ALL.iter().map(|id| id.display_name()).collect();
        assert_eq!(codes.len(), DictionaryId::ALL.len());
        assert_eq!(names.len(), DictionaryId::ALL.len());
    }

    #[test]
    fn resolves_code_and_legacy_display_name() {
        assert_eq!(DictionaryId::from_persisted("en"), Some(DictionaryId::English));
        assert_eq!(
            DictionaryId::from_persisted("Brazilian Portuguese"),
            Some(DictionaryId::BrazilianPortuguese)
        );
        assert_eq!(DictionaryId::from_persisted("pt-br"), Some(DictionaryId::BrazilianPortuguese));
        assert_eq!(DictionaryId::from_persisted("Klingon"), None);
        assert_eq!(
            "klingon".parse::<DictionaryId>().unwrap_err().to_string(),
            "unknown dictionary: klingon"
        );
    }

    #[test]
    fn default_is_english() {
        assert_eq!(DictionaryId::default().language_code(), "en");
        assert!(DictionaryId::default_enabled().contains(&DictionaryId::English));
    }
}
