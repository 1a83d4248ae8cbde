use lexi_types::{Definition, LookupResult, Meaning};
use serde::Deserialize;

// Response shape of the dictionary API. Every field but `word` is optional
// in practice, and arrays are sometimes `null`.

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WireEntry {
    #[serde(default)]
    word: String,
    phonetic: Option<String>,
    phonetics: Option<Vec<WirePhonetic>>,
    meanings: Option<Vec<WireMeaning>>,
    source_urls: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct WirePhonetic {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireMeaning {
    part_of_speech: Option<String>,
    definitions: Option<Vec<WireDefinition>>,
}

#[derive(Debug, Deserialize)]
struct WireDefinition {
    #[serde(default)]
    definition: String,
    example: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl From<WireEntry> for LookupResult {
    fn from(entry: WireEntry) -> Self {
        let phonetic = non_empty(entry.phonetic).or_else(|| {
            entry
                .phonetics
                .unwrap_or_default()
                .into_iter()
                .find_map(|p| non_empty(p.text))
        });

        let meanings = entry
            .meanings
            .unwrap_or_default()
            .into_iter()
            .map(|meaning| Meaning {
                part_of_speech: non_empty(meaning.part_of_speech),
                definitions: meaning
                    .definitions
                    .unwrap_or_default()
                    .into_iter()
                    .map(|d| Definition {
                        text: d.definition,
                        example: non_empty(d.example),
                    })
                    .collect(),
            })
            .collect();

        LookupResult {
            word: entry.word,
            phonetic,
            meanings,
            source_urls: entry.source_urls.unwrap_or_default(),
        }
    }
}
