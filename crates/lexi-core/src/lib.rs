pub mod error;
pub mod preferences;
pub mod preprocess;
pub mod service;

pub use error::{LookupError, PreferenceError};
pub use preferences::{JsonFilePreferenceStore, MemoryPreferenceStore, PreferenceStore, Preferences};
pub use preprocess::{DefaultPreprocessor, Preprocessor};
pub use service::{DictionaryService, SuggestionService};
