pub mod dictionary;
pub mod entry;
pub mod types;

pub use dictionary::DictionaryId;
pub use entry::{Definition, LookupResult, Meaning};
pub use types::{AppEvent, ErrorInfo, LookupErrorKind, SearchPhase, SessionSnapshot};
