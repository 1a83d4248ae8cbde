use lexi_types::LookupErrorKind;

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("No entries found for {word:?}")]
    EmptyResults { word: String },
}

impl LookupError {
    pub fn kind(&self) -> LookupErrorKind {
        match self {
            LookupError::InvalidRequest(_) => LookupErrorKind::InvalidRequest,
            LookupError::RequestFailed(_) => LookupErrorKind::RequestFailed,
            LookupError::EmptyResults { .. } => LookupErrorKind::EmptyResults,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PreferenceError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    ParseError(#[from] serde_json::Error),
}
