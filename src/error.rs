use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TranslatorError {
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// A precondition of the run is not configured (locales, API key).
    #[error("Configuration missing: {0}")]
    ConfigurationMissing(String),

    #[error("Configuration error: {0}")]
    Config(String),

    /// Any failure reported by, or while talking to, the translation provider.
    #[error("Translation provider error: {0}")]
    Provider(String),

    #[error("Record store error: {0}")]
    Store(String),

    #[error("Unknown voice tone: {0}")]
    InvalidTone(String),

    #[error("Translation exceeded the time budget of {0:?}")]
    Timeout(Duration),
}

pub type Result<T> = std::result::Result<T, TranslatorError>;
