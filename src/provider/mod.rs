// Translation provider boundary
//
// The orchestrator talks to the remote service only through the
// `TranslationProvider` trait:
// - submit: hand one text to the service, get a job handle back
// - fetch_result: wait until the job is done and return the translated text
//
// Implementations:
// - sharp: job-based HTTP API (submit returns a status URL that is polled)

pub mod sharp;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::tone::VoiceTone;

pub use sharp::SharpApiProvider;

/// One field's worth of text to translate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderRequest {
    pub text: String,
    /// Display name of the target language (e.g. "French")
    pub target_language: String,
    pub tone: VoiceTone,
    /// Free-text hint naming the source language
    pub context: String,
}

impl ProviderRequest {
    pub fn new(text: impl Into<String>, target_language: impl Into<String>, tone: VoiceTone, source_language: &str) -> Self {
        Self {
            text: text.into(),
            target_language: target_language.into(),
            tone,
            context: format!("Source language is {}", source_language),
        }
    }
}

/// Reference to a job accepted by the provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobHandle {
    pub job_id: String,
    pub status_url: String,
}

/// Main trait for translation providers
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TranslationProvider: Send + Sync {
    /// Submit text for translation
    async fn submit(&self, request: &ProviderRequest) -> Result<JobHandle>;

    /// Wait for a submitted job and return the translated text
    async fn fetch_result(&self, job: &JobHandle) -> Result<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_context_names_source_language() {
        let request = ProviderRequest::new("Hello", "French", VoiceTone::Neutral, "English");
        assert_eq!(request.context, "Source language is English");
        assert_eq!(request.target_language, "French");
    }
}
