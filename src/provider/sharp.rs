// HTTP client for a job-based translation API
//
// Submitting content returns a status URL. The job status is polled until
// the remote side reports success or failure.

use async_trait::async_trait;
use reqwest::{Client, Response, header};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::config::ProviderConfig;
use crate::error::{Result, TranslatorError};
use super::{JobHandle, ProviderRequest, TranslationProvider};

#[derive(Debug, Clone, Serialize)]
struct SubmitBody<'a> {
    content: &'a str,
    language: &'a str,
    voice_tone: &'a str,
    context: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
struct SubmitResponse {
    status_url: String,
    job_id: String,
}

#[derive(Debug, Clone, Deserialize)]
struct StatusResponse {
    data: StatusData,
}

#[derive(Debug, Clone, Deserialize)]
struct StatusData {
    attributes: StatusAttributes,
}

#[derive(Debug, Clone, Deserialize)]
struct StatusAttributes {
    status: String,
    #[serde(default)]
    result: Option<TranslatedContent>,
}

#[derive(Debug, Clone, Deserialize)]
struct TranslatedContent {
    #[serde(default)]
    content: Option<String>,
}

pub struct SharpApiProvider {
    client: Client,
    base_url: String,
    api_key: String,
    poll_interval: Duration,
    max_poll_attempts: u32,
}

impl SharpApiProvider {
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        let api_key = config.effective_api_key().ok_or_else(|| {
            TranslatorError::ConfigurationMissing(format!(
                "The translation API key is not configured. \
                 Please set provider.api_key or the '{}' environment variable.",
                config.api_key_env
            ))
        })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| TranslatorError::Provider(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
            poll_interval: Duration::from_millis(config.poll_interval_ms),
            max_poll_attempts: config.max_poll_attempts,
        })
    }

    async fn check_status(response: Response) -> Result<Response> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status();
        let error_text = response.text().await.unwrap_or_default();
        Err(TranslatorError::Provider(format!(
            "Translation API error {}: {}", status, error_text
        )))
    }

    /// Delay requested by the server, or the configured poll interval
    fn retry_after(&self, response: &Response) -> Duration {
        response
            .headers()
            .get(header::RETRY_AFTER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.trim().parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(self.poll_interval)
    }
}

#[async_trait]
impl TranslationProvider for SharpApiProvider {
    async fn submit(&self, request: &ProviderRequest) -> Result<JobHandle> {
        let url = format!("{}/content/translate", self.base_url);
        let body = SubmitBody {
            content: &request.text,
            language: &request.target_language,
            voice_tone: request.tone.as_str(),
            context: &request.context,
        };

        debug!("Submitting translation job to: {}", url);

        let response = self.client
            .post(&url)
            .bearer_auth(&self.api_key)
            .header(header::ACCEPT, "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| TranslatorError::Provider(format!("HTTP request failed: {}", e)))?;

        let submitted: SubmitResponse = Self::check_status(response).await?
            .json()
            .await
            .map_err(|e| TranslatorError::Provider(format!("Failed to parse response: {}", e)))?;

        debug!("Job {} accepted", submitted.job_id);

        Ok(JobHandle {
            job_id: submitted.job_id,
            status_url: submitted.status_url,
        })
    }

    async fn fetch_result(&self, job: &JobHandle) -> Result<String> {
        for attempt in 1..=self.max_poll_attempts {
            let response = self.client
                .get(&job.status_url)
                .bearer_auth(&self.api_key)
                .header(header::ACCEPT, "application/json")
                .send()
                .await
                .map_err(|e| TranslatorError::Provider(format!("HTTP request failed: {}", e)))?;

            let response = Self::check_status(response).await?;
            let delay = self.retry_after(&response);

            let status: StatusResponse = response.json().await
                .map_err(|e| TranslatorError::Provider(format!("Failed to parse job status: {}", e)))?;

            match status.data.attributes.status.as_str() {
                "success" => {
                    return Ok(status.data.attributes.result
                        .and_then(|result| result.content)
                        .unwrap_or_default());
                }
                "failed" => {
                    return Err(TranslatorError::Provider(format!("Job {} failed", job.job_id)));
                }
                other => {
                    debug!("Job {} is {} (poll {}/{})", job.job_id, other, attempt, self.max_poll_attempts);
                    if attempt < self.max_poll_attempts {
                        tokio::time::sleep(delay).await;
                    }
                }
            }
        }

        Err(TranslatorError::Provider(format!(
            "Job {} did not finish after {} polls", job.job_id, self.max_poll_attempts
        )))
    }
}
