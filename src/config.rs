use serde::{Deserialize, Serialize};
use std::path::Path;
use crate::error::{Result, TranslatorError};
use crate::locale::LocaleCatalog;

// Default values for provider and orchestrator configuration
fn default_locale() -> String {
    "en".to_string()
}

fn default_base_url() -> String {
    "https://sharpapi.com/api/v1".to_string()
}

fn default_api_key_env() -> String {
    "SHARP_API_KEY".to_string()
}

fn default_poll_interval_ms() -> u64 {
    2000
}

fn default_max_poll_attempts() -> u32 {
    150
}

fn default_request_timeout_secs() -> u64 {
    60
}

fn default_time_budget_secs() -> u64 {
    600
}

fn default_max_concurrent_fields() -> usize {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Locale preselected as the translation source
    #[serde(default = "default_locale")]
    pub default_locale: String,
    /// Supported locales, code to display name
    #[serde(default)]
    pub locales: LocaleCatalog,
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub orchestrator: OrchestratorConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Base URL of the translation API
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// API key; takes precedence over `api_key_env`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    /// Delay between status polls of a submitted job
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// Maximum number of status polls before giving up on a job
    #[serde(default = "default_max_poll_attempts")]
    pub max_poll_attempts: u32,
    /// Timeout for a single HTTP request
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrchestratorConfig {
    /// Wall-clock ceiling for a whole translation run
    #[serde(default = "default_time_budget_secs")]
    pub time_budget_secs: u64,
    /// Provider jobs allowed in flight for one record
    #[serde(default = "default_max_concurrent_fields")]
    pub max_concurrent_fields: usize,
    /// What to do with a record whose target fields are all populated
    #[serde(default)]
    pub already_translated: AlreadyTranslatedPolicy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlreadyTranslatedPolicy {
    /// Abort: stop the whole batch at the first fully translated record
    #[default]
    Abort,
    /// Skip: report the record and continue with the rest of the batch
    Skip,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            time_budget_secs: default_time_budget_secs(),
            max_concurrent_fields: default_max_concurrent_fields(),
            already_translated: AlreadyTranslatedPolicy::default(),
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            api_key_env: default_api_key_env(),
            poll_interval_ms: default_poll_interval_ms(),
            max_poll_attempts: default_max_poll_attempts(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_locale: default_locale(),
            locales: LocaleCatalog::new()
                .with_locale("en", "English")
                .with_locale("fr", "French")
                .with_locale("de", "German")
                .with_locale("es", "Spanish"),
            provider: ProviderConfig::default(),
            orchestrator: OrchestratorConfig::default(),
        }
    }
}

impl ProviderConfig {
    /// API key from the config file, falling back to the environment.
    pub fn effective_api_key(&self) -> Option<String> {
        let present = |key: &String| !key.trim().is_empty();
        self.api_key
            .clone()
            .filter(present)
            .or_else(|| std::env::var(&self.api_key_env).ok().filter(present))
    }
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| TranslatorError::Config(format!("Failed to read config file: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| TranslatorError::Config(format!("Failed to parse config file: {}", e)))
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| TranslatorError::Config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| TranslatorError::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }

    /// Check the preconditions of a translation run. Must pass before any
    /// record is touched.
    pub fn validate(&self) -> Result<()> {
        if self.locales.is_empty() {
            return Err(TranslatorError::ConfigurationMissing(
                "The language configuration is missing. \
                 Please define [locales] with the supported languages."
                    .to_string(),
            ));
        }

        if self.provider.effective_api_key().is_none() {
            return Err(TranslatorError::ConfigurationMissing(format!(
                "The translation API key is not configured. \
                 Please set provider.api_key or the '{}' environment variable.",
                self.provider.api_key_env
            )));
        }

        if self.orchestrator.time_budget_secs == 0 {
            return Err(TranslatorError::Config(
                "orchestrator.time_budget_secs must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}
