//! AI provider configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Chat-completion provider configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// API key; `ZHIPU_API_KEY` is used when unset
    pub api_key: Option<String>,

    /// Provider name, used in logs
    #[serde(default = "default_provider_name")]
    pub provider_name: String,

    /// Endpoint base; `/chat/completions` is appended
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl AiConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// The configured API key, if non-empty
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|k| !k.trim().is_empty())
    }

    /// Check if an API key is configured
    pub fn has_api_key(&self) -> bool {
        self.api_key().is_some()
    }

    /// Validate AI configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.has_api_key() {
            return Err(ValidationError::MissingRequired(
                "SOULCONNECT__AI__API_KEY or ZHIPU_API_KEY",
            ));
        }
        if !(self.base_url.starts_with("https://") || self.base_url.starts_with("http://")) {
            return Err(ValidationError::InvalidBaseUrl);
        }
        if self.model.trim().is_empty() {
            return Err(ValidationError::EmptyModel);
        }
        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err(ValidationError::InvalidAiTimeout);
        }
        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            provider_name: default_provider_name(),
            base_url: default_base_url(),
            model: default_model(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_provider_name() -> String {
    "zhipu".to_string()
}

fn default_base_url() -> String {
    "https://open.bigmodel.cn/api/paas/v4".to_string()
}

fn default_model() -> String {
    "glm-4".to_string()
}

fn default_timeout() -> u64 {
    30
}
