//! Chat-completions provider - AIProvider for OpenAI-compatible endpoints.
//!
//! Defaults to the Zhipu GLM v4 API (`glm-4`), which speaks the same
//! chat-completions wire format as OpenAI.
//!
//! # Configuration
//!
//! ```ignore
//! let config = ChatCompletionsConfig::new(api_key)
//!     .with_model("glm-4")
//!     .with_base_url("https://open.bigmodel.cn/api/paas/v4");
//!
//! let provider = ChatCompletionsProvider::new(config)?;
//! ```
//!
//! Every call is a single POST with a fixed timeout. Nothing is retried: a
//! failed call is reported once, immediately.

use async_trait::async_trait;
use reqwest::{Client, Response};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

use crate::ports::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, ProviderInfo,
    TokenUsage,
};

/// Default endpoint base (Zhipu GLM v4).
pub const DEFAULT_BASE_URL: &str = "https://open.bigmodel.cn/api/paas/v4";

/// Default model.
pub const DEFAULT_MODEL: &str = "glm-4";

/// Configuration for the chat-completions provider.
#[derive(Debug, Clone)]
pub struct ChatCompletionsConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Provider name used in logs and provider info.
    pub provider_name: String,
    /// Model to use when a request does not override it.
    pub model: String,
    /// Base URL for the API; `/chat/completions` is appended.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl ChatCompletionsConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            provider_name: "zhipu".to_string(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Sets the provider name.
    pub fn with_provider_name(mut self, name: impl Into<String>) -> Self {
        self.provider_name = name.into();
        self
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Exposes the API key (for making requests).
    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Chat-completions API provider implementation.
pub struct ChatCompletionsProvider {
    config: ChatCompletionsConfig,
    client: Client,
}

impl ChatCompletionsProvider {
    /// Creates a new provider with the given configuration.
    ///
    /// # Errors
    ///
    /// `InvalidRequest` if the HTTP client cannot be built.
    pub fn new(config: ChatCompletionsConfig) -> Result<Self, AIError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AIError::InvalidRequest(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Builds the chat completions endpoint URL.
    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }

    /// Converts our request to the wire format.
    fn to_wire_request(&self, request: &CompletionRequest) -> ChatRequest {
        ChatRequest {
            model: request
                .model
                .clone()
                .unwrap_or_else(|| self.config.model.clone()),
            messages: request
                .messages
                .iter()
                .map(|msg| ChatMessage {
                    role: msg.role.as_str().to_string(),
                    content: msg.content.clone(),
                })
                .collect(),
            temperature: request.temperature,
        }
    }

    /// Sends a request.
    async fn send_request(&self, body: &ChatRequest) -> Result<Response, AIError> {
        self.client
            .post(self.completions_url())
            .header("Authorization", format!("Bearer {}", self.config.api_key()))
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AIError::Timeout {
                        timeout_secs: self.config.timeout.as_secs() as u32,
                    }
                } else if e.is_connect() {
                    AIError::network(format!("Connection failed: {}", e))
                } else {
                    AIError::network(e.to_string())
                }
            })
    }

    /// Parses the API response status and handles errors.
    async fn handle_response_status(&self, response: Response) -> Result<Response, AIError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();

        match status.as_u16() {
            401 | 403 => Err(AIError::AuthenticationFailed),
            429 => Err(AIError::rate_limited(parse_retry_after(&error_body))),
            400 => Err(AIError::InvalidRequest(error_body)),
            500..=599 => Err(AIError::unavailable(format!(
                "Server error {}: {}",
                status, error_body
            ))),
            _ => Err(AIError::network(format!(
                "Unexpected status {}: {}",
                status, error_body
            ))),
        }
    }
}

#[async_trait]
impl AIProvider for ChatCompletionsProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        let body = self.to_wire_request(&request);
        let started = Instant::now();

        tracing::debug!(
            provider = %self.config.provider_name,
            model = %body.model,
            messages = body.messages.len(),
            temperature = ?body.temperature,
            "Sending chat completion request"
        );

        let result = async {
            let response = self.send_request(&body).await?;
            let response = self.handle_response_status(response).await?;
            let text = response
                .text()
                .await
                .map_err(|e| AIError::network(format!("Failed to read response body: {}", e)))?;
            parse_completion_body(&text, &body.model)
        }
        .await;

        match &result {
            Ok(completion) => tracing::debug!(
                provider = %self.config.provider_name,
                model = %completion.model,
                total_tokens = completion.usage.total_tokens,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "Chat completion succeeded"
            ),
            Err(e) => tracing::warn!(
                provider = %self.config.provider_name,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "Chat completion failed: {}",
                e
            ),
        }

        result
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new(&self.config.provider_name, &self.config.model)
    }
}

/// Parses a successful chat-completions body.
///
/// The content is `choices[0].message.content`; anything else missing is a
/// parse error.
fn parse_completion_body(body: &str, requested_model: &str) -> Result<CompletionResponse, AIError> {
    let parsed: ChatResponse = serde_json::from_str(body)
        .map_err(|e| AIError::parse(format!("Failed to parse response: {}", e)))?;

    let choice = parsed
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| AIError::parse("No choices in response"))?;

    let usage = parsed
        .usage
        .map(|u| TokenUsage::new(u.prompt_tokens, u.completion_tokens))
        .unwrap_or_default();

    Ok(CompletionResponse {
        content: choice.message.content,
        usage,
        model: parsed.model.unwrap_or_else(|| requested_model.to_string()),
        finish_reason: FinishReason::from_wire(choice.finish_reason.as_deref()),
    })
}

/// Parses retry-after from an error body, defaulting to 30 seconds.
fn parse_retry_after(error_body: &str) -> u32 {
    if let Ok(parsed) = serde_json::from_str::<serde_json::Value>(error_body) {
        if let Some(s) = parsed
            .get("error")
            .and_then(|e| e.get("message"))
            .and_then(|m| m.as_str())
        {
            if let Some(idx) = s.find("try again in ") {
                let rest = &s[idx + 13..];
                if let Some(num_end) = rest.find(|c: char| !c.is_ascii_digit()) {
                    if let Ok(secs) = rest[..num_end].parse::<u32>() {
                        return secs;
                    }
                }
            }
        }
    }
    30
}

// ----- Wire Types -----

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    model: Option<String>,
    choices: Vec<ChatChoice>,
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}
