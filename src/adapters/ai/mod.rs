//! AI Provider Adapters.
//!
//! Implementations of the AIProvider port.
//!
//! ## Available Adapters
//!
//! - `ChatCompletionsProvider` - OpenAI-compatible chat-completions endpoints (Zhipu GLM by default)
//! - `MockAIProvider` - Configurable mock for testing

mod chat_completions_provider;
mod mock_provider;

pub use chat_completions_provider::{
    ChatCompletionsConfig, ChatCompletionsProvider, DEFAULT_BASE_URL, DEFAULT_MODEL,
};
pub use mock_provider::{MockAIProvider, MockResponse, DEFAULT_MOCK_CONTENT};
