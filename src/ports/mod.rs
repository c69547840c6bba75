//! Ports - Interfaces between the application core and the outside world.
//!
//! - `ai_provider` - chat-completion primitive
//! - `coaching_gateway` - prompt building and parsing for coaching calls
//! - `session_store` - live session registry

mod ai_provider;
mod coaching_gateway;
mod session_store;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, Message,
    MessageRole, ProviderInfo, TokenUsage,
};
pub use coaching_gateway::{icebreaker_text, CoachingGateway, ICEBREAKER_FAILURE_PREFIX};
pub use session_store::{SessionHandle, SessionStore};
