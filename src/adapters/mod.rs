//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - chat-completion providers (HTTP and mock)
//! - `coaching` - prompt building and reply parsing over an AI provider
//! - `session` - in-memory session registry
//! - `http` - REST API

pub mod ai;
pub mod coaching;
pub mod http;
pub mod session;

pub use ai::{ChatCompletionsConfig, ChatCompletionsProvider, MockAIProvider, MockResponse};
pub use coaching::LlmCoachingGateway;
pub use http::{app_router, CoachingAppState};
pub use session::{spawn_idle_purge, InMemorySessionStore};
