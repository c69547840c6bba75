//! Coaching gateway adapters.

mod llm_gateway;

pub use llm_gateway::LlmCoachingGateway;
