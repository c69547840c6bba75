//! Application handlers.
//!
//! Handlers that sequence port calls around a session's state.

pub mod coaching;

pub use coaching::CoachingOrchestrator;
