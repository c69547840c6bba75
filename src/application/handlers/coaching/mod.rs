//! Coaching handlers.

mod orchestrator;

pub use orchestrator::CoachingOrchestrator;
