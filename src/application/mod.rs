//! Application layer - Handlers orchestrating domain operations.
//!
//! This layer coordinates between the domain and the ports. It owns no state;
//! session state is passed in explicitly by the caller.

pub mod handlers;

pub use handlers::CoachingOrchestrator;
