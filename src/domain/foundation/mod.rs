//! Foundation module - Shared domain primitives.
//!
//! Contains the identifiers and time value objects used across the
//! coaching domain.

mod ids;
mod timestamp;

pub use ids::{ProfileId, SessionId};
pub use timestamp::Timestamp;
