//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (identifiers, timestamps)
//! - `coaching` - Profiles, model-derived records, practice turns, sentiment
//! - `session` - Per-client session state and its lifecycle

pub mod coaching;
pub mod foundation;
pub mod session;
