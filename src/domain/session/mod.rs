//! Session domain module.
//!
//! Holds the per-client session state: the selected practice profile, the
//! analysis and advice derived from it, the practice conversation and the
//! progress counters.

mod aggregate;
mod errors;

pub use aggregate::{SessionProgress, SessionState};
pub use errors::SessionError;
