//! SessionStore port - registry of live coaching sessions.
//!
//! Each session's state sits behind its own async mutex, so an action holds
//! exclusive access to exactly one session while it awaits the model and
//! never blocks other sessions.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::foundation::{SessionId, Timestamp};
use crate::domain::session::{SessionError, SessionState};

/// Shared handle to one session's state.
pub type SessionHandle = Arc<Mutex<SessionState>>;

/// Storage for live session states.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Create a new empty session.
    async fn create(&self) -> Result<(SessionId, SessionHandle), SessionError>;

    /// Look up a session.
    ///
    /// # Errors
    ///
    /// `NotFound` if the session does not exist or has been discarded.
    async fn get(&self, id: SessionId) -> Result<SessionHandle, SessionError>;

    /// Discard a session. Returns whether it existed.
    async fn discard(&self, id: SessionId) -> Result<bool, SessionError>;

    /// Discard every session idle since `cutoff`. Returns how many were removed.
    async fn discard_idle(&self, cutoff: Timestamp) -> Result<usize, SessionError>;

    /// Number of live sessions.
    async fn count(&self) -> Result<usize, SessionError>;
}
