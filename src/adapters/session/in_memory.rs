//! In-memory session store implementation.
//!
//! Sessions live only for the lifetime of the process. Suitable for the
//! single-server coaching service and for tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::Mutex as AsyncMutex;

use crate::domain::foundation::{SessionId, Timestamp};
use crate::domain::session::{SessionError, SessionState};
use crate::ports::{SessionHandle, SessionStore};

/// In-memory implementation of the SessionStore port.
///
/// The registry map is guarded by a short-lived `std::sync::Mutex`; each
/// session's state has its own async mutex inside the handle.
#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: Mutex<HashMap<SessionId, SessionHandle>>,
}

impl InMemorySessionStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn sessions(&self) -> Result<MutexGuard<'_, HashMap<SessionId, SessionHandle>>, SessionError> {
        self.sessions
            .lock()
            .map_err(|_| SessionError::infrastructure("session registry lock poisoned"))
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn create(&self) -> Result<(SessionId, SessionHandle), SessionError> {
        let id = SessionId::new();
        let handle = Arc::new(AsyncMutex::new(SessionState::new(id)));
        self.sessions()?.insert(id, Arc::clone(&handle));

        tracing::debug!(session_id = %id, "Session created");
        Ok((id, handle))
    }

    async fn get(&self, id: SessionId) -> Result<SessionHandle, SessionError> {
        self.sessions()?
            .get(&id)
            .cloned()
            .ok_or_else(|| SessionError::not_found(id))
    }

    async fn discard(&self, id: SessionId) -> Result<bool, SessionError> {
        let removed = self.sessions()?.remove(&id).is_some();
        if removed {
            tracing::debug!(session_id = %id, "Session discarded");
        }
        Ok(removed)
    }

    async fn discard_idle(&self, cutoff: Timestamp) -> Result<usize, SessionError> {
        let mut sessions = self.sessions()?;
        let before = sessions.len();

        // A session whose lock is held is in use, so it is not idle.
        sessions.retain(|_, handle| match handle.try_lock() {
            Ok(state) => !state.is_idle_since(&cutoff),
            Err(_) => true,
        });

        Ok(before - sessions.len())
    }

    async fn count(&self) -> Result<usize, SessionError> {
        Ok(self.sessions()?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_then_get_returns_same_state() {
        let store = InMemorySessionStore::new();
        let (id, handle) = store.create().await.unwrap();

        let fetched = store.get(id).await.unwrap();

        assert!(Arc::ptr_eq(&handle, &fetched));
        assert_eq!(*fetched.lock().await.id(), id);
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn get_unknown_session_is_not_found() {
        let store = InMemorySessionStore::new();
        let id = SessionId::new();

        let err = store.get(id).await.unwrap_err();

        assert_eq!(err, SessionError::NotFound(id));
    }

    #[tokio::test]
    async fn discard_removes_session() {
        let store = InMemorySessionStore::new();
        let (id, _) = store.create().await.unwrap();

        assert!(store.discard(id).await.unwrap());
        assert!(!store.discard(id).await.unwrap());
        assert!(store.get(id).await.is_err());
    }

    #[tokio::test]
    async fn discard_idle_removes_only_stale_sessions() {
        let store = InMemorySessionStore::new();
        let (stale, _) = store.create().await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let cutoff = Timestamp::now();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let (fresh, fresh_handle) = store.create().await.unwrap();
        fresh_handle.lock().await.touch();

        let removed = store.discard_idle(cutoff).await.unwrap();

        assert_eq!(removed, 1);
        assert!(store.get(stale).await.is_err());
        assert!(store.get(fresh).await.is_ok());
    }

    #[tokio::test]
    async fn discard_idle_skips_sessions_in_use() {
        let store = InMemorySessionStore::new();
        let (id, handle) = store.create().await.unwrap();
        let _guard = handle.lock().await;

        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let removed = store.discard_idle(Timestamp::now()).await.unwrap();

        assert_eq!(removed, 0);
        assert!(store.get(id).await.is_ok());
    }
}
