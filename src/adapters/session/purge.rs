//! Background sweep that discards idle sessions.

use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

use crate::domain::foundation::Timestamp;
use crate::ports::SessionStore;

/// Spawns a task that every `interval` discards sessions idle for longer
/// than `idle_ttl`.
pub fn spawn_idle_purge(
    sessions: Arc<dyn SessionStore>,
    idle_ttl: Duration,
    interval: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        // The first tick completes immediately.
        ticker.tick().await;

        loop {
            ticker.tick().await;
            let cutoff = Timestamp::now().minus_secs(idle_ttl.as_secs());

            match sessions.discard_idle(cutoff).await {
                Ok(0) => {}
                Ok(removed) => tracing::info!(removed, "Purged idle sessions"),
                Err(e) => tracing::warn!(error = %e, "Idle session purge failed"),
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::session::InMemorySessionStore;

    #[tokio::test]
    async fn purges_sessions_past_ttl() {
        let store = Arc::new(InMemorySessionStore::new());
        store.create().await.unwrap();
        store.create().await.unwrap();

        let task = spawn_idle_purge(
            store.clone(),
            Duration::ZERO,
            Duration::from_millis(10),
        );
        tokio::time::sleep(Duration::from_millis(100)).await;
        task.abort();

        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn keeps_sessions_within_ttl() {
        let store = Arc::new(InMemorySessionStore::new());
        store.create().await.unwrap();

        let task = spawn_idle_purge(
            store.clone(),
            Duration::from_secs(3600),
            Duration::from_millis(10),
        );
        tokio::time::sleep(Duration::from_millis(50)).await;
        task.abort();

        assert_eq!(store.count().await.unwrap(), 1);
    }
}
