use super::Session;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use uuid::Uuid;

/// One session's state behind its own lock
pub type SharedSession = Arc<Mutex<Session>>;

struct Entry {
    session: SharedSession,
    last_seen: Instant,
}

/// In-memory registry of live sessions keyed by cookie id
#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<Mutex<HashMap<Uuid, Entry>>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            ttl,
        }
    }

    /// Look up the session for `id`, or start a fresh one.
    ///
    /// Returns the id to use from now on and whether it was newly created.
    /// Idle sessions past the TTL are swept on the way.
    pub async fn get_or_create(&self, id: Option<Uuid>) -> (Uuid, SharedSession, bool) {
        let now = Instant::now();
        let mut map = self.sessions.lock().await;

        let before = map.len();
        map.retain(|_, entry| now.duration_since(entry.last_seen) < self.ttl);
        let expired = before - map.len();
        if expired > 0 {
            tracing::info!("Expired {} idle session(s)", expired);
        }

        if let Some(id) = id
            && let Some(entry) = map.get_mut(&id)
        {
            entry.last_seen = now;
            return (id, entry.session.clone(), false);
        }

        let id = Uuid::new_v4();
        let session: SharedSession = Arc::new(Mutex::new(Session::default()));
        map.insert(
            id,
            Entry {
                session: session.clone(),
                last_seen: now,
            },
        );
        tracing::debug!("Session {} created ({} live)", id, map.len());
        (id, session, true)
    }

    /// Sessions currently held in memory, expired ones included until the
    /// next sweep.
    pub async fn live_count(&self) -> usize {
        self.sessions.lock().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unknown_id_creates_session() {
        let store = SessionStore::new(Duration::from_secs(60));
        let (id, _, created) = store.get_or_create(Some(Uuid::new_v4())).await;
        assert!(created);

        let (again, _, created) = store.get_or_create(Some(id)).await;
        assert_eq!(again, id);
        assert!(!created);
        assert_eq!(store.live_count().await, 1);
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let store = SessionStore::new(Duration::from_secs(60));
        let (_, a, _) = store.get_or_create(None).await;
        let (_, b, _) = store.get_or_create(None).await;

        a.lock().await.todos.add("only in a").unwrap();
        assert_eq!(a.lock().await.todos.len(), 1);
        assert!(b.lock().await.todos.is_empty());
    }

    #[tokio::test]
    async fn test_idle_sessions_expire() {
        let store = SessionStore::new(Duration::ZERO);
        let (id, _, _) = store.get_or_create(None).await;
        let (next, _, created) = store.get_or_create(Some(id)).await;
        assert!(created);
        assert_ne!(next, id);
        assert_eq!(store.live_count().await, 1);
    }
}
