//! Application state

use shelfmark_core::{MetadataLookup, Session};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use uuid::Uuid;

/// A session shared between requests; each one has its own lock so a slow
/// lookup in one session never blocks another.
pub type SharedSession = Arc<Mutex<Session>>;

/// An open session and when a request last touched it
struct SessionSlot {
    session: SharedSession,
    last_used: Instant,
}

/// Shared application state.
///
/// Sessions are closed by `DELETE /sessions/:id` or, once idle for longer than
/// the configured limit, by the sweeper started with [`AppState::spawn_idle_sweeper`].
#[derive(Clone)]
pub struct AppState {
    /// Bibliographic search used by every session
    pub lookup: Arc<dyn MetadataLookup>,

    /// Open sessions by id
    sessions: Arc<RwLock<HashMap<Uuid, SessionSlot>>>,
}

impl AppState {
    /// Create new application state around a lookup
    pub fn new(lookup: Arc<dyn MetadataLookup>) -> Self {
        Self {
            lookup,
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Open a fresh, empty session
    pub async fn create_session(&self) -> (Uuid, SharedSession) {
        let id = Uuid::new_v4();
        let session = Arc::new(Mutex::new(Session::new()));
        let slot = SessionSlot {
            session: session.clone(),
            last_used: Instant::now(),
        };
        self.sessions.write().await.insert(id, slot);
        tracing::debug!("Opened session {}", id);
        (id, session)
    }

    /// Look up an open session and mark it as used
    pub async fn session(&self, id: Uuid) -> Option<SharedSession> {
        let mut sessions = self.sessions.write().await;
        let slot = sessions.get_mut(&id)?;
        slot.last_used = Instant::now();
        Some(slot.session.clone())
    }

    /// Close a session, returning whether it existed
    pub async fn remove_session(&self, id: Uuid) -> bool {
        let removed = self.sessions.write().await.remove(&id).is_some();
        if removed {
            tracing::debug!("Closed session {}", id);
        }
        removed
    }

    /// Number of open sessions
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Close every session not used within `max_idle`; returns how many closed.
    /// A request already holding a closed session finishes normally.
    pub async fn prune_idle(&self, max_idle: Duration) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, slot| slot.last_used.elapsed() < max_idle);
        before - sessions.len()
    }

    /// Periodically close idle sessions in the background
    pub fn spawn_idle_sweeper(&self, max_idle: Duration) -> JoinHandle<()> {
        let state = self.clone();
        let period = max_idle.clamp(Duration::from_secs(1), Duration::from_secs(60));

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);

            loop {
                interval.tick().await;
                let closed = state.prune_idle(max_idle).await;
                if closed > 0 {
                    tracing::info!("Closed {} idle sessions", closed);
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shelfmark_core::{BookQuery, StaticLookup};

    fn state() -> AppState {
        AppState::new(Arc::new(StaticLookup::new()))
    }

    #[tokio::test]
    async fn test_sessions_are_independent() {
        let state = state();
        let (a, first) = state.create_session().await;
        let (b, _) = state.create_session().await;
        assert_ne!(a, b);
        assert_eq!(state.session_count().await, 2);

        first.lock().await.enqueue(BookQuery::new("Principles"));
        let second = state.session(b).await.unwrap();
        assert!(second.lock().await.queue().is_empty());

        assert!(state.remove_session(a).await);
        assert!(!state.remove_session(a).await);
        assert!(state.session(a).await.is_none());
    }

    #[tokio::test]
    async fn test_prune_idle_sessions() {
        let state = state();
        let (a, _) = state.create_session().await;
        state.create_session().await;

        assert_eq!(state.prune_idle(Duration::from_secs(3600)).await, 0);
        assert_eq!(state.session_count().await, 2);

        tokio::time::sleep(Duration::from_millis(300)).await;
        assert!(state.session(a).await.is_some());

        // Only the session touched just now is younger than 200ms
        assert_eq!(state.prune_idle(Duration::from_millis(200)).await, 1);
        assert!(state.session(a).await.is_some());

        assert_eq!(state.prune_idle(Duration::ZERO).await, 1);
        assert_eq!(state.session_count().await, 0);
    }

    #[tokio::test]
    async fn test_sweeper_closes_idle_sessions() {
        let state = state();
        state.create_session().await;

        let sweeper = state.spawn_idle_sweeper(Duration::from_millis(1));
        // The first tick fires immediately, later ones every second
        tokio::time::sleep(Duration::from_millis(1200)).await;
        sweeper.abort();

        assert_eq!(state.session_count().await, 0);
    }
}
