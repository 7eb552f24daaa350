//! In-memory session store. Nothing survives a restart.
//!
//! Each session sits behind its own async mutex, held for a whole turn, so
//! turns within one session are strictly sequential while different sessions
//! proceed independently.
//!
//! Sessions idle longer than the configured TTL are swept by a background task.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::interview::conversation::{Conversation, Turn};

pub struct Session {
    pub id: Uuid,
    pub conversation: Conversation,
    /// Key supplied by the candidate. Falls back to the server key when absent.
    pub credential: Option<String>,
    pub created_at: DateTime<Utc>,
    last_active: Instant,
}

impl Session {
    pub fn new(track: impl Into<String>, credential: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            conversation: Conversation::new(track),
            credential,
            created_at: Utc::now(),
            last_active: Instant::now(),
        }
    }

    /// Marks the session as used now, pushing back its idle expiry.
    pub fn touch(&mut self) {
        self.last_active = Instant::now();
    }

    pub fn idle_for(&self) -> Duration {
        self.last_active.elapsed()
    }

    /// Picks the session key, then the server key. Blank keys count as missing.
    pub fn resolve_credential(&self, fallback: Option<&str>) -> Result<String, AppError> {
        self.credential
            .as_deref()
            .or(fallback)
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_string)
            .ok_or(AppError::MissingCredential)
    }

    pub fn view(&self, server_has_credential: bool) -> SessionView {
        SessionView {
            id: self.id,
            track: self.conversation.track().to_string(),
            current_question: self.conversation.current_question().to_string(),
            turns: self.conversation.turns().to_vec(),
            awaiting_first_answer: self.conversation.awaiting_first_answer(),
            has_credential: self.credential.is_some() || server_has_credential,
            created_at: self.created_at,
        }
    }
}

/// What clients see of a session. Never includes the credential itself.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub id: Uuid,
    pub track: String,
    pub current_question: String,
    pub turns: Vec<Turn>,
    pub awaiting_first_answer: bool,
    pub has_credential: bool,
    pub created_at: DateTime<Utc>,
}

pub type SessionHandle = Arc<Mutex<Session>>;

#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<Uuid, SessionHandle>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, session: Session) -> SessionHandle {
        let id = session.id;
        let handle = Arc::new(Mutex::new(session));
        self.inner.write().await.insert(id, handle.clone());
        handle
    }

    pub async fn get(&self, id: Uuid) -> Result<SessionHandle, AppError> {
        self.inner
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Interview {id} not found")))
    }

    pub async fn remove(&self, id: Uuid) -> Result<(), AppError> {
        self.inner
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound(format!("Interview {id} not found")))
    }

    pub async fn count(&self) -> usize {
        self.inner.read().await.len()
    }

    /// Drops every session idle for at least `ttl`. Returns how many went.
    ///
    /// A session whose lock is held has a turn in flight and is never dropped.
    pub async fn sweep_idle(&self, ttl: Duration) -> usize {
        let mut sessions = self.inner.write().await;
        let before = sessions.len();
        sessions.retain(|_, handle| match handle.try_lock() {
            Ok(session) => session.idle_for() < ttl,
            Err(_) => true,
        });
        before - sessions.len()
    }
}

/// Spawns the background sweep. Runs every `ttl`, capped at one minute.
pub fn spawn_idle_sweeper(store: SessionStore, ttl: Duration) -> JoinHandle<()> {
    let period = ttl.min(Duration::from_secs(60));
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        loop {
            ticker.tick().await;
            let dropped = store.sweep_idle(ttl).await;
            if dropped > 0 {
                info!(dropped, "Idle interviews expired");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_key_wins_over_server_key() {
        let s = Session::new("Finanzas", Some("mine".to_string()));
        assert_eq!(s.resolve_credential(Some("server")).unwrap(), "mine");
    }

    #[test]
    fn test_server_key_used_as_fallback() {
        let s = Session::new("Finanzas", None);
        assert_eq!(s.resolve_credential(Some("server")).unwrap(), "server");
    }

    #[test]
    fn test_no_key_anywhere_is_missing_credential() {
        let s = Session::new("Finanzas", None);
        assert!(matches!(
            s.resolve_credential(None),
            Err(AppError::MissingCredential)
        ));
    }

    #[test]
    fn test_blank_session_key_is_missing() {
        let s = Session::new("Finanzas", Some("  ".to_string()));
        assert!(matches!(
            s.resolve_credential(None),
            Err(AppError::MissingCredential)
        ));
    }

    #[test]
    fn test_view_hides_credential() {
        let s = Session::new("Finanzas", Some("AIza-secret".to_string()));
        let json = serde_json::to_string(&s.view(false)).unwrap();
        assert!(!json.contains("AIza-secret"));
        assert!(json.contains("\"has_credential\":true"));
    }

    #[tokio::test]
    async fn test_store_roundtrip_and_remove() {
        let store = SessionStore::new();
        let handle = store.insert(Session::new("Finanzas", None)).await;
        let id = handle.lock().await.id;

        assert_eq!(store.count().await, 1);
        assert!(Arc::ptr_eq(&store.get(id).await.unwrap(), &handle));

        store.remove(id).await.unwrap();
        assert!(matches!(store.get(id).await, Err(AppError::NotFound(_))));
        assert!(matches!(store.remove(id).await, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let store = SessionStore::new();
        let a = store.insert(Session::new("Finanzas", None)).await;
        let b = store.insert(Session::new("Marketing Digital", None)).await;

        a.lock().await.conversation.record_user_turn("solo en A");

        assert_eq!(a.lock().await.conversation.turns().len(), 2);
        assert_eq!(b.lock().await.conversation.turns().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweep_drops_only_idle_sessions() {
        let store = SessionStore::new();
        let stale = store.insert(Session::new("Finanzas", None)).await;
        let stale_id = stale.lock().await.id;

        tokio::time::advance(Duration::from_secs(50)).await;
        let fresh = store.insert(Session::new("Finanzas", None)).await;
        let fresh_id = fresh.lock().await.id;
        tokio::time::advance(Duration::from_secs(20)).await;

        assert_eq!(store.sweep_idle(Duration::from_secs(60)).await, 1);
        assert!(matches!(store.get(stale_id).await, Err(AppError::NotFound(_))));
        assert!(store.get(fresh_id).await.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_touch_postpones_expiry() {
        let store = SessionStore::new();
        let handle = store.insert(Session::new("Finanzas", None)).await;

        tokio::time::advance(Duration::from_secs(50)).await;
        handle.lock().await.touch();
        tokio::time::advance(Duration::from_secs(50)).await;

        assert_eq!(store.sweep_idle(Duration::from_secs(60)).await, 0);
        assert_eq!(store.count().await, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_locked_session_survives_sweep() {
        let store = SessionStore::new();
        let handle = store.insert(Session::new("Finanzas", None)).await;
        tokio::time::advance(Duration::from_secs(120)).await;

        let guard = handle.lock().await;
        assert_eq!(store.sweep_idle(Duration::from_secs(60)).await, 0);
        drop(guard);
        assert_eq!(store.sweep_idle(Duration::from_secs(60)).await, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_background_sweeper_expires_abandoned_session() {
        let store = SessionStore::new();
        store.insert(Session::new("Finanzas", None)).await;
        let sweeper = spawn_idle_sweeper(store.clone(), Duration::from_secs(10));

        tokio::time::sleep(Duration::from_secs(25)).await;
        tokio::task::yield_now().await;

        assert_eq!(store.count().await, 0);
        sweeper.abort();
    }
}
