use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::{Mutex, RwLock};
use tracing::debug;

use crate::level::DifficultyLevel;
use crate::session::types::{SessionSnapshot, StudentSession};

/// Widest history window any consumer of a snapshot needs (the confidence
/// exit check looks at the last 20 attempts).
pub const SNAPSHOT_WINDOW: usize = 20;

/// Process-wide keyed session state.
///
/// Sessions are created on first reference and evicted by explicit reset or
/// by the age-based cleanup sweep. Each session sits behind its own mutex so
/// concurrent requests for the same id serialize (log appends are never
/// lost) while distinct sessions stay independent.
pub struct SessionStore {
    sessions: RwLock<HashMap<String, Arc<Mutex<StudentSession>>>>,
    default_level: DifficultyLevel,
}

impl SessionStore {
    pub fn new(default_level: DifficultyLevel) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            default_level,
        }
    }

    pub fn get_or_create(&self, session_id: &str) -> Arc<Mutex<StudentSession>> {
        if let Some(session) = self.sessions.read().get(session_id) {
            return Arc::clone(session);
        }
        let mut sessions = self.sessions.write();
        Arc::clone(sessions.entry(session_id.to_string()).or_insert_with(|| {
            debug!(session_id, "creating session");
            Arc::new(Mutex::new(StudentSession::new(
                session_id,
                self.default_level,
            )))
        }))
    }

    pub fn snapshot(&self, session_id: &str) -> Option<SessionSnapshot> {
        let session = {
            let sessions = self.sessions.read();
            sessions.get(session_id).cloned()
        }?;
        let guard = session.lock();
        Some(SessionSnapshot::of(&guard, SNAPSHOT_WINDOW))
    }

    /// Explicit reset; returns whether a session existed.
    pub fn reset(&self, session_id: &str) -> bool {
        self.sessions.write().remove(session_id).is_some()
    }

    /// Evicts sessions idle longer than `ttl`; returns the evicted count.
    pub fn cleanup_expired(&self, ttl: Duration) -> usize {
        let cutoff = chrono::Utc::now().timestamp_millis() - ttl.as_millis() as i64;
        let mut sessions = self.sessions.write();
        let before = sessions.len();
        sessions.retain(|_, session| session.lock().last_active >= cutoff);
        before - sessions.len()
    }

    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_on_first_use() {
        let store = SessionStore::new(DifficultyLevel::new(3, 1));
        assert!(store.is_empty());
        let session = store.get_or_create("learner-1");
        assert_eq!(session.lock().current_level, DifficultyLevel::new(3, 1));
        assert_eq!(store.len(), 1);
        // Second lookup returns the same session.
        let again = store.get_or_create("learner-1");
        assert!(Arc::ptr_eq(&session, &again));
    }

    #[test]
    fn reset_removes_session() {
        let store = SessionStore::new(DifficultyLevel::default());
        store.get_or_create("learner-2");
        assert!(store.reset("learner-2"));
        assert!(!store.reset("learner-2"));
        assert!(store.is_empty());
    }

    #[test]
    fn cleanup_evicts_only_idle_sessions() {
        let store = SessionStore::new(DifficultyLevel::default());
        let stale = store.get_or_create("stale");
        store.get_or_create("fresh");
        stale.lock().last_active -= 10_000;

        let evicted = store.cleanup_expired(Duration::from_secs(5));
        assert_eq!(evicted, 1);
        assert_eq!(store.len(), 1);
        assert!(store.snapshot("fresh").is_some());
        assert!(store.snapshot("stale").is_none());
    }
}
