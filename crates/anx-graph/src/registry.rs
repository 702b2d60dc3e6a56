use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};

use crate::session::{Session, SessionId};

/// Every session created in this process, keyed by conversation identity.
///
/// Entries are never removed; each session sits behind its own mutex so steps
/// on different conversations do not contend.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<SessionId, Arc<Mutex<Session>>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Session for `id`, created on first use
    pub async fn get_or_create(&self, id: &str) -> Arc<Mutex<Session>> {
        if let Some(session) = self.sessions.read().await.get(id) {
            return Arc::clone(session);
        }

        let mut sessions = self.sessions.write().await;
        let session = sessions.entry(id.to_string()).or_insert_with(|| {
            tracing::debug!(session_id = %id, "creating session");
            Arc::new(Mutex::new(Session::new()))
        });
        Arc::clone(session)
    }

    pub async fn get(&self, id: &str) -> Option<Arc<Mutex<Session>>> {
        self.sessions.read().await.get(id).cloned()
    }

    /// Unset every session's cursor, keeping recorded placeholders.
    /// Returns the number of sessions reset.
    pub async fn reset_all(&self) -> usize {
        let sessions: Vec<Arc<Mutex<Session>>> =
            self.sessions.read().await.values().cloned().collect();
        for session in &sessions {
            session.lock().await.reset();
        }
        sessions.len()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    /// Drop every session
    pub async fn clear(&self) {
        self.sessions.write().await.clear();
    }
}
