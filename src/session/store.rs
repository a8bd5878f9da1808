//! In-process session store with idle eviction.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};
use uuid::Uuid;

use super::model::Session;

/// Process-wide session map keyed by respondent token.
///
/// The outer lock is held only for lookups, inserts, and sweeps. Each
/// session carries its own lock, which a request holds for the whole step,
/// so one respondent's spreadsheet I/O never blocks another's.
pub struct SessionStore {
    sessions: RwLock<HashMap<Uuid, Arc<Mutex<Session>>>>,
    idle_timeout: Duration,
}

impl SessionStore {
    pub fn new(idle_timeout: Duration) -> Arc<Self> {
        Arc::new(Self {
            sessions: RwLock::new(HashMap::new()),
            idle_timeout,
        })
    }

    /// Insert a fresh session and return its respondent token.
    pub async fn insert(&self, session: Session) -> Uuid {
        let id = session.respondent_id;
        self.sessions
            .write()
            .await
            .insert(id, Arc::new(Mutex::new(session)));
        debug!(session_id = %id, "Session created");
        id
    }

    pub async fn get(&self, id: Uuid) -> Option<Arc<Mutex<Session>>> {
        self.sessions.read().await.get(&id).map(Arc::clone)
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    /// Drop sessions idle past the timeout. Returns how many were evicted.
    pub async fn evict_idle(&self) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();

        sessions.retain(|id, slot| match slot.try_lock() {
            Ok(session) => {
                let keep = session.idle_for() < self.idle_timeout;
                if !keep {
                    debug!(
                        session_id = %id,
                        page = %session.page,
                        "Session evicted after idle timeout"
                    );
                }
                keep
            }
            // Locked means a request is mid-step; not idle.
            Err(_) => true,
        });

        let evicted = before - sessions.len();
        if evicted > 0 {
            info!(count = evicted, remaining = sessions.len(), "Evicted idle sessions");
        }
        evicted
    }
}

/// Spawn a background task that periodically evicts idle sessions.
pub fn spawn_eviction_task(
    store: Arc<SessionStore>,
    interval: Duration,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(interval);
        loop {
            interval.tick().await;
            store.evict_idle().await;
        }
    })
}
