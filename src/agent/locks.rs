//! Per-session mutual exclusion.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};

/// A lock keyed by session id.
///
/// Holding the guard for a session blocks other holders of the same session
/// only. Entries are dropped once no task holds or waits on them.
#[derive(Default)]
pub struct SessionLocks {
    locks: Arc<RwLock<HashMap<String, Arc<Mutex<()>>>>>,
}

/// Guard returned by [`SessionLocks::acquire`]. Releases on drop.
pub struct SessionGuard {
    session_id: String,
    guard: Option<OwnedMutexGuard<()>>,
    locks: Arc<RwLock<HashMap<String, Arc<Mutex<()>>>>>,
}

impl SessionLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `session_id`.
    pub async fn acquire(&self, session_id: &str) -> SessionGuard {
        let lock = {
            let mut locks = self.locks.write().await;
            locks
                .entry(session_id.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone()
        };

        SessionGuard {
            session_id: session_id.to_string(),
            guard: Some(lock.lock_owned().await),
            locks: Arc::clone(&self.locks),
        }
    }

    #[cfg(test)]
    async fn tracked(&self) -> usize {
        self.locks.read().await.len()
    }
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        drop(self.guard.take());

        // Best effort: if the map is busy the entry is pruned by a later release.
        if let Ok(mut locks) = self.locks.try_write() {
            if locks
                .get(&self.session_id)
                .is_some_and(|lock| Arc::strong_count(lock) == 1)
            {
                locks.remove(&self.session_id);
            }
            locks.retain(|_, lock| Arc::strong_count(lock) > 1);
        }
    }
}
