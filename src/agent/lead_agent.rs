//! Per-session request handling around the conversation engine.

use std::path::Path;
use std::sync::Arc;

use futures::StreamExt;
use tokio::task::JoinSet;
use tracing::{debug, error, warn};

use crate::agent::locks::SessionLocks;
use crate::channels::{Channel, MessageStream};
use crate::config::BrandConfig;
use crate::conversation::{ConversationEngine, LeadUpdate, OutboundMessage, SessionRecord};
use crate::error::Error;
use crate::locale::Catalog;
use crate::store::{LibSqlBackend, SessionStore};

/// Runs one inbound text through the store and the engine.
///
/// The load → compute → save cycle for a session runs under that session's
/// lock, so two messages from one user can never interleave. Different
/// sessions proceed in parallel.
pub struct LeadAgent {
    store: Arc<dyn SessionStore>,
    engine: ConversationEngine,
    locks: SessionLocks,
}

impl LeadAgent {
    pub fn new(store: Arc<dyn SessionStore>, engine: ConversationEngine) -> Self {
        Self {
            store,
            engine,
            locks: SessionLocks::new(),
        }
    }

    /// Open the on-disk store and build the catalog for `brand`.
    ///
    /// Fails if the database cannot be opened or migrated, or if any message
    /// lacks an English entry.
    pub async fn open(db_path: &Path, brand: &BrandConfig) -> Result<Self, Error> {
        let store = LibSqlBackend::new_local(db_path).await?;
        let catalog = Catalog::new(brand)?;
        Ok(Self::new(
            Arc::new(store),
            ConversationEngine::new(Arc::new(catalog)),
        ))
    }

    /// Handle one inbound text and return the reply.
    ///
    /// Store faults never reach the caller: a failed load falls back to the
    /// initial record for the reply and a failed save is logged. After a
    /// failed load only a restart is persisted.
    pub async fn process(&self, session_id: &str, text: &str) -> OutboundMessage {
        let _guard = self.locks.acquire(session_id).await;

        let (record, loaded) = match self.store.load(session_id).await {
            Ok(record) => (record, true),
            Err(e) => {
                warn!(session_id, error = %e, "Failed to load session, using initial record");
                (SessionRecord::new(session_id), false)
            }
        };

        let transition = self.engine.handle(&record, text);
        debug!(
            session_id,
            from = %record.step,
            to = %transition.next.step,
            "Session transition"
        );

        // A transition computed from the fallback record only reflects the
        // stored row when it is a restart.
        let update = transition
            .update
            .as_ref()
            .filter(|update| loaded || matches!(update, LeadUpdate::Reset));
        if let Some(update) = update {
            if let Err(e) = self.store.save(session_id, update).await {
                error!(session_id, error = %e, "Failed to save session");
            }
        }

        transition.outbound
    }

    /// Drive a pull-based channel: handle each update on its own task and
    /// send the reply back through `channel`. Returns when the stream ends.
    pub async fn run_stream(self: Arc<Self>, mut stream: MessageStream, channel: Arc<dyn Channel>) {
        let mut tasks = JoinSet::new();

        while let Some(update) = stream.next().await {
            let agent = Arc::clone(&self);
            let channel = Arc::clone(&channel);
            tasks.spawn(async move {
                let reply = agent.process(&update.session_id, &update.text).await;
                if let Err(e) = channel.send(&update.session_id, &reply).await {
                    error!(
                        session_id = %update.session_id,
                        channel = channel.name(),
                        error = %e,
                        "Failed to send reply"
                    );
                }
            });

            // Reap finished tasks so the set does not grow unbounded.
            while tasks.try_join_next().is_some() {}
        }

        while tasks.join_next().await.is_some() {}
    }
}
