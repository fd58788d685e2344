//! Async interface for lead persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::conversation::{Language, LeadUpdate, SessionRecord, Step};
use crate::error::DatabaseError;

/// A persisted lead row, as stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lead {
    pub session_id: String,
    pub lang: Option<String>,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub registration_date: DateTime<Utc>,
    pub step: String,
}

impl Lead {
    /// Convert to the engine's record type.
    ///
    /// Unrecognized language codes load as unset; unrecognized steps load as
    /// `Step::Unknown`.
    pub fn into_record(self) -> SessionRecord {
        SessionRecord {
            step: Step::from_stored(&self.step),
            language: self.lang.as_deref().and_then(Language::from_code),
            name: self.name,
            phone: self.phone,
            registered_at: Some(self.registration_date),
            session_id: self.session_id,
        }
    }
}

/// Durable mapping from session id to session record.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Fetch the raw lead row, if any.
    async fn get_lead(&self, session_id: &str) -> Result<Option<Lead>, DatabaseError>;

    /// Apply an update. Creates the row on first save.
    async fn save(&self, session_id: &str, update: &LeadUpdate) -> Result<(), DatabaseError>;

    /// Load the session record. An absent row yields the initial record.
    async fn load(&self, session_id: &str) -> Result<SessionRecord, DatabaseError> {
        Ok(self
            .get_lead(session_id)
            .await?
            .map(Lead::into_record)
            .unwrap_or_else(|| SessionRecord::new(session_id)))
    }
}
