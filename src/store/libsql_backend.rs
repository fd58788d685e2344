//! libSQL backend: async `SessionStore` implementation.
//!
//! Supports local file and in-memory databases. Every save is a single
//! `INSERT ... ON CONFLICT DO UPDATE` statement, so a row is never observed
//! half-written.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use libsql::{Connection, Database as LibSqlDatabase, params};
use tracing::{debug, info};

use crate::conversation::{LeadUpdate, Step};
use crate::error::DatabaseError;
use crate::store::migrations;
use crate::store::traits::{Lead, SessionStore};

/// libSQL database backend.
///
/// Stores a single connection that is reused for all operations.
/// `libsql::Connection` is `Send + Sync` and safe for concurrent async use.
pub struct LibSqlBackend {
    #[allow(dead_code)]
    db: Arc<LibSqlDatabase>,
    conn: Connection,
}

impl LibSqlBackend {
    /// Open (or create) a local database file and run migrations.
    pub async fn new_local(path: &Path) -> Result<Self, DatabaseError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                DatabaseError::Pool(format!("Failed to create database directory: {e}"))
            })?;
        }

        let db = libsql::Builder::new_local(path)
            .build()
            .await
            .map_err(|e| DatabaseError::Pool(format!("Failed to open libSQL database: {e}")))?;

        let backend = Self::from_database(db).await?;
        info!(path = %path.display(), "Database opened");
        Ok(backend)
    }

    /// Create an in-memory database (for tests).
    pub async fn new_memory() -> Result<Self, DatabaseError> {
        let db = libsql::Builder::new_local(":memory:")
            .build()
            .await
            .map_err(|e| {
                DatabaseError::Pool(format!("Failed to create in-memory database: {e}"))
            })?;

        Self::from_database(db).await
    }

    async fn from_database(db: LibSqlDatabase) -> Result<Self, DatabaseError> {
        let conn = db
            .connect()
            .map_err(|e| DatabaseError::Pool(format!("Failed to create connection: {e}")))?;

        migrations::run_migrations(&conn).await?;
        Ok(Self {
            db: Arc::new(db),
            conn,
        })
    }

    /// Get the connection.
    fn conn(&self) -> &Connection {
        &self.conn
    }
}

// ── Helper functions ────────────────────────────────────────────────

/// Convert `Option<&str>` to libsql Value.
fn opt_text(s: Option<&str>) -> libsql::Value {
    match s {
        Some(s) => libsql::Value::Text(s.to_string()),
        None => libsql::Value::Null,
    }
}

fn from_unix(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(secs, 0).unwrap_or(DateTime::<Utc>::MIN_UTC)
}

const LEAD_COLUMNS: &str = "session_id, lang, name, phone, registration_date, step";

fn row_to_lead(row: &libsql::Row) -> Result<Lead, libsql::Error> {
    let registered: i64 = row.get(4).unwrap_or(0);

    Ok(Lead {
        session_id: row.get(0)?,
        lang: row.get(1).ok(),
        name: row.get(2).ok(),
        phone: row.get(3).ok(),
        registration_date: from_unix(registered),
        step: row.get(5)?,
    })
}

// Empty strings never overwrite a stored value. `registration_date` is only
// written by the INSERT branch.
const UPSERT_PARTIAL: &str = "
    INSERT INTO leads (session_id, lang, name, phone, registration_date, step)
    VALUES (?1, NULLIF(?2, ''), NULLIF(?3, ''), NULLIF(?4, ''), ?5, ?6)
    ON CONFLICT (session_id) DO UPDATE SET
        lang = COALESCE(excluded.lang, leads.lang),
        name = COALESCE(excluded.name, leads.name),
        phone = COALESCE(excluded.phone, leads.phone),
        step = excluded.step";

const UPSERT_RESET: &str = "
    INSERT INTO leads (session_id, lang, name, phone, registration_date, step)
    VALUES (?1, NULL, NULL, NULL, ?2, ?3)
    ON CONFLICT (session_id) DO UPDATE SET
        lang = NULL,
        name = NULL,
        phone = NULL,
        step = excluded.step";

// ── Trait implementation ────────────────────────────────────────────

#[async_trait]
impl SessionStore for LibSqlBackend {
    async fn get_lead(&self, session_id: &str) -> Result<Option<Lead>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                &format!("SELECT {LEAD_COLUMNS} FROM leads WHERE session_id = ?1"),
                params![session_id],
            )
            .await
            .map_err(|e| DatabaseError::Query(format!("get_lead: {e}")))?;

        match rows.next().await {
            Ok(Some(row)) => row_to_lead(&row)
                .map(Some)
                .map_err(|e| DatabaseError::Query(format!("get_lead row: {e}"))),
            Ok(None) => Ok(None),
            Err(e) => Err(DatabaseError::Query(format!("get_lead: {e}"))),
        }
    }

    async fn save(&self, session_id: &str, update: &LeadUpdate) -> Result<(), DatabaseError> {
        let now = Utc::now().timestamp();

        let result = match update {
            LeadUpdate::Partial(fields) => {
                self.conn()
                    .execute(
                        UPSERT_PARTIAL,
                        params![
                            session_id,
                            opt_text(fields.language.map(|l| l.code())),
                            opt_text(fields.name.as_deref()),
                            opt_text(fields.phone.as_deref()),
                            now,
                            fields.step.as_str()
                        ],
                    )
                    .await
            }
            LeadUpdate::Reset => {
                self.conn()
                    .execute(
                        UPSERT_RESET,
                        params![session_id, now, Step::AwaitingLanguage.as_str()],
                    )
                    .await
            }
        };

        result.map_err(|e| DatabaseError::Query(format!("save_lead: {e}")))?;
        debug!(session_id, "Lead saved");
        Ok(())
    }
}
