//! Error types for Lead Assist.
//!
//! Only infrastructure faults live here. The conversation engine is total and
//! has no error type: unrecognized input always resolves to a fallback reply.

/// Top-level error type for startup.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("Localization error: {0}")]
    Locale(#[from] LocaleError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Database-related errors.
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    #[error("Connection pool error: {0}")]
    Pool(String),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Migration failed: {0}")]
    Migration(String),
}

/// Channel-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    #[error("Channel {name} failed to start: {reason}")]
    StartupFailed { name: String, reason: String },

    #[error("Failed to send response on channel {name}: {reason}")]
    SendFailed { name: String, reason: String },
}

/// Localization table errors, raised once at startup.
#[derive(Debug, thiserror::Error)]
pub enum LocaleError {
    #[error("Message key {key} has no English fallback")]
    MissingFallback { key: String },
}
