//! Lead Assist: multilingual lead-capture bot.

pub mod agent;
pub mod channels;
pub mod config;
pub mod conversation;
pub mod error;
pub mod locale;
pub mod routes;
pub mod store;
