//! Localization table: static message content keyed by (message key, language).
//!
//! English is mandatory for every key and serves as the fallback for any
//! language without a translation.

pub mod catalog;
pub mod content;

pub use catalog::{Catalog, MessageKey, escape_html};
