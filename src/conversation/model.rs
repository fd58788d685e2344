//! Session record, lead updates and outbound message models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::state::Step;

/// Languages the bot can talk in. English is the fallback for missing content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Fa,
    Ar,
    Ru,
}

impl Language {
    pub const ALL: [Language; 4] = [Language::En, Language::Fa, Language::Ar, Language::Ru];

    /// Two-letter code persisted in the `lang` column.
    pub fn code(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Fa => "fa",
            Self::Ar => "ar",
            Self::Ru => "ru",
        }
    }

    /// Parse a persisted language code. Unknown or empty codes yield `None`.
    pub fn from_code(code: &str) -> Option<Language> {
        Self::ALL.into_iter().find(|lang| lang.code() == code)
    }
}

impl Default for Language {
    fn default() -> Self {
        Self::En
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// One end-user conversation as persisted by the session store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub session_id: String,
    pub step: Step,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// First-ever contact. `None` until the record is first persisted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registered_at: Option<DateTime<Utc>>,
}

impl SessionRecord {
    /// The record a session starts with before anything is persisted.
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            step: Step::AwaitingLanguage,
            language: None,
            name: None,
            phone: None,
            registered_at: None,
        }
    }

    /// Language to render replies in, English when unset.
    pub fn reply_language(&self) -> Language {
        self.language.unwrap_or_default()
    }

    /// Apply an update with the same merge rules the store uses.
    ///
    /// `Partial` sets each non-empty field and retains the rest; `Reset`
    /// returns to the first step and erases language, name and phone.
    /// `registered_at` is never touched.
    pub fn apply(&self, update: &LeadUpdate) -> SessionRecord {
        let mut next = self.clone();
        match update {
            LeadUpdate::Partial(fields) => {
                next.step = fields.step;
                if let Some(lang) = fields.language {
                    next.language = Some(lang);
                }
                if let Some(name) = non_empty(fields.name.as_deref()) {
                    next.name = Some(name.to_string());
                }
                if let Some(phone) = non_empty(fields.phone.as_deref()) {
                    next.phone = Some(phone.to_string());
                }
            }
            LeadUpdate::Reset => {
                next.step = Step::AwaitingLanguage;
                next.language = None;
                next.name = None;
                next.phone = None;
            }
        }
        next
    }
}

/// Field values carried by a partial update. `None` or empty means "retain".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LeadFields {
    pub step: Step,
    pub language: Option<Language>,
    pub name: Option<String>,
    pub phone: Option<String>,
}

impl LeadFields {
    pub fn step(step: Step) -> Self {
        Self {
            step,
            ..Default::default()
        }
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.language = Some(language);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }
}

/// A write request against the session store.
///
/// Plain optional-field merging cannot tell "no new value" from "erase", so
/// erasure is a separate variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeadUpdate {
    /// Upsert: set non-empty fields, retain the rest.
    Partial(LeadFields),
    /// Explicit restart: back to the first step with language/name/phone erased.
    Reset,
}

/// A reply to the user: rich text plus an optional quick-reply set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundMessage {
    pub text: String,
    #[serde(default)]
    pub options: Vec<String>,
}

impl OutboundMessage {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            options: Vec::new(),
        }
    }

    pub fn with_options(mut self, options: Vec<String>) -> Self {
        self.options = options;
        self
    }
}

pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registered(session_id: &str) -> SessionRecord {
        SessionRecord {
            registered_at: Some(Utc::now()),
            ..SessionRecord::new(session_id)
        }
    }

    #[test]
    fn new_record_is_initial_state() {
        let record = SessionRecord::new("42");
        assert_eq!(record.session_id, "42");
        assert_eq!(record.step, Step::AwaitingLanguage);
        assert!(record.language.is_none());
        assert!(record.name.is_none());
        assert!(record.phone.is_none());
        assert!(record.registered_at.is_none());
    }

    #[test]
    fn language_codes_roundtrip() {
        for lang in Language::ALL {
            assert_eq!(Language::from_code(lang.code()), Some(lang));
            let json = serde_json::to_string(&lang).unwrap();
            assert_eq!(json, format!("\"{}\"", lang.code()));
        }
        assert_eq!(Language::from_code(""), None);
        assert_eq!(Language::from_code("de"), None);
    }

    #[test]
    fn partial_update_sets_non_empty_fields() {
        let record = registered("1");
        let next = record.apply(&LeadUpdate::Partial(
            LeadFields::step(Step::AwaitingName).with_language(Language::Fa),
        ));
        assert_eq!(next.step, Step::AwaitingName);
        assert_eq!(next.language, Some(Language::Fa));
        assert_eq!(next.registered_at, record.registered_at);
    }

    #[test]
    fn partial_update_retains_on_empty_value() {
        let record = SessionRecord {
            step: Step::AwaitingPhone,
            language: Some(Language::En),
            name: Some("Jane".to_string()),
            ..registered("1")
        };
        let next = record.apply(&LeadUpdate::Partial(
            LeadFields::step(Step::MainMenu).with_name("").with_phone("+100"),
        ));
        assert_eq!(next.name.as_deref(), Some("Jane"));
        assert_eq!(next.phone.as_deref(), Some("+100"));
        assert_eq!(next.language, Some(Language::En));
    }

    #[test]
    fn reset_erases_fields_but_keeps_registration() {
        let record = SessionRecord {
            step: Step::MainMenu,
            language: Some(Language::Ar),
            name: Some("Omar".to_string()),
            phone: Some("+971".to_string()),
            ..registered("1")
        };
        let next = record.apply(&LeadUpdate::Reset);
        assert_eq!(next.step, Step::AwaitingLanguage);
        assert!(next.language.is_none());
        assert!(next.name.is_none());
        assert!(next.phone.is_none());
        assert_eq!(next.registered_at, record.registered_at);
        assert_eq!(next.session_id, "1");
    }

    #[test]
    fn outbound_message_serde_defaults_options() {
        let msg: OutboundMessage = serde_json::from_str(r#"{"text":"hi"}"#).unwrap();
        assert_eq!(msg, OutboundMessage::text("hi"));

        let json = serde_json::to_value(
            OutboundMessage::text("pick").with_options(vec!["a".into(), "b".into()]),
        )
        .unwrap();
        assert_eq!(json["options"], serde_json::json!(["a", "b"]));
    }
}
