//! Typed localization table keyed by (message key, language).

use std::collections::HashMap;

use tracing::debug;

use super::content;
use crate::config::BrandConfig;
use crate::conversation::Language;
use crate::error::LocaleError;

/// Every message the engine can send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKey {
    Welcome,
    LanguagePrompt,
    NamePrompt,
    PhonePrompt,
    RegistrationComplete,
    Services,
    Platform,
    Contact,
    Booking,
    Catalog,
    MenuFallback,
    RestartHint,
}

impl MessageKey {
    pub const ALL: [MessageKey; 12] = [
        MessageKey::Welcome,
        MessageKey::LanguagePrompt,
        MessageKey::NamePrompt,
        MessageKey::PhonePrompt,
        MessageKey::RegistrationComplete,
        MessageKey::Services,
        MessageKey::Platform,
        MessageKey::Contact,
        MessageKey::Booking,
        MessageKey::Catalog,
        MessageKey::MenuFallback,
        MessageKey::RestartHint,
    ];
}

impl std::fmt::Display for MessageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

/// Rendered message templates with brand data already substituted.
///
/// Built once at startup. Construction fails if any key lacks an English
/// entry, so lookups never come back empty.
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: HashMap<(MessageKey, Language), String>,
}

impl Catalog {
    /// Build the catalog for a brand.
    pub fn new(brand: &BrandConfig) -> Result<Self, LocaleError> {
        Self::from_entries(content::entries(brand))
    }

    /// Build from raw entries, checking English completeness.
    pub fn from_entries(
        entries: impl IntoIterator<Item = (MessageKey, Language, String)>,
    ) -> Result<Self, LocaleError> {
        let entries: HashMap<_, _> = entries
            .into_iter()
            .map(|(key, lang, text)| ((key, lang), text))
            .collect();

        if let Some(missing) = MessageKey::ALL
            .into_iter()
            .find(|key| !entries.contains_key(&(*key, Language::En)))
        {
            return Err(LocaleError::MissingFallback {
                key: missing.to_string(),
            });
        }

        debug!(entries = entries.len(), "Localization catalog built");
        Ok(Self { entries })
    }

    #[cfg(test)]
    fn has_translation(&self, key: MessageKey, lang: Language) -> bool {
        self.entries.contains_key(&(key, lang))
    }

    /// Render `key` in `lang`, falling back to English.
    ///
    /// `params` replace `{name}`-style placeholders. Values are HTML-escaped
    /// since they usually come from the user.
    pub fn render(&self, key: MessageKey, lang: Language, params: &[(&str, &str)]) -> String {
        let template = self
            .entries
            .get(&(key, lang))
            .or_else(|| self.entries.get(&(key, Language::En)))
            .map(String::as_str)
            .unwrap_or_default();

        params
            .iter()
            .fold(template.to_string(), |text, (name, value)| {
                text.replace(&format!("{{{name}}}"), &escape_html(value))
            })
    }

    /// The five main-menu quick replies for `lang`, in fixed order.
    pub fn menu_options(&self, lang: Language) -> Vec<String> {
        content::menu_options(lang)
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    /// The four language quick replies shown on the welcome screen.
    pub fn language_options(&self) -> Vec<String> {
        content::LANGUAGE_OPTIONS
            .iter()
            .map(|s| s.to_string())
            .collect()
    }
}

/// Escape text for Telegram's HTML parse mode.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
