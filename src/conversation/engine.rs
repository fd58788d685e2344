//! Pure transition function over (record, input).
//!
//! Given the same record and text, `handle` always produces the same next
//! record, store update and reply. Persistence and transport live in the
//! surrounding adapters.

use std::sync::Arc;

use tracing::debug;

use super::classify::{self, MenuChoice};
use super::model::{Language, LeadFields, LeadUpdate, OutboundMessage, SessionRecord};
use super::state::Step;
use crate::locale::{Catalog, MessageKey};

/// Result of handling one input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// The record after the update has been applied.
    pub next: SessionRecord,
    /// What to persist. `None` when nothing changed.
    pub update: Option<LeadUpdate>,
    /// Exactly one reply per input.
    pub outbound: OutboundMessage,
}

impl Transition {
    fn stay(record: &SessionRecord, outbound: OutboundMessage) -> Self {
        Self {
            next: record.clone(),
            update: None,
            outbound,
        }
    }

    fn apply(record: &SessionRecord, update: LeadUpdate, outbound: OutboundMessage) -> Self {
        Self {
            next: record.apply(&update),
            update: Some(update),
            outbound,
        }
    }
}

/// Drives the lead-capture flow.
#[derive(Debug, Clone)]
pub struct ConversationEngine {
    catalog: Arc<Catalog>,
}

impl ConversationEngine {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    /// Handle one inbound text for a session.
    ///
    /// A restart trigger wins over every step. Otherwise the current step
    /// picks the branch, and unrecognized input falls back to a re-prompt.
    pub fn handle(&self, record: &SessionRecord, input: &str) -> Transition {
        if classify::is_restart_trigger(input) {
            debug!(session_id = %record.session_id, from = %record.step, "Restart requested");
            return Transition::apply(record, LeadUpdate::Reset, self.welcome());
        }

        match record.step {
            Step::AwaitingLanguage => self.on_language(record, input),
            Step::AwaitingName => self.on_name(record, input),
            Step::AwaitingPhone => self.on_phone(record, input),
            Step::MainMenu => self.on_menu(record, input),
            Step::Unknown => Transition::stay(
                record,
                OutboundMessage::text(self.render(MessageKey::RestartHint, record)),
            ),
        }
    }

    fn on_language(&self, record: &SessionRecord, input: &str) -> Transition {
        let Some(lang) = classify::detect_language(input) else {
            let prompt = self.render(MessageKey::LanguagePrompt, record);
            return Transition::stay(
                record,
                OutboundMessage::text(prompt).with_options(self.catalog.language_options()),
            );
        };

        let update = LeadUpdate::Partial(LeadFields::step(Step::AwaitingName).with_language(lang));
        let prompt = self.catalog.render(MessageKey::NamePrompt, lang, &[]);
        Transition::apply(record, update, OutboundMessage::text(prompt))
    }

    fn on_name(&self, record: &SessionRecord, input: &str) -> Transition {
        if input.is_empty() {
            let prompt = self.render(MessageKey::NamePrompt, record);
            return Transition::stay(record, OutboundMessage::text(prompt));
        }

        let update = LeadUpdate::Partial(LeadFields::step(Step::AwaitingPhone).with_name(input));
        let prompt = self.catalog.render(
            MessageKey::PhonePrompt,
            record.reply_language(),
            &[("name", input)],
        );
        Transition::apply(record, update, OutboundMessage::text(prompt))
    }

    fn on_phone(&self, record: &SessionRecord, input: &str) -> Transition {
        let lang = record.reply_language();

        if input.is_empty() {
            let name = record.name.as_deref().unwrap_or_default();
            let prompt = self
                .catalog
                .render(MessageKey::PhonePrompt, lang, &[("name", name)]);
            return Transition::stay(record, OutboundMessage::text(prompt));
        }

        let update = LeadUpdate::Partial(LeadFields::step(Step::MainMenu).with_phone(input));
        let text = self.catalog.render(MessageKey::RegistrationComplete, lang, &[]);
        Transition::apply(
            record,
            update,
            OutboundMessage::text(text).with_options(self.catalog.menu_options(lang)),
        )
    }

    fn on_menu(&self, record: &SessionRecord, input: &str) -> Transition {
        let lang = record.reply_language();
        let choice = classify::classify_menu(input);
        debug!(
            session_id = %record.session_id,
            choice = ?choice.map(|c| c.to_string()),
            "Menu input classified"
        );

        let key = match choice {
            Some(MenuChoice::Services) => MessageKey::Services,
            Some(MenuChoice::Platform) => MessageKey::Platform,
            Some(MenuChoice::Contact) => MessageKey::Contact,
            Some(MenuChoice::Booking) => MessageKey::Booking,
            Some(MenuChoice::Catalog) => MessageKey::Catalog,
            None => MessageKey::MenuFallback,
        };

        let text = self.catalog.render(key, lang, &[]);
        Transition::stay(
            record,
            OutboundMessage::text(text).with_options(self.catalog.menu_options(lang)),
        )
    }

    fn welcome(&self) -> OutboundMessage {
        OutboundMessage::text(self.catalog.render(MessageKey::Welcome, Language::En, &[]))
            .with_options(self.catalog.language_options())
    }

    fn render(&self, key: MessageKey, record: &SessionRecord) -> String {
        self.catalog.render(key, record.reply_language(), &[])
    }
}
