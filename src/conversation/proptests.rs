//! Property-based tests for the conversation engine.

use std::sync::Arc;

use proptest::prelude::*;

use super::classify::{self, RESTART_TRIGGERS};
use super::engine::ConversationEngine;
use super::model::{Language, LeadUpdate, SessionRecord};
use super::state::Step;
use crate::config::BrandConfig;
use crate::locale::Catalog;

fn engine() -> ConversationEngine {
    ConversationEngine::new(Arc::new(Catalog::new(&BrandConfig::default()).unwrap()))
}

// ============================================================================
// Generators
// ============================================================================

fn arb_language() -> impl Strategy<Value = Language> {
    prop_oneof![
        Just(Language::En),
        Just(Language::Fa),
        Just(Language::Ar),
        Just(Language::Ru),
    ]
}

fn arb_step() -> impl Strategy<Value = Step> {
    prop_oneof![
        Just(Step::AwaitingLanguage),
        Just(Step::AwaitingName),
        Just(Step::AwaitingPhone),
        Just(Step::MainMenu),
        Just(Step::Unknown),
    ]
}

fn arb_record() -> impl Strategy<Value = SessionRecord> {
    (
        arb_step(),
        proptest::option::of(arb_language()),
        proptest::option::of("[A-Za-z ]{1,20}"),
        proptest::option::of("\\+[0-9]{6,12}"),
    )
        .prop_map(|(step, language, name, phone)| SessionRecord {
            step,
            language,
            name,
            phone,
            ..SessionRecord::new("prop-session")
        })
}

fn arb_input() -> impl Strategy<Value = String> {
    prop_oneof![
        "\\PC{0,30}",
        "[a-zA-Z0-9 ]{0,30}",
        Just("English (EN)".to_string()),
        Just("Book Consultation".to_string()),
        Just("دریافت کاتالوگ".to_string()),
    ]
}

fn arb_restart() -> impl Strategy<Value = String> {
    (prop::sample::select(RESTART_TRIGGERS.to_vec()), any::<bool>(), " {0,3}").prop_map(
        |(trigger, upper, pad)| {
            let t = if upper { trigger.to_uppercase() } else { trigger.to_string() };
            format!("{pad}{t}{pad}")
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    // A restart trigger resets from every step.
    #[test]
    fn prop_restart_is_total(record in arb_record(), input in arb_restart()) {
        let t = engine().handle(&record, &input);
        prop_assert_eq!(t.next.step, Step::AwaitingLanguage);
        prop_assert_eq!(t.update, Some(LeadUpdate::Reset));
        prop_assert!(t.next.language.is_none());
        prop_assert!(t.next.name.is_none());
        prop_assert!(t.next.phone.is_none());
        prop_assert_eq!(t.outbound.options.len(), 4);
    }

    // Every input gets exactly one non-empty reply.
    #[test]
    fn prop_always_replies(record in arb_record(), input in arb_input()) {
        let t = engine().handle(&record, &input);
        prop_assert!(!t.outbound.text.is_empty());
    }

    // Without a restart, the step either stays or advances by one.
    #[test]
    fn prop_progression_is_monotonic(record in arb_record(), input in arb_input()) {
        prop_assume!(!classify::is_restart_trigger(&input));
        let t = engine().handle(&record, &input);
        let from = record.step;
        let to = t.next.step;
        prop_assert!(
            to == from || from.can_transition_to(to),
            "{} -> {} on {:?}", from, to, input
        );
    }

    // Main-menu inputs never move the session or touch the store.
    #[test]
    fn prop_main_menu_is_stable(
        lang in arb_language(),
        input in arb_input(),
    ) {
        prop_assume!(!classify::is_restart_trigger(&input));
        let record = SessionRecord {
            step: Step::MainMenu,
            language: Some(lang),
            ..SessionRecord::new("prop-session")
        };
        let t = engine().handle(&record, &input);
        prop_assert_eq!(&t.next, &record);
        prop_assert!(t.update.is_none());
        prop_assert_eq!(t.outbound.options.len(), 5);
    }

    // The returned record is always the input record with the update applied.
    #[test]
    fn prop_next_matches_update(record in arb_record(), input in arb_input()) {
        let t = engine().handle(&record, &input);
        let expected = match &t.update {
            Some(update) => record.apply(update),
            None => record.clone(),
        };
        prop_assert_eq!(t.next, expected);
    }
}
