//! Input classification by literal keyword matching.
//!
//! Each classifier is an ordered list of (tag, keywords) rules evaluated
//! first-match-wins against the case-folded input. Order matters: keyword
//! sets overlap (e.g. "EN" is a substring of many words).

use super::model::Language;

/// Inputs that restart the flow from any step. Compared case-insensitively
/// against the whole trimmed input.
pub const RESTART_TRIGGERS: [&str; 3] = ["/start", "start", "شروع"];

/// A main-menu entry recognized from free text or a quick-reply tap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuChoice {
    Services,
    Platform,
    Contact,
    Booking,
    Catalog,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 5] = [
        MenuChoice::Services,
        MenuChoice::Platform,
        MenuChoice::Contact,
        MenuChoice::Booking,
        MenuChoice::Catalog,
    ];
}

impl std::fmt::Display for MenuChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Services => "services",
            Self::Platform => "platform",
            Self::Contact => "contact",
            Self::Booking => "booking",
            Self::Catalog => "catalog",
        };
        f.write_str(s)
    }
}

/// A single classification rule. Keywords are stored case-folded.
#[derive(Debug, Clone, Copy)]
pub struct KeywordRule<T: 'static> {
    pub tag: T,
    pub keywords: &'static [&'static str],
}

impl<T: Copy> KeywordRule<T> {
    fn matches(&self, folded: &str) -> bool {
        self.keywords.iter().any(|k| folded.contains(k))
    }
}

/// Language markers, in priority order.
pub static LANGUAGE_RULES: &[KeywordRule<Language>] = &[
    KeywordRule {
        tag: Language::En,
        keywords: &["en"],
    },
    KeywordRule {
        tag: Language::Fa,
        keywords: &["fa", "فارسی"],
    },
    KeywordRule {
        tag: Language::Ar,
        keywords: &["ar", "العربية"],
    },
    KeywordRule {
        tag: Language::Ru,
        keywords: &["ru", "русский"],
    },
];

/// Main-menu keyword sets, in priority order.
pub static MENU_RULES: &[KeywordRule<MenuChoice>] = &[
    KeywordRule {
        tag: MenuChoice::Services,
        keywords: &["services", "خدمات", "услуги"],
    },
    KeywordRule {
        tag: MenuChoice::Platform,
        keywords: &["artin", "آرتین", "آرتين", "артина"],
    },
    KeywordRule {
        tag: MenuChoice::Contact,
        keywords: &["ceo", "contact", "مدیر", "مدير", "تماس", "контакты"],
    },
    KeywordRule {
        tag: MenuChoice::Booking,
        keywords: &["book", "رزرو", "حجز", "забронировать"],
    },
    KeywordRule {
        tag: MenuChoice::Catalog,
        keywords: &["catalog", "کاتالوگ", "الكتالوج", "каталог"],
    },
];

/// Evaluate `rules` in order and return the tag of the first match.
pub fn first_match<T: Copy>(rules: &[KeywordRule<T>], input: &str) -> Option<T> {
    let folded = input.to_lowercase();
    rules.iter().find(|r| r.matches(&folded)).map(|r| r.tag)
}

/// Whether `input` is one of the restart triggers.
pub fn is_restart_trigger(input: &str) -> bool {
    let folded = input.trim().to_lowercase();
    RESTART_TRIGGERS.iter().any(|t| folded == *t)
}

/// Detect a language marker anywhere in `input`.
pub fn detect_language(input: &str) -> Option<Language> {
    first_match(LANGUAGE_RULES, input)
}

/// Classify a main-menu input.
pub fn classify_menu(input: &str) -> Option<MenuChoice> {
    first_match(MENU_RULES, input)
}
