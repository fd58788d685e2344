//! Conversation steps and the transitions between them.

use serde::{Deserialize, Serialize};

/// The steps of the lead-capture flow.
///
/// Progresses linearly: AwaitingLanguage → AwaitingName → AwaitingPhone →
/// MainMenu. A restart sends any step back to AwaitingLanguage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Step {
    #[serde(rename = "awaiting_lang_selection")]
    AwaitingLanguage,
    #[serde(rename = "awaiting_name")]
    AwaitingName,
    #[serde(rename = "awaiting_phone")]
    AwaitingPhone,
    #[serde(rename = "main_menu")]
    MainMenu,
    /// A stored step value this build does not recognize.
    #[serde(rename = "unknown", other)]
    Unknown,
}

impl Step {
    /// Steps the engine knows how to handle, in flow order.
    pub const FLOW: [Step; 4] = [
        Step::AwaitingLanguage,
        Step::AwaitingName,
        Step::AwaitingPhone,
        Step::MainMenu,
    ];

    /// Check if a forward transition from `self` to `target` is valid.
    ///
    /// MainMenu → MainMenu is valid (menu choices do not leave the menu).
    /// Restarts are not covered here; they are allowed from anywhere.
    pub fn can_transition_to(&self, target: Step) -> bool {
        use Step::*;
        matches!(
            (self, target),
            (AwaitingLanguage, AwaitingName)
                | (AwaitingName, AwaitingPhone)
                | (AwaitingPhone, MainMenu)
                | (MainMenu, MainMenu)
        )
    }

    /// The string persisted in the `step` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AwaitingLanguage => "awaiting_lang_selection",
            Self::AwaitingName => "awaiting_name",
            Self::AwaitingPhone => "awaiting_phone",
            Self::MainMenu => "main_menu",
            Self::Unknown => "unknown",
        }
    }

    /// Parse a persisted step string. Unrecognized values map to `Unknown`.
    pub fn from_stored(s: &str) -> Step {
        Self::FLOW
            .into_iter()
            .find(|step| step.as_str() == s)
            .unwrap_or(Step::Unknown)
    }
}

impl Default for Step {
    fn default() -> Self {
        Self::AwaitingLanguage
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_transitions() {
        use Step::*;
        let transitions = [
            (AwaitingLanguage, AwaitingName),
            (AwaitingName, AwaitingPhone),
            (AwaitingPhone, MainMenu),
            (MainMenu, MainMenu),
        ];
        for (from, to) in transitions {
            assert!(from.can_transition_to(to), "{from} should transition to {to}");
        }
    }

    #[test]
    fn invalid_transitions() {
        use Step::*;
        // Skip steps
        assert!(!AwaitingLanguage.can_transition_to(AwaitingPhone));
        assert!(!AwaitingName.can_transition_to(MainMenu));
        // Go backward
        assert!(!AwaitingPhone.can_transition_to(AwaitingName));
        // Unknown goes nowhere
        assert!(!Unknown.can_transition_to(AwaitingLanguage));
    }

    #[test]
    fn display_matches_serde() {
        for step in Step::FLOW {
            let json = serde_json::to_string(&step).unwrap();
            assert_eq!(format!("\"{step}\""), json, "Display and serde should match for {step:?}");
        }
    }

    #[test]
    fn stored_strings_roundtrip() {
        for step in Step::FLOW {
            assert_eq!(Step::from_stored(step.as_str()), step);
        }
    }

    #[test]
    fn unrecognized_stored_step_is_unknown() {
        assert_eq!(Step::from_stored("awaiting_email"), Step::Unknown);
        assert_eq!(Step::from_stored(""), Step::Unknown);

        let parsed: Step = serde_json::from_str("\"legacy_step\"").unwrap();
        assert_eq!(parsed, Step::Unknown);
    }

    #[test]
    fn default_is_awaiting_language() {
        assert_eq!(Step::default(), Step::AwaitingLanguage);
    }
}
