//! Finding classification.
//!
//! Categories are tried in `Category::PRECEDENCE` order and the first one
//! whose predicate matches wins. `Grammar` is last and always matches, so
//! every finding lands in exactly one category.

use crate::models::{Category, Finding};

/// Rule id fragment marking future-tense constructions.
pub const FUTURE_TENSE_RULE: &str = "FUTURE_TENSE";
/// Rule id fragment marking passive-voice constructions.
pub const PASSIVE_VOICE_RULE: &str = "PASSIVE_VOICE";

impl Category {
    /// Evaluation order for classification.
    pub const PRECEDENCE: [Category; 3] = [
        Category::FutureTense,
        Category::PassiveVoice,
        Category::Grammar,
    ];

    /// Whether a finding satisfies this category's own predicate.
    pub fn matches(self, finding: &Finding) -> bool {
        match self {
            Category::FutureTense => {
                finding.rule_id.contains(FUTURE_TENSE_RULE)
                    || finding.message.to_lowercase().contains("will")
            }
            Category::PassiveVoice => finding.rule_id.contains(PASSIVE_VOICE_RULE),
            Category::Grammar => true,
        }
    }
}

/// Classify a finding into its reporting category.
pub fn classify(finding: &Finding) -> Category {
    Category::PRECEDENCE
        .into_iter()
        .find(|c| c.matches(finding))
        .unwrap_or(Category::Grammar)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_future_tense_rule_id() {
        let f = Finding::new("EN_FUTURE_TENSE", "Consider present tense.", 3);
        assert_eq!(classify(&f), Category::FutureTense);
    }

    #[test]
    fn test_will_in_message_any_case() {
        let f = Finding::new("SOME_RULE", "This WILL read better rephrased.", 1);
        assert_eq!(classify(&f), Category::FutureTense);
        let f = Finding::new("SOME_RULE", "Will is ambiguous here.", 1);
        assert_eq!(classify(&f), Category::FutureTense);
    }

    #[test]
    fn test_passive_voice_rule_id() {
        let f = Finding::new("PASSIVE_VOICE", "Passive voice detected.", 2);
        assert_eq!(classify(&f), Category::PassiveVoice);
    }

    #[test]
    fn test_future_tense_takes_precedence_over_passive() {
        // passive rule whose message mentions "will"
        let f = Finding::new("PASSIVE_VOICE", "It will be done by the tool.", 2);
        assert_eq!(classify(&f), Category::FutureTense);
    }

    #[test]
    fn test_fallback_is_grammar() {
        let f = Finding::new("MORFOLOGIK_RULE_EN_US", "Possible spelling mistake found.", 4);
        assert_eq!(classify(&f), Category::Grammar);
    }

    #[test]
    fn test_precedence_order_is_fixed() {
        assert_eq!(
            Category::PRECEDENCE,
            [
                Category::FutureTense,
                Category::PassiveVoice,
                Category::Grammar
            ]
        );
        // grammar is the catch-all
        assert!(Category::Grammar.matches(&Finding::new("", "", 1)));
    }
}
