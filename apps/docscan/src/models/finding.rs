//! Checker findings and the categories they are reported under.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq)]
/// An issue reported by the grammar checker for one document.
pub struct Finding {
    pub rule_id: String,
    pub message: String,
    /// 1-based line within the document.
    pub line: usize,
}

impl Finding {
    pub fn new(rule_id: impl Into<String>, message: impl Into<String>, line: usize) -> Self {
        Finding {
            rule_id: rule_id.into(),
            message: message.into(),
            line,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
/// Reporting category for a finding.
pub enum Category {
    FutureTense,
    PassiveVoice,
    Grammar,
}

impl Category {
    /// Human output tag, including brackets.
    pub fn tag(self) -> &'static str {
        match self {
            Category::FutureTense => "[Future Tense]",
            Category::PassiveVoice => "[Passive Voice?]",
            Category::Grammar => "[Grammar]",
        }
    }
}
