//! Shared data models for scan results and printers.

pub mod finding;

pub use finding::{Category, Finding};

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
/// A single printable diagnostic produced for a document.
pub enum Notice {
    /// A grammar finding after classification.
    Finding {
        category: Category,
        path: String,
        line: usize,
        rule_id: String,
        message: String,
    },
    /// A configured omission term present in the document.
    Omission { path: String, word: String },
}

#[derive(Debug, Clone, Serialize)]
/// All notices for one document, findings first, then omissions.
pub struct FileReport {
    pub path: String,
    pub notices: Vec<Notice>,
}

#[derive(Debug, Clone, Serialize)]
/// A document that could not be read; the scan continues without it.
pub struct FileFailure {
    pub path: String,
    pub reason: String,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
/// Aggregated counts used by printers and exit status.
pub struct Summary {
    pub files: usize,
    pub future_tense: usize,
    pub passive_voice: usize,
    pub grammar: usize,
    pub omissions: usize,
    pub failures: usize,
}

impl Summary {
    pub fn notices(&self) -> usize {
        self.future_tense + self.passive_voice + self.grammar + self.omissions
    }
}

#[derive(Debug, Clone, Serialize)]
/// Scan results container, reports in discovery order.
pub struct ScanOutcome {
    pub reports: Vec<FileReport>,
    pub failures: Vec<FileFailure>,
    pub summary: Summary,
}

impl ScanOutcome {
    /// Build an outcome and tally its summary.
    pub fn new(reports: Vec<FileReport>, failures: Vec<FileFailure>) -> Self {
        let mut summary = Summary {
            files: reports.len(),
            failures: failures.len(),
            ..Summary::default()
        };
        for n in reports.iter().flat_map(|r| r.notices.iter()) {
            match n {
                Notice::Finding { category, .. } => match category {
                    Category::FutureTense => summary.future_tense += 1,
                    Category::PassiveVoice => summary.passive_voice += 1,
                    Category::Grammar => summary.grammar += 1,
                },
                Notice::Omission { .. } => summary.omissions += 1,
            }
        }
        ScanOutcome {
            reports,
            failures,
            summary,
        }
    }

    pub fn notices(&self) -> impl Iterator<Item = &Notice> {
        self.reports.iter().flat_map(|r| r.notices.iter())
    }
}
