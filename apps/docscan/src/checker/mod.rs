//! Grammar checking capability.
//!
//! The scanner only depends on `GrammarChecker`; the LanguageTool client is
//! the production implementation.

pub mod languagetool;

pub use languagetool::{LanguageToolChecker, LanguageToolConfig};

use crate::error::CheckerError;
use crate::models::Finding;

/// Checks a document's text and returns findings in checker order.
pub trait GrammarChecker: Send + Sync {
    fn check(&self, text: &str) -> Result<Vec<Finding>, CheckerError>;
}
