//! Output rendering for scan results.
//!
//! Supports `human` (default) and `json` outputs. Human mode writes each
//! document's lines to stdout as soon as that document is checked; failures
//! and the summary go to stderr once the scan ends, so an empty scan prints
//! nothing on stdout. JSON mode writes one document at the end.

use crate::models::{FileReport, Notice, ScanOutcome};
use crate::utils;
use owo_colors::OwoColorize;
use serde_json::json;
use serde_json::Value as JsonVal;
use std::io::{self, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Output format selected by `--output` or `output` in config.
pub enum OutputMode {
    Human,
    Json,
}

impl OutputMode {
    /// Parse a mode name; `None` for anything but `human` or `json`.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "human" => Some(OutputMode::Human),
            "json" => Some(OutputMode::Json),
            _ => None,
        }
    }
}

/// Render one notice in its literal human form.
pub fn render_notice(n: &Notice) -> String {
    match n {
        Notice::Finding {
            category,
            path,
            line,
            message,
            ..
        } => format!("{} {}:{}:{}", category.tag(), path, line, message),
        Notice::Omission { path, word } => format!("[Omit Word] Found '{}' in {}", word, path),
    }
}

/// All human lines for an outcome, in report order.
pub fn render_human(res: &ScanOutcome) -> Vec<String> {
    res.notices().map(render_notice).collect()
}

/// Compose the JSON document (pure) for testing/snapshot purposes.
pub fn compose_scan_json(res: &ScanOutcome) -> JsonVal {
    let notices: Vec<&Notice> = res.notices().collect();
    json!({
        "notices": notices,
        "failures": res.failures,
        "summary": res.summary,
    })
}

/// Write one document's lines as soon as it has been checked.
///
/// No-op in JSON mode, where everything is written by `write_trailer`.
pub fn write_report<W: Write>(out: &mut W, report: &FileReport, mode: OutputMode) -> io::Result<()> {
    if mode == OutputMode::Human {
        for n in &report.notices {
            writeln!(out, "{}", render_notice(n))?;
        }
        out.flush()?;
    }
    Ok(())
}

/// Finish a completed scan: the JSON document, or stderr failures and summary.
pub fn write_trailer<W: Write>(out: &mut W, res: &ScanOutcome, mode: OutputMode) -> io::Result<()> {
    match mode {
        OutputMode::Json => {
            let doc = serde_json::to_string_pretty(&compose_scan_json(res))
                .map_err(io::Error::other)?;
            writeln!(out, "{}", doc)?;
        }
        OutputMode::Human => {
            for f in &res.failures {
                eprintln!(
                    "{} cannot read {}: {}",
                    utils::error_prefix(),
                    f.path,
                    f.reason
                );
            }
            let s = &res.summary;
            let summary = format!(
                "scanned files={} future_tense={} passive_voice={} grammar={} omissions={} failures={}",
                s.files, s.future_tense, s.passive_voice, s.grammar, s.omissions, s.failures
            );
            if utils::use_colors() {
                eprintln!("{} {}", utils::info_prefix(), summary.bold());
            } else {
                eprintln!("{} {}", utils::info_prefix(), summary);
            }
        }
    }
    Ok(())
}
