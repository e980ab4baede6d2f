//! Documentation scanner.
//!
//! Discovers documents under a root, runs each through the grammar checker,
//! classifies findings, and looks for omission terms. A document that cannot
//! be read is recorded as a failure and skipped; root and checker failures
//! abort the whole scan.

use crate::checker::GrammarChecker;
use crate::classify::classify;
use crate::error::{ScanError, ScanResult};
use crate::models::{FileFailure, FileReport, Notice, ScanOutcome};
use glob::Pattern;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Inputs for a scan run.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    pub root: PathBuf,
    /// Extension without the leading dot.
    pub extension: String,
    pub omit: Vec<String>,
    /// Worker threads; 1 scans sequentially.
    pub jobs: usize,
}

/// Documents found under the root plus entries the walk could not read.
#[derive(Debug)]
pub struct Discovery {
    pub files: Vec<PathBuf>,
    pub failures: Vec<FileFailure>,
}

enum FileStep {
    Report(FileReport),
    Failed(FileFailure),
}

/// Find every file under `root` whose name ends with `.<extension>`.
///
/// Fails when the root is missing, not a directory, or unreadable.
pub fn discover(root: &Path, extension: &str) -> ScanResult<Discovery> {
    let meta = fs::metadata(root).map_err(|source| ScanError::Root {
        path: root.to_path_buf(),
        source,
    })?;
    if !meta.is_dir() {
        return Err(ScanError::NotADirectory {
            path: root.to_path_buf(),
        });
    }
    fs::read_dir(root).map_err(|source| ScanError::Root {
        path: root.to_path_buf(),
        source,
    })?;

    let pattern = format!(
        "{}/**/*.{}",
        Pattern::escape(&root.to_string_lossy()),
        Pattern::escape(extension)
    );
    debug!(%pattern, "discovering documents");

    let mut files = Vec::new();
    let mut failures = Vec::new();
    // The pattern is built from escaped parts and is always valid.
    let entries = glob::glob(&pattern).map_err(|e| ScanError::Root {
        path: root.to_path_buf(),
        source: std::io::Error::new(std::io::ErrorKind::InvalidInput, e.msg),
    })?;
    for entry in entries {
        match entry {
            Ok(p) if p.is_file() => files.push(p),
            Ok(_) => {}
            Err(e) => {
                warn!(path = %e.path().display(), error = %e.error(), "unreadable entry");
                failures.push(FileFailure {
                    path: e.path().to_string_lossy().to_string(),
                    reason: e.error().to_string(),
                });
            }
        }
    }
    Ok(Discovery { files, failures })
}

/// Omission terms present in `content`, each reported once, in list order.
pub fn find_omissions<'a>(content: &str, words: &'a [String]) -> Vec<&'a str> {
    words
        .iter()
        .filter(|w| !w.is_empty() && content.contains(w.as_str()))
        .map(String::as_str)
        .collect()
}

/// Check already-loaded document text and build its report.
pub fn report_for(
    path: &str,
    content: &str,
    checker: &dyn GrammarChecker,
    omit: &[String],
) -> Result<FileReport, crate::error::CheckerError> {
    let findings = checker.check(content)?;
    let mut notices: Vec<Notice> = findings
        .into_iter()
        .map(|f| Notice::Finding {
            category: classify(&f),
            path: path.to_string(),
            line: f.line,
            rule_id: f.rule_id,
            message: f.message,
        })
        .collect();
    notices.extend(find_omissions(content, omit).into_iter().map(|w| {
        Notice::Omission {
            path: path.to_string(),
            word: w.to_string(),
        }
    }));
    Ok(FileReport {
        path: path.to_string(),
        notices,
    })
}

/// Load and check a single document.
pub fn scan_file(
    path: &Path,
    checker: &dyn GrammarChecker,
    omit: &[String],
) -> ScanResult<FileReport> {
    let content = fs::read_to_string(path).map_err(|source| ScanError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let display = path.to_string_lossy().to_string();
    report_for(&display, &content, checker, omit).map_err(|source| ScanError::Checker {
        path: path.to_path_buf(),
        source,
    })
}

fn step(path: &Path, checker: &dyn GrammarChecker, omit: &[String]) -> ScanResult<FileStep> {
    match scan_file(path, checker, omit) {
        Ok(report) => {
            debug!(path = %report.path, notices = report.notices.len(), "checked");
            Ok(FileStep::Report(report))
        }
        Err(ScanError::Read { path, source }) => {
            warn!(path = %path.display(), error = %source, "skipping unreadable document");
            Ok(FileStep::Failed(FileFailure {
                path: path.to_string_lossy().to_string(),
                reason: source.to_string(),
            }))
        }
        Err(e) => Err(e),
    }
}

/// Receives each document's report as soon as it is available.
pub type ReportSink<'a> = dyn FnMut(&FileReport) -> std::io::Result<()> + 'a;

/// Check documents from a prior `discover` call.
///
/// Every report is handed to `sink` in discovery order before the next one.
/// Sequential scans call it right after each file; parallel scans flush the
/// finished prefix in order. On a fatal checker error, reports for the
/// documents before the failing one have already reached the sink.
pub fn scan_discovered(
    found: Discovery,
    opts: &ScanOptions,
    checker: &dyn GrammarChecker,
    sink: &mut ReportSink<'_>,
) -> ScanResult<ScanOutcome> {
    let Discovery {
        files,
        failures: mut all_failures,
    } = found;
    debug!(count = files.len(), jobs = opts.jobs, "documents discovered");

    let mut reports = Vec::new();
    let mut accept = |s: FileStep| -> ScanResult<()> {
        match s {
            FileStep::Report(r) => {
                sink(&r).map_err(|source| ScanError::Output { source })?;
                reports.push(r);
            }
            FileStep::Failed(f) => all_failures.push(f),
        }
        Ok(())
    };

    if opts.jobs <= 1 {
        for p in &files {
            accept(step(p, checker, &opts.omit)?)?;
        }
    } else {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(opts.jobs)
            .build()
            .map_err(|e| ScanError::Pool {
                reason: e.to_string(),
            })?;
        // keep every result so work finished before a failure still flushes
        let steps: Vec<ScanResult<FileStep>> = pool.install(|| {
            files
                .par_iter()
                .map(|p| step(p, checker, &opts.omit))
                .collect()
        });
        for s in steps {
            accept(s?)?;
        }
    }

    Ok(ScanOutcome::new(reports, all_failures))
}
