//! docscan core library.
//!
//! Scans documentation trees for grammar findings and omission words using
//! an external grammar checker, and prints categorized diagnostics.
//!
//! High-level modules:
//! - `cli`: CLI argument parsing (binary uses this).
//! - `config`: Discovery and effective configuration resolution.
//! - `scan`: Document discovery and per-file checking.
//! - `classify`: Category precedence for findings.
//! - `checker`: Grammar checker trait and LanguageTool client.
//! - `models`: Findings, notices, and scan outcome structs.
//! - `output`: Human/JSON printers.
//! - `app`: Command orchestration and exit codes.
pub mod app;
pub mod checker;
pub mod classify;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod output;
pub mod scan;
pub mod utils;
