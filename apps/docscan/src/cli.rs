//! CLI argument parsing via `clap`.

use crate::config::CliOverrides;
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "docscan",
    version,
    about = "Grammar and wording scanner for documentation",
    long_about = "docscan — walk a documentation tree, run every document through a LanguageTool server, and report future tense, passive voice, grammar findings and omission words.\n\nConfiguration precedence: CLI > docscan.toml > defaults.",
    after_help = "Examples:\n  docscan check --root docs\n  docscan check --root docsrc/source --omit utilize --omit leverage\n  docscan check --server http://localhost:8010 --output json",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
/// Supported subcommands.
pub enum Commands {
    /// Show version
    #[command(about = "Show version", long_about = "Print the current docscan version.")]
    Version,
    /// Scan documentation files
    #[command(
        about = "Scan documentation",
        long_about = "Recursively scan files with the documentation extension under the root and print one line per finding or omission word.",
        after_help = "Examples:\n  docscan check\n  DOCSCAN_ROOT=manual docscan check --ext txt --check"
    )]
    Check(CheckArgs),
}

#[derive(Args, Debug, Default)]
pub struct CheckArgs {
    #[arg(long, env = "DOCSCAN_ROOT", help = "Documentation root (default: docs)")]
    pub root: Option<String>,
    #[arg(long = "ext", help = "Documentation file extension (default: rst)")]
    pub extension: Option<String>,
    #[arg(long = "omit", value_name = "WORD", help = "Omission word; repeat to list several (replaces configured list)")]
    pub omit: Vec<String>,
    #[arg(long, action = clap::ArgAction::SetTrue, help = "Start from an empty omission list")]
    pub no_default_omit: bool,
    #[arg(long, help = "LanguageTool server URL (default: http://localhost:8081)")]
    pub server: Option<String>,
    #[arg(long, help = "Language code passed to the checker (default: en-US)")]
    pub language: Option<String>,
    #[arg(long, help = "Worker threads for checking files (default: 1)")]
    pub jobs: Option<usize>,
    #[arg(long, help = "Output mode: human|json (default: human)")]
    pub output: Option<String>,
    #[arg(long, help = "Path to a docscan.toml|yaml file")]
    pub config: Option<String>,
    #[arg(long, action = clap::ArgAction::SetTrue, help = "Exit non-zero when any notice is reported")]
    pub check: bool,
}

impl CheckArgs {
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            config: self.config.clone(),
            root: self.root.clone(),
            extension: self.extension.clone(),
            omit: self.omit.clone(),
            no_default_omit: self.no_default_omit,
            server: self.server.clone(),
            language: self.language.clone(),
            jobs: self.jobs,
            output: self.output.clone(),
        }
    }
}
