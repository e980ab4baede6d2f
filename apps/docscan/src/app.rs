//! Command orchestration: resolves config, connects the checker, scans,
//! prints, and maps the result to a process exit code.

use crate::checker::{GrammarChecker, LanguageToolChecker};
use crate::cli::{CheckArgs, Cli, Commands};
use crate::config::{self, Effective};
use crate::error::{AppError, CheckerError};
use crate::models::ScanOutcome;
use crate::output::{self, OutputMode};
use crate::{scan, utils};
use std::io::{self, Write};
use std::path::Path;
use tracing::info;

pub const EXIT_OK: i32 = 0;
/// Notices under `--check`, or unreadable documents.
pub const EXIT_ISSUES: i32 = 1;
pub const EXIT_FATAL: i32 = 2;

/// Run a parsed command line and return the exit code.
pub fn run(cli: Cli) -> i32 {
    match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            EXIT_OK
        }
        Commands::Check(args) => {
            let cwd = std::env::current_dir().unwrap_or_else(|_| ".".into());
            let stdout = io::stdout();
            let mut out = stdout.lock();
            match run_check(&args, &cwd, connect_languagetool, &mut out) {
                Ok(code) => code,
                Err(e) => {
                    eprintln!("{} {}", utils::error_prefix(), e);
                    EXIT_FATAL
                }
            }
        }
    }
}

fn connect_languagetool(eff: &Effective) -> Result<Box<dyn GrammarChecker>, CheckerError> {
    LanguageToolChecker::connect(eff.checker_config()).map(|c| Box::new(c) as Box<dyn GrammarChecker>)
}

/// Resolve configuration for `args`, scan, and write results to `out`.
///
/// `connect` is only called when at least one document was discovered.
/// Lines already written stay written when a fatal error ends the scan.
pub fn run_check<W, F>(args: &CheckArgs, cwd: &Path, connect: F, out: &mut W) -> Result<i32, AppError>
where
    W: Write,
    F: FnOnce(&Effective) -> Result<Box<dyn GrammarChecker>, CheckerError>,
{
    let eff = config::resolve_effective(&args.overrides(), cwd)?;
    if eff.config_path.is_none() && eff.output != OutputMode::Json {
        eprintln!(
            "{} No docscan.toml found; using defaults.",
            utils::note_prefix()
        );
    }
    let outcome = scan_with(&eff, connect, &mut *out)?;
    output::write_trailer(out, &outcome, eff.output)?;
    Ok(exit_code(&outcome, args.check))
}

/// Discover documents and check them, connecting lazily and streaming each
/// document's lines to `out`.
pub fn scan_with<W, F>(eff: &Effective, connect: F, out: &mut W) -> Result<ScanOutcome, AppError>
where
    W: Write,
    F: FnOnce(&Effective) -> Result<Box<dyn GrammarChecker>, CheckerError>,
{
    let opts = eff.scan_options();
    let found = scan::discover(&opts.root, &opts.extension)?;
    if found.files.is_empty() {
        info!(root = %opts.root.display(), "no documents found");
        return Ok(ScanOutcome::new(Vec::new(), found.failures));
    }
    let checker = connect(eff)?;
    let mode = eff.output;
    let outcome = scan::scan_discovered(found, &opts, checker.as_ref(), &mut |r| {
        output::write_report(&mut *out, r, mode)
    })?;
    Ok(outcome)
}

pub fn exit_code(outcome: &ScanOutcome, fail_on_notices: bool) -> i32 {
    if !outcome.failures.is_empty() || (fail_on_notices && outcome.summary.notices() > 0) {
        EXIT_ISSUES
    } else {
        EXIT_OK
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScanError;
    use crate::models::Finding;
    use clap::Parser;
    use std::fs;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::tempdir;

    struct SentenceChecker;

    impl GrammarChecker for SentenceChecker {
        fn check(&self, text: &str) -> Result<Vec<Finding>, CheckerError> {
            Ok(text
                .lines()
                .enumerate()
                .filter(|(_, l)| l.contains(" will "))
                .map(|(i, _)| Finding::new("FUTURE_TENSE", "Avoid future tense.", i + 1))
                .collect())
        }
    }

    /// Answers the first document, then loses the server.
    struct DyingChecker {
        calls: AtomicUsize,
    }

    impl GrammarChecker for DyingChecker {
        fn check(&self, _text: &str) -> Result<Vec<Finding>, CheckerError> {
            if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
                Ok(vec![Finding::new("FUTURE_TENSE", "Avoid future tense.", 1)])
            } else {
                Err(CheckerError::Transport {
                    reason: "server died".into(),
                })
            }
        }
    }

    fn args_for(root: &Path) -> CheckArgs {
        CheckArgs {
            root: Some(root.to_string_lossy().to_string()),
            ..CheckArgs::default()
        }
    }

    fn effective(root: &Path) -> Effective {
        let dir = root.parent().unwrap();
        config::resolve_effective(&args_for(root).overrides(), dir).unwrap()
    }

    fn fake(_: &Effective) -> Result<Box<dyn GrammarChecker>, CheckerError> {
        Ok(Box::new(SentenceChecker))
    }

    fn dying(_: &Effective) -> Result<Box<dyn GrammarChecker>, CheckerError> {
        Ok(Box::new(DyingChecker {
            calls: AtomicUsize::new(0),
        }))
    }

    fn unreachable_checker(eff: &Effective) -> Result<Box<dyn GrammarChecker>, CheckerError> {
        Err(CheckerError::Unavailable {
            url: eff.server.clone(),
            reason: "connection refused".into(),
        })
    }

    /// A repo-like tempdir with `.git` so config discovery stops there.
    fn docs_tree() -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();
        let root = dir.path().join("docs");
        fs::create_dir(&root).unwrap();
        (dir, root)
    }

    #[test]
    fn test_end_to_end_example_lines() {
        let (dir, root) = docs_tree();
        let doc = root.join("runner.rst");
        fs::write(
            &doc,
            "Runner\n======\n\nThe model will be optimized automatically.\nWe utilize zero copy.\n",
        )
        .unwrap();

        let mut buf: Vec<u8> = Vec::new();
        let code = run_check(&args_for(&root), dir.path(), fake, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let path = doc.to_string_lossy();
        assert_eq!(code, EXIT_OK);
        assert_eq!(
            text.lines().collect::<Vec<_>>(),
            vec![
                format!("[Future Tense] {}:4:Avoid future tense.", path),
                format!("[Omit Word] Found 'utilize' in {}", path),
            ]
        );
    }

    #[test]
    fn test_lines_before_checker_failure_are_written() {
        let (dir, root) = docs_tree();
        fs::write(root.join("a.rst"), "The model will be optimized.\n").unwrap();
        fs::write(root.join("b.rst"), "Second page.\n").unwrap();

        let mut buf: Vec<u8> = Vec::new();
        let err = run_check(&args_for(&root), dir.path(), dying, &mut buf).unwrap_err();
        assert!(matches!(
            err,
            AppError::Scan(ScanError::Checker {
                source: CheckerError::Transport { .. },
                ..
            })
        ));
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(
            text.lines().collect::<Vec<_>>(),
            vec![format!(
                "[Future Tense] {}:1:Avoid future tense.",
                root.join("a.rst").to_string_lossy()
            )]
        );
    }

    #[test]
    fn test_zero_documents_run_check_exits_ok() {
        let (dir, root) = docs_tree();
        fs::write(root.join("notes.md"), "will utilize").unwrap();

        let mut args = args_for(&root);
        args.check = true;
        let mut buf: Vec<u8> = Vec::new();
        // an unreachable checker is never contacted
        let code = run_check(&args, dir.path(), unreachable_checker, &mut buf).unwrap();
        assert!(buf.is_empty());
        assert_eq!(code, EXIT_OK);
    }

    #[test]
    fn test_run_with_missing_root_exits_fatal() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing");
        let cli = Cli::try_parse_from([
            "docscan",
            "check",
            "--root",
            missing.to_str().unwrap(),
        ])
        .unwrap();
        assert_eq!(run(cli), EXIT_FATAL);
    }

    #[test]
    fn test_missing_root_is_fatal_scan_error() {
        let (dir, _root) = docs_tree();
        let eff = effective(&dir.path().join("missing"));
        let err = scan_with(&eff, fake, &mut Vec::<u8>::new()).unwrap_err();
        assert!(matches!(err, AppError::Scan(ScanError::Root { .. })));
    }

    #[test]
    fn test_unavailable_checker_is_fatal() {
        let (_dir, root) = docs_tree();
        fs::write(root.join("a.rst"), "Text.\n").unwrap();
        let eff = effective(&root);
        let err = scan_with(&eff, unreachable_checker, &mut Vec::<u8>::new()).unwrap_err();
        assert!(matches!(err, AppError::Checker(CheckerError::Unavailable { .. })));
    }

    #[test]
    fn test_check_flag_and_failures_set_exit_code() {
        let (_dir, root) = docs_tree();
        fs::write(root.join("a.rst"), "We leverage it.\n").unwrap();
        let eff = effective(&root);
        let outcome = scan_with(&eff, fake, &mut Vec::<u8>::new()).unwrap();
        assert_eq!(exit_code(&outcome, false), EXIT_OK);
        assert_eq!(exit_code(&outcome, true), EXIT_ISSUES);

        fs::write(root.join("b.rst"), [0xc3, 0x28]).unwrap();
        let outcome = scan_with(&eff, fake, &mut Vec::<u8>::new()).unwrap();
        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(exit_code(&outcome, false), EXIT_ISSUES);
    }
}
