//! Configuration discovery and effective settings resolution.
//!
//! docscan reads `docscan.toml|yaml|yml` from the working directory (or the
//! closest ancestor) and merges it with CLI flags to produce an `Effective`
//! config.
//! Defaults:
//! - `root`: `docs`
//! - `extension`: `rst`
//! - `omit`: `utilize`, `leverage`
//! - `output`: `human`
//! - `jobs`: 1
//! - `checker.server`: `http://localhost:8081`
//! - `checker.language`: `en-US`
//! - `checker.timeout_secs`: 30
//!
//! Overrides precedence: CLI > config file > defaults.

use crate::checker::languagetool::{DEFAULT_LANGUAGE, DEFAULT_SERVER, DEFAULT_TIMEOUT_SECS};
use crate::checker::LanguageToolConfig;
use crate::error::ConfigError;
use crate::output::OutputMode;
use crate::scan::ScanOptions;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_NAMES: [&str; 3] = ["docscan.toml", "docscan.yaml", "docscan.yml"];
pub const DEFAULT_ROOT: &str = "docs";
pub const DEFAULT_EXTENSION: &str = "rst";
pub const DEFAULT_OMIT: [&str; 2] = ["utilize", "leverage"];

#[derive(Debug, Default, Deserialize, Clone)]
/// Grammar checker section under `[checker]`.
pub struct CheckerCfg {
    pub server: Option<String>,
    pub language: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Root configuration loaded from `docscan.toml|yaml`.
pub struct DocscanConfig {
    pub root: Option<String>,
    pub extension: Option<String>,
    pub omit: Option<Vec<String>>,
    pub output: Option<String>,
    pub jobs: Option<usize>,
    #[serde(default)]
    pub checker: Option<CheckerCfg>,
}

#[derive(Debug, Default, Clone)]
/// Values supplied on the command line; `None` falls through to config.
pub struct CliOverrides {
    pub config: Option<String>,
    pub root: Option<String>,
    pub extension: Option<String>,
    pub omit: Vec<String>,
    pub no_default_omit: bool,
    pub server: Option<String>,
    pub language: Option<String>,
    pub jobs: Option<usize>,
    pub output: Option<String>,
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by commands after applying precedence.
pub struct Effective {
    /// Config file that was loaded, if any.
    pub config_path: Option<PathBuf>,
    pub root: PathBuf,
    pub extension: String,
    pub omit: Vec<String>,
    pub output: OutputMode,
    pub jobs: usize,
    pub server: String,
    pub language: String,
    pub timeout: Duration,
}

impl Effective {
    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            root: self.root.clone(),
            extension: self.extension.clone(),
            omit: self.omit.clone(),
            jobs: self.jobs,
        }
    }

    pub fn checker_config(&self) -> LanguageToolConfig {
        LanguageToolConfig {
            server: self.server.clone(),
            language: self.language.clone(),
            timeout: self.timeout,
        }
    }
}

/// Walk upward from `start` to find a config file.
///
/// Stops at the first directory holding a `docscan.*` file, or at a `.git`
/// directory (returning `None` there).
pub fn find_config(start: &Path) -> Option<PathBuf> {
    let mut cur = start;
    loop {
        for name in CONFIG_NAMES {
            let p = cur.join(name);
            if p.is_file() {
                return Some(p);
            }
        }
        if cur.join(".git").exists() {
            return None;
        }
        cur = cur.parent()?;
    }
}

/// Load a config file, choosing the parser by extension.
pub fn load_config(path: &Path) -> Result<DocscanConfig, ConfigError> {
    let s = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let is_yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    );
    if is_yaml {
        serde_yaml::from_str(&s).map_err(|source| ConfigError::Yaml {
            path: path.to_path_buf(),
            source,
        })
    } else {
        toml::from_str(&s).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Resolve `Effective` by merging CLI flags, discovered config, and defaults.
///
/// `cwd` is where config discovery starts when no `--config` is given.
pub fn resolve_effective(cli: &CliOverrides, cwd: &Path) -> Result<Effective, ConfigError> {
    let config_path = match cli.config.as_ref() {
        Some(p) => Some(PathBuf::from(p)),
        None => find_config(cwd),
    };
    let cfg = match config_path.as_ref() {
        Some(p) => load_config(p)?,
        None => DocscanConfig::default(),
    };
    let checker = cfg.checker.unwrap_or_default();

    // A root from the config file is relative to that file; CLI and default
    // roots are relative to the working directory.
    let root = match (cli.root.as_ref(), cfg.root) {
        (Some(r), _) => PathBuf::from(r),
        (None, Some(r)) => {
            let r = PathBuf::from(r);
            match config_path.as_ref().and_then(|p| p.parent()) {
                Some(dir) if r.is_relative() => dir.join(r),
                _ => r,
            }
        }
        (None, None) => PathBuf::from(DEFAULT_ROOT),
    };

    let extension = cli
        .extension
        .clone()
        .or(cfg.extension)
        .unwrap_or_else(|| DEFAULT_EXTENSION.to_string());
    let extension = extension.trim_start_matches('.').to_string();

    // CLI words replace the list; --no-default-omit starts from empty
    let omit_src: Vec<String> = if !cli.omit.is_empty() {
        cli.omit.clone()
    } else if cli.no_default_omit {
        Vec::new()
    } else {
        cfg.omit
            .unwrap_or_else(|| DEFAULT_OMIT.iter().map(|s| s.to_string()).collect())
    };
    let mut omit: Vec<String> = Vec::with_capacity(omit_src.len());
    for w in omit_src {
        if !w.is_empty() && !omit.contains(&w) {
            omit.push(w);
        }
    }

    let output_name = cli
        .output
        .clone()
        .or(cfg.output)
        .unwrap_or_else(|| "human".to_string());
    let output = OutputMode::parse(&output_name)
        .ok_or(ConfigError::InvalidOutput { value: output_name })?;

    let jobs = cli.jobs.or(cfg.jobs).unwrap_or(1).max(1);

    let server = cli
        .server
        .clone()
        .or(checker.server)
        .unwrap_or_else(|| DEFAULT_SERVER.to_string());
    let language = cli
        .language
        .clone()
        .or(checker.language)
        .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string());
    let timeout = Duration::from_secs(checker.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS));

    Ok(Effective {
        config_path,
        root,
        extension,
        omit,
        output,
        jobs,
        server,
        language,
        timeout,
    })
}
