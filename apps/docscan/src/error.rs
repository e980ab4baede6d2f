//! Error types for configuration, checking, and scanning.

use std::path::PathBuf;

/// Grammar checker failures. Any of these aborts the run.
#[derive(Debug, thiserror::Error)]
pub enum CheckerError {
    #[error("grammar checker unavailable at {url}: {reason}")]
    Unavailable { url: String, reason: String },

    #[error("request to grammar checker failed: {reason}")]
    Transport { reason: String },

    #[error("grammar checker returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("could not decode grammar checker response: {reason}")]
    Decode { reason: String },
}

/// Configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config {path} is not valid TOML: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("config {path} is not valid YAML: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("unknown output mode '{value}' (expected human or json)")]
    InvalidOutput { value: String },
}

/// Scan failures. `Read` is isolated per file; the rest are fatal.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("cannot access root {path}: {source}")]
    Root {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("root {path} is not a directory")]
    NotADirectory { path: PathBuf },

    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("checking {path} failed: {source}")]
    Checker {
        path: PathBuf,
        #[source]
        source: CheckerError,
    },

    #[error("cannot start worker pool: {reason}")]
    Pool { reason: String },

    #[error("cannot write output: {source}")]
    Output {
        #[source]
        source: std::io::Error,
    },
}

pub type ScanResult<T> = Result<T, ScanError>;

/// Fatal failures of a CLI run; each maps to exit code 2.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error(transparent)]
    Checker(#[from] CheckerError),

    #[error("cannot write output: {0}")]
    Output(#[from] std::io::Error),
}
