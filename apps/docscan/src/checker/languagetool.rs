//! LanguageTool HTTP client.
//!
//! Talks to a LanguageTool server (`/v2/check`). The client is built once,
//! checked once in `connect`, and reused for every document.

use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use super::GrammarChecker;
use crate::error::CheckerError;
use crate::models::Finding;

pub const DEFAULT_SERVER: &str = "http://localhost:8081";
pub const DEFAULT_LANGUAGE: &str = "en-US";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
/// Connection settings for a LanguageTool server.
pub struct LanguageToolConfig {
    /// Base URL without the `/v2` suffix.
    pub server: String,
    pub language: String,
    pub timeout: Duration,
}

impl Default for LanguageToolConfig {
    fn default() -> Self {
        Self {
            server: DEFAULT_SERVER.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

#[derive(Deserialize)]
struct CheckResponse {
    #[serde(default)]
    matches: Vec<Match>,
}

#[derive(Deserialize)]
struct Match {
    message: String,
    /// UTF-16 code unit offset into the submitted text.
    offset: usize,
    rule: MatchRule,
}

#[derive(Deserialize)]
struct MatchRule {
    id: String,
}

/// Blocking LanguageTool checker.
#[derive(Debug)]
pub struct LanguageToolChecker {
    client: reqwest::blocking::Client,
    config: LanguageToolConfig,
}

impl LanguageToolChecker {
    /// Build the client and verify the server answers.
    pub fn connect(config: LanguageToolConfig) -> Result<Self, CheckerError> {
        let base = config.server.trim_end_matches('/').to_string();
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| CheckerError::Unavailable {
                url: base.clone(),
                reason: e.to_string(),
            })?;

        let languages = format!("{}/v2/languages", base);
        match client.get(&languages).send() {
            Ok(resp) if resp.status().is_success() => {
                debug!(server = %base, language = %config.language, "LanguageTool reachable");
            }
            Ok(resp) => {
                return Err(CheckerError::Unavailable {
                    url: base,
                    reason: format!("HTTP {}", resp.status()),
                });
            }
            Err(e) => {
                return Err(CheckerError::Unavailable {
                    url: base,
                    reason: e.to_string(),
                });
            }
        }

        Ok(Self {
            client,
            config: LanguageToolConfig {
                server: base,
                ..config
            },
        })
    }
}

impl GrammarChecker for LanguageToolChecker {
    fn check(&self, text: &str) -> Result<Vec<Finding>, CheckerError> {
        let url = format!("{}/v2/check", self.config.server);
        let resp = self
            .client
            .post(&url)
            .form(&[("text", text), ("language", self.config.language.as_str())])
            .send()
            .map_err(|e| CheckerError::Transport {
                reason: e.to_string(),
            })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            return Err(CheckerError::Status {
                status: status.as_u16(),
                body,
            });
        }
        let body = resp.text().map_err(|e| CheckerError::Transport {
            reason: e.to_string(),
        })?;
        findings_from_response(text, &body)
    }
}

/// Decode a `/v2/check` response body into findings for `text`.
pub fn findings_from_response(text: &str, body: &str) -> Result<Vec<Finding>, CheckerError> {
    let parsed: CheckResponse = serde_json::from_str(body).map_err(|e| CheckerError::Decode {
        reason: e.to_string(),
    })?;
    let index = LineIndex::new(text);
    Ok(parsed
        .matches
        .into_iter()
        .map(|m| Finding {
            rule_id: m.rule.id,
            message: m.message,
            line: index.line_of(m.offset),
        })
        .collect())
}

/// Maps UTF-16 offsets to 1-based line numbers.
struct LineIndex {
    /// UTF-16 offset at which each line after the first starts.
    starts: Vec<usize>,
}

impl LineIndex {
    fn new(text: &str) -> Self {
        let mut starts = Vec::new();
        let mut pos = 0usize;
        for ch in text.chars() {
            pos += ch.len_utf16();
            if ch == '\n' {
                starts.push(pos);
            }
        }
        LineIndex { starts }
    }

    fn line_of(&self, offset: usize) -> usize {
        self.starts.partition_point(|&s| s <= offset) + 1
    }
}
