//! quizforge configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level quizforge configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizforgeConfig {
    /// Question bank file (or directory of bank files).
    #[serde(default = "default_bank_path")]
    pub bank_path: PathBuf,
    /// JSON store of recorded attempts.
    #[serde(default = "default_results_path")]
    pub results_path: PathBuf,
    /// Append-only results log.
    #[serde(default = "default_log_path")]
    pub log_path: PathBuf,
    /// One-quote-per-line text file.
    #[serde(default = "default_quotes_path")]
    pub quotes_path: PathBuf,
    /// Questions per quiz when not given on the command line.
    #[serde(default = "default_question_count")]
    pub default_question_count: usize,
    /// Time budget per quiz in seconds (absent or 0 = unlimited).
    #[serde(default)]
    pub time_limit_secs: Option<u64>,
}

fn default_bank_path() -> PathBuf {
    PathBuf::from("questions.toml")
}
fn default_results_path() -> PathBuf {
    PathBuf::from("quizforge-results.json")
}
fn default_log_path() -> PathBuf {
    PathBuf::from("quiz_results.txt")
}
fn default_quotes_path() -> PathBuf {
    PathBuf::from("quotes.txt")
}
fn default_question_count() -> usize {
    5
}

impl Default for QuizforgeConfig {
    fn default() -> Self {
        Self {
            bank_path: default_bank_path(),
            results_path: default_results_path(),
            log_path: default_log_path(),
            quotes_path: default_quotes_path(),
            default_question_count: default_question_count(),
            time_limit_secs: None,
        }
    }
}

impl QuizforgeConfig {
    /// The configured time budget, treating 0 as unlimited.
    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit_secs
            .filter(|&s| s > 0)
            .map(Duration::from_secs)
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

fn resolve_path(p: &Path) -> PathBuf {
    PathBuf::from(resolve_env_vars(&p.to_string_lossy()))
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `quizforge.toml` in the current directory
/// 2. `~/.config/quizforge/config.toml`
///
/// Environment variable overrides: `QUIZFORGE_BANK`, `QUIZFORGE_TIME_LIMIT`.
pub fn load_config() -> Result<QuizforgeConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizforgeConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("quizforge.toml");
        if local.exists() {
            Some(local)
        } else if let Some(home) = dirs_path() {
            let global = home.join("config.toml");
            if global.exists() {
                Some(global)
            } else {
                None
            }
        } else {
            None
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = toml::from_str::<QuizforgeConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!(path = %path.display(), "loaded config");
            config
        }
        None => QuizforgeConfig::default(),
    };

    // Apply env var overrides
    if let Ok(bank) = std::env::var("QUIZFORGE_BANK") {
        config.bank_path = PathBuf::from(bank);
    }

    if let Ok(limit) = std::env::var("QUIZFORGE_TIME_LIMIT") {
        let secs = limit
            .trim()
            .parse::<u64>()
            .with_context(|| format!("invalid QUIZFORGE_TIME_LIMIT: '{limit}'"))?;
        config.time_limit_secs = Some(secs);
    }

    config.bank_path = resolve_path(&config.bank_path);
    config.results_path = resolve_path(&config.results_path);
    config.log_path = resolve_path(&config.log_path);
    config.quotes_path = resolve_path(&config.quotes_path);

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("quizforge"))
}
