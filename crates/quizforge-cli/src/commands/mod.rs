pub mod add;
pub mod init;
pub mod list;
pub mod quote;
pub mod report;
pub mod save;
pub mod take;
pub mod validate;

use std::path::PathBuf;

use anyhow::Result;

use quizforge_core::config::QuizforgeConfig;
use quizforge_core::results::ResultManager;

/// The bank path to use: an explicit `--bank`, else the configured one.
fn bank_path(config: &QuizforgeConfig, bank: Option<PathBuf>) -> PathBuf {
    bank.unwrap_or_else(|| config.bank_path.clone())
}

fn load_results(config: &QuizforgeConfig) -> Result<ResultManager> {
    ResultManager::load_or_default(&config.results_path)
}
