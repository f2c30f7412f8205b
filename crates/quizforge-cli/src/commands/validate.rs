//! The `quizforge validate` command.

use std::path::PathBuf;

use anyhow::Result;

use quizforge_core::config::QuizforgeConfig;
use quizforge_core::parser;

pub fn execute(config: &QuizforgeConfig, bank: Option<PathBuf>) -> Result<()> {
    let path = super::bank_path(config, bank);
    let banks = if path.is_dir() {
        parser::load_bank_directory(&path)?
    } else {
        vec![parser::parse_bank(&path)?]
    };

    let mut total_warnings = 0;

    for bank in &banks {
        println!("Bank: {} ({} questions)", bank.name, bank.len());

        let warnings = parser::validate_bank(bank);
        for w in &warnings {
            let prefix = w
                .question_id
                .map(|id| format!("  [Q{id}]"))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if total_warnings == 0 {
        println!("All question banks valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
