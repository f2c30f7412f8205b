//! The `quizforge list` command.

use std::path::PathBuf;

use anyhow::Result;

use quizforge_core::config::QuizforgeConfig;
use quizforge_core::{parser, QuizError};
use quizforge_report::text::bank_table;

pub fn execute(config: &QuizforgeConfig, bank: Option<PathBuf>) -> Result<()> {
    let path = super::bank_path(config, bank);
    let bank = parser::load_bank_path(&path)?;
    if bank.is_empty() {
        return Err(QuizError::EmptyBank.into());
    }

    println!(
        "{} ({} questions, {} marks)",
        bank.name,
        bank.len(),
        bank.total_marks()
    );
    if !bank.description.is_empty() {
        println!("{}", bank.description);
    }
    println!("\n{}", bank_table(&bank));
    Ok(())
}
