//! The `quizforge save` command.

use anyhow::Result;

use quizforge_core::config::QuizforgeConfig;
use quizforge_core::{results_log, QuizError};

pub fn execute(config: &QuizforgeConfig) -> Result<()> {
    let mut manager = super::load_results(config)?;
    if manager.is_empty() {
        return Err(QuizError::NoResults.into());
    }

    let written = results_log::append_unlogged(&mut manager, &config.log_path)?;
    if written == 0 {
        println!("All results are already saved.");
        return Ok(());
    }

    // Persist the logged flags so the next save skips these records.
    manager.save_json(&config.results_path)?;
    println!(
        "Saved {written} result(s) to {}",
        config.log_path.display()
    );
    Ok(())
}
