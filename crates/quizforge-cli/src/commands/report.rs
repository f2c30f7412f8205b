//! The `quizforge report` and `quizforge class-report` commands.

use std::path::PathBuf;

use anyhow::Result;

use quizforge_core::config::QuizforgeConfig;
use quizforge_core::report::{ClassReport, StudentReport};
use quizforge_report::html::write_html_report;
use quizforge_report::text;

pub fn student(config: &QuizforgeConfig, student_id: u32, format: &str) -> Result<()> {
    let manager = super::load_results(config)?;
    let report = StudentReport::for_student(&manager, student_id)?;

    match format {
        "text" => print!("{}", text::student_report(&report)),
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        other => anyhow::bail!("unknown format: {other} (expected text or json)"),
    }
    Ok(())
}

pub fn class(config: &QuizforgeConfig, html: Option<PathBuf>, format: &str) -> Result<()> {
    let manager = super::load_results(config)?;
    let report = ClassReport::from_manager(&manager)?;

    match format {
        "text" => print!("{}", text::class_report(&report)),
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        "markdown" => print!("{}", report.to_markdown()),
        other => anyhow::bail!("unknown format: {other} (expected text, json or markdown)"),
    }

    if let Some(path) = html {
        let title = config
            .results_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "results".to_string());
        write_html_report(&report, &title, &path)?;
        eprintln!("HTML report: {}", path.display());
    }
    Ok(())
}
