//! The `quizforge init` command.

use std::path::Path;

use anyhow::Result;

pub fn execute() -> Result<()> {
    write_if_missing("quizforge.toml", SAMPLE_CONFIG)?;
    write_if_missing("questions.toml", SAMPLE_BANK)?;
    write_if_missing("quotes.txt", SAMPLE_QUOTES)?;

    println!("\nNext steps:");
    println!("  1. Run: quizforge list");
    println!("  2. Run: quizforge add --text \"...\" -o \"...\" -o \"...\" --answer A");
    println!("  3. Run: quizforge take --name \"Your Name\"");

    Ok(())
}

fn write_if_missing(path: &str, content: &str) -> Result<()> {
    if Path::new(path).exists() {
        println!("{path} already exists, skipping.");
    } else {
        std::fs::write(path, content)?;
        println!("Created {path}");
    }
    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# quizforge configuration

bank_path = "questions.toml"
results_path = "quizforge-results.json"
log_path = "quiz_results.txt"
quotes_path = "quotes.txt"
default_question_count = 5
# Seconds per quiz, 0 for unlimited
time_limit_secs = 0
"#;

const SAMPLE_BANK: &str = r#"[bank]
name = "General Knowledge"
description = "A small sample bank to get started"

[[questions]]
text = "What is the capital of France?"
options = ["Berlin", "Madrid", "Paris", "Rome"]
answer = "C"
category = "geography"
difficulty = "easy"
marks = 1

[[questions]]
text = "Which planet is known as the Red Planet?"
options = ["Venus", "Mars", "Jupiter", "Saturn"]
answer = "B"
category = "science"
difficulty = "easy"
marks = 1

[[questions]]
text = "What is 12 multiplied by 12?"
options = ["124", "144", "132", "156"]
answer = "B"
category = "math"
marks = 2

[[questions]]
text = "Who wrote 'Romeo and Juliet'?"
options = ["Charles Dickens", "Jane Austen", "Mark Twain", "William Shakespeare"]
answer = "D"
category = "literature"
difficulty = "medium"
marks = 2

[[questions]]
text = "What is the chemical symbol for gold?"
options = ["Au", "Ag", "Gd", "Go"]
answer = "A"
category = "science"
difficulty = "hard"
marks = 3
"#;

const SAMPLE_QUOTES: &str = "\
The expert in anything was once a beginner.
Every mistake is a lesson on the way to mastery.
Small steps every day add up to big results.
";
