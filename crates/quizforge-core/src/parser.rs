//! TOML question bank parser.
//!
//! Loads question banks from TOML files and directories, writes them back,
//! and validates them.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::bank::QuestionBank;
use crate::model::{
    default_category, default_marks, option_letter, parse_option_letter, Difficulty,
    QuestionDraft, MAX_OPTIONS,
};

/// Intermediate TOML structure for bank files.
#[derive(Debug, Deserialize, Serialize)]
struct TomlBankFile {
    bank: TomlBankHeader,
    #[serde(default)]
    questions: Vec<TomlQuestion>,
}

#[derive(Debug, Deserialize, Serialize)]
struct TomlBankHeader {
    name: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize, Serialize)]
struct TomlQuestion {
    text: String,
    options: Vec<String>,
    /// Letter of the correct option, e.g. "C".
    answer: String,
    #[serde(default = "default_category")]
    category: String,
    #[serde(default)]
    difficulty: Difficulty,
    #[serde(default = "default_marks")]
    marks: u32,
}

/// Parse a single TOML file into a `QuestionBank`.
pub fn parse_bank(path: &Path) -> Result<QuestionBank> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read question bank: {}", path.display()))?;

    parse_bank_str(&content, path)
}

/// Parse a TOML string into a `QuestionBank` (useful for testing).
pub fn parse_bank_str(content: &str, source_path: &Path) -> Result<QuestionBank> {
    let parsed: TomlBankFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let mut bank = QuestionBank::new(parsed.bank.name);
    bank.description = parsed.bank.description;

    for (i, q) in parsed.questions.into_iter().enumerate() {
        let option_count = q.options.len().min(MAX_OPTIONS);
        let correct_index = parse_option_letter(&q.answer, option_count).ok_or_else(|| {
            anyhow::anyhow!(
                "question {} in {}: answer '{}' is not one of the option letters",
                i + 1,
                source_path.display(),
                q.answer
            )
        })?;

        let draft = QuestionDraft {
            text: q.text,
            options: q.options,
            correct_index,
            category: q.category,
            difficulty: q.difficulty,
            marks: q.marks,
        };
        bank.add(&draft)
            .with_context(|| format!("question {} in {}", i + 1, source_path.display()))?;
    }

    Ok(bank)
}

/// Serialize a bank to its TOML form.
pub fn bank_to_toml(bank: &QuestionBank) -> Result<String> {
    let file = TomlBankFile {
        bank: TomlBankHeader {
            name: bank.name.clone(),
            description: bank.description.clone(),
        },
        questions: bank
            .iter()
            .map(|q| TomlQuestion {
                text: q.text.clone(),
                options: q.options.clone(),
                answer: q.correct_letter().to_string(),
                category: q.category.clone(),
                difficulty: q.difficulty,
                marks: q.marks,
            })
            .collect(),
    };
    toml::to_string_pretty(&file).context("failed to serialize question bank")
}

/// Write a bank to a TOML file, creating parent directories as needed.
pub fn write_bank(bank: &QuestionBank, path: &Path) -> Result<()> {
    let content = bank_to_toml(bank)?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, content)
        .with_context(|| format!("failed to write question bank: {}", path.display()))?;
    tracing::debug!(path = %path.display(), questions = bank.len(), "question bank written");
    Ok(())
}

/// Recursively load all `.toml` bank files from a directory.
pub fn load_bank_directory(dir: &Path) -> Result<Vec<QuestionBank>> {
    let mut banks = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(|e| e.path());

    for entry in entries {
        let path = entry.path();

        if path.is_dir() {
            banks.extend(load_bank_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_bank(&path) {
                Ok(bank) => banks.push(bank),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(banks)
}

/// Load a bank from a file, or merge every bank found in a directory.
pub fn load_bank_path(path: &Path) -> Result<QuestionBank> {
    if !path.is_dir() {
        return parse_bank(path);
    }

    let banks = load_bank_directory(path)?;
    let mut merged = QuestionBank::new(
        path.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "questions".into()),
    );
    for bank in &banks {
        for q in bank {
            let draft = QuestionDraft {
                text: q.text.clone(),
                options: q.options.clone(),
                correct_index: q.correct_index,
                category: q.category.clone(),
                difficulty: q.difficulty,
                marks: q.marks,
            };
            merged.add(&draft)?;
        }
    }
    Ok(merged)
}

/// A warning from bank validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The question id (if applicable).
    pub question_id: Option<u32>,
    /// Warning message.
    pub message: String,
}

/// Validate a bank for common authoring mistakes.
pub fn validate_bank(bank: &QuestionBank) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    // Duplicate prompts
    let mut seen_prompts = HashSet::new();
    for q in bank {
        if !seen_prompts.insert(q.text.to_lowercase()) {
            warnings.push(ValidationWarning {
                question_id: Some(q.id),
                message: format!("duplicate question text: {}", q.text),
            });
        }
    }

    // Duplicate options within a question
    for q in bank {
        let mut seen = HashSet::new();
        for (i, opt) in q.options.iter().enumerate() {
            if !seen.insert(opt.to_lowercase()) {
                warnings.push(ValidationWarning {
                    question_id: Some(q.id),
                    message: format!("option {} repeats an earlier option", option_letter(i)),
                });
            }
        }
    }

    for q in bank {
        if q.category.is_empty() {
            warnings.push(ValidationWarning {
                question_id: Some(q.id),
                message: "category is empty".into(),
            });
        }
    }

    if bank.is_empty() {
        warnings.push(ValidationWarning {
            question_id: None,
            message: "bank has no questions".into(),
        });
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const VALID_TOML: &str = r#"
[bank]
name = "General Knowledge"
description = "A starter bank"

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
answer = "b"
category = "science"
marks = 2
"#;

    #[test]
    fn parse_valid_toml() {
        let bank = parse_bank_str(VALID_TOML, &PathBuf::from("test.toml")).unwrap();
        assert_eq!(bank.name, "General Knowledge");
        assert_eq!(bank.len(), 2);

        let q1 = bank.get_by_id(1).unwrap();
        assert_eq!(q1.correct_index, 2);
        assert_eq!(q1.difficulty, Difficulty::Easy);

        let q2 = bank.get_by_id(2).unwrap();
        assert_eq!(q2.correct_index, 1);
        assert_eq!(q2.difficulty, Difficulty::Medium);
        assert_eq!(q2.marks, 2);
    }

    #[test]
    fn parse_missing_optional_fields() {
        let toml = r#"
[bank]
name = "Minimal"

[[questions]]
text = "Yes or no?"
options = ["Yes", "No"]
answer = "A"
"#;
        let bank = parse_bank_str(toml, &PathBuf::from("test.toml")).unwrap();
        let q = bank.get(0).unwrap();
        assert_eq!(q.category, "general");
        assert_eq!(q.marks, 1);
        assert!(bank.description.is_empty());
    }

    #[test]
    fn normal_difficulty_reads_as_medium() {
        let toml = r#"
[bank]
name = "Levels"

[[questions]]
text = "Pick one"
options = ["x", "y"]
answer = "B"
difficulty = "normal"
"#;
        let bank = parse_bank_str(toml, &PathBuf::from("test.toml")).unwrap();
        assert_eq!(bank.get(0).unwrap().difficulty, Difficulty::Medium);
    }

    #[test]
    fn answer_out_of_range_is_rejected() {
        let toml = r#"
[bank]
name = "Bad"

[[questions]]
text = "Pick one"
options = ["x", "y"]
answer = "C"
"#;
        let err = parse_bank_str(toml, &PathBuf::from("bad.toml")).unwrap_err();
        assert!(format!("{err:#}").contains("answer 'C'"));
    }

    #[test]
    fn invalid_question_is_rejected() {
        let toml = r#"
[bank]
name = "Bad"

[[questions]]
text = "Only one option"
options = ["x"]
answer = "A"
"#;
        assert!(parse_bank_str(toml, &PathBuf::from("bad.toml")).is_err());
    }

    #[test]
    fn parse_malformed_toml() {
        let bad = "this is not [valid toml }{";
        assert!(parse_bank_str(bad, &PathBuf::from("bad.toml")).is_err());
    }

    #[test]
    fn write_then_parse_preserves_answers() {
        let bank = parse_bank_str(VALID_TOML, &PathBuf::from("test.toml")).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("bank.toml");
        write_bank(&bank, &path).unwrap();

        let reloaded = parse_bank(&path).unwrap();
        assert_eq!(reloaded.len(), bank.len());
        for (a, b) in bank.iter().zip(reloaded.iter()) {
            assert_eq!(a, b);
        }
    }

    #[test]
    fn validate_duplicates() {
        let toml = r#"
[bank]
name = "Dupes"

[[questions]]
text = "Same?"
options = ["a", "A"]
answer = "A"

[[questions]]
text = "same?"
options = ["x", "y"]
answer = "B"
"#;
        let bank = parse_bank_str(toml, &PathBuf::from("test.toml")).unwrap();
        let warnings = validate_bank(&bank);
        assert!(warnings.iter().any(|w| w.message.contains("duplicate question")));
        assert!(warnings
            .iter()
            .any(|w| w.question_id == Some(1) && w.message.contains("option B repeats")));
    }

    #[test]
    fn validate_empty_bank() {
        let warnings = validate_bank(&QuestionBank::new("empty"));
        assert!(warnings.iter().any(|w| w.message.contains("no questions")));
    }

    #[test]
    fn load_directory_skips_bad_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("good.toml"), VALID_TOML).unwrap();
        std::fs::write(dir.path().join("bad.toml"), "not toml [").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let banks = load_bank_directory(dir.path()).unwrap();
        assert_eq!(banks.len(), 1);

        let merged = load_bank_path(dir.path()).unwrap();
        assert_eq!(merged.len(), 2);
        let ids: Vec<u32> = merged.iter().map(|q| q.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }
}
