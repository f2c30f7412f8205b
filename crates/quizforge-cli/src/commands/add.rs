//! The `quizforge add` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use quizforge_core::config::QuizforgeConfig;
use quizforge_core::model::{parse_option_letter, Difficulty};
use quizforge_core::{parser, QuestionBank, QuestionDraft};

pub struct AddArgs {
    pub text: String,
    pub options: Vec<String>,
    pub answer: String,
    pub category: Option<String>,
    pub difficulty: String,
    pub marks: u32,
    pub bank: Option<PathBuf>,
}

pub fn execute(config: &QuizforgeConfig, args: AddArgs) -> Result<()> {
    let path = super::bank_path(config, args.bank);

    let correct_index = parse_option_letter(&args.answer, args.options.len()).ok_or_else(|| {
        anyhow::anyhow!(
            "answer '{}' is not one of the {} option letters",
            args.answer,
            args.options.len()
        )
    })?;
    let difficulty: Difficulty = args.difficulty.parse().map_err(anyhow::Error::msg)?;

    let mut draft = QuestionDraft::new(args.text, args.options, correct_index)
        .with_difficulty(difficulty)
        .with_marks(args.marks);
    if let Some(category) = args.category {
        draft = draft.with_category(category);
    }

    // A missing bank file starts a new bank.
    let mut bank = if path.exists() {
        parser::parse_bank(&path)?
    } else {
        QuestionBank::new("questions")
    };

    let question = bank.add(&draft)?;
    let id = question.id;
    parser::write_bank(&bank, &path)
        .with_context(|| format!("question {id} was not saved"))?;

    println!("Question added successfully! (ID: {id})");
    println!("Bank {} now has {} questions.", path.display(), bank.len());
    Ok(())
}
