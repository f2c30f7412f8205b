//! Core data model types for quizforge.
//!
//! A `QuestionDraft` is what an operator fills in; the bank validates it and
//! turns it into an immutable `Question` with an assigned id.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::QuizError;

/// Maximum number of options a question may carry (one per letter A..=Z).
pub const MAX_OPTIONS: usize = 26;

/// Maximum marks a single question may award.
pub const MAX_MARKS: u32 = 1000;

/// A multiple-choice question stored in the bank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Unique identifier, assigned by the bank on insert (1-based).
    pub id: u32,
    /// The prompt shown to the test-taker.
    pub text: String,
    /// Options in canonical order.
    pub options: Vec<String>,
    /// Index of the correct option, in canonical order.
    pub correct_index: usize,
    /// Subject tag.
    pub category: String,
    /// Difficulty tag.
    pub difficulty: Difficulty,
    /// Points awarded for a correct answer.
    pub marks: u32,
}

impl Question {
    /// The correct option's canonical letter.
    pub fn correct_letter(&self) -> char {
        option_letter(self.correct_index)
    }

    /// The correct option's text.
    pub fn correct_option(&self) -> &str {
        &self.options[self.correct_index]
    }
}

/// A question as entered by the operator, before it joins the bank.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionDraft {
    pub text: String,
    pub options: Vec<String>,
    pub correct_index: usize,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default = "default_marks")]
    pub marks: u32,
}

pub(crate) fn default_category() -> String {
    "general".to_string()
}

pub(crate) fn default_marks() -> u32 {
    1
}

impl QuestionDraft {
    /// Start a draft with default category, difficulty and marks.
    pub fn new(text: impl Into<String>, options: Vec<String>, correct_index: usize) -> Self {
        Self {
            text: text.into(),
            options,
            correct_index,
            category: default_category(),
            difficulty: Difficulty::default(),
            marks: default_marks(),
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn with_marks(mut self, marks: u32) -> Self {
        self.marks = marks;
        self
    }

    /// Check every invariant a stored `Question` relies on.
    pub fn validate(&self) -> Result<(), QuizError> {
        if self.text.trim().is_empty() {
            return Err(QuizError::InvalidQuestion("question text is empty".into()));
        }
        if self.options.len() < 2 {
            return Err(QuizError::InvalidQuestion(format!(
                "at least 2 options required, got {}",
                self.options.len()
            )));
        }
        if self.options.len() > MAX_OPTIONS {
            return Err(QuizError::InvalidQuestion(format!(
                "at most {MAX_OPTIONS} options allowed, got {}",
                self.options.len()
            )));
        }
        if let Some(pos) = self.options.iter().position(|o| o.trim().is_empty()) {
            return Err(QuizError::InvalidQuestion(format!(
                "option {} is empty",
                option_letter(pos)
            )));
        }
        if self.correct_index >= self.options.len() {
            return Err(QuizError::InvalidQuestion(format!(
                "correct option index {} out of range for {} options",
                self.correct_index,
                self.options.len()
            )));
        }
        if self.marks == 0 {
            return Err(QuizError::InvalidQuestion("marks must be at least 1".into()));
        }
        if self.marks > MAX_MARKS {
            return Err(QuizError::InvalidQuestion(format!(
                "marks must be at most {MAX_MARKS}, got {}",
                self.marks
            )));
        }
        Ok(())
    }
}

/// Difficulty tag of a question.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    #[serde(alias = "normal")]
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" | "normal" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty: {other}")),
        }
    }
}

/// Label for a 0-based option position: 0 -> 'A', 1 -> 'B', ...
///
/// Positions past the last supported option render as '?'.
pub fn option_letter(index: usize) -> char {
    if index >= MAX_OPTIONS {
        return '?';
    }
    (b'A' + index as u8) as char
}

/// Parse a single option letter into a 0-based position.
///
/// Accepts exactly one ASCII letter (either case, surrounding whitespace
/// ignored) that falls within `option_count`. Everything else is `None`.
pub fn parse_option_letter(input: &str, option_count: usize) -> Option<usize> {
    let mut chars = input.trim().chars();
    let c = chars.next()?;
    if chars.next().is_some() || !c.is_ascii_alphabetic() {
        return None;
    }
    let index = (c.to_ascii_uppercase() as u8 - b'A') as usize;
    (index < option_count).then_some(index)
}
