//! Quiz engine error types.
//!
//! An unparseable or out-of-range answer is deliberately absent here: it is a
//! scored outcome (`None` in `StudentResult::answers`), not a failure.

use thiserror::Error;

/// Errors that can occur while managing the bank, delivering a quiz, or
/// looking up results.
#[derive(Debug, Error)]
pub enum QuizError {
    /// Growing the question bank or a result collection failed.
    #[error("out of memory while growing {0}")]
    OutOfMemory(&'static str),

    /// A question draft failed validation.
    #[error("invalid question: {0}")]
    InvalidQuestion(String),

    /// A report was requested for an unknown student id.
    #[error("student ID {student_id} not found")]
    NotFound { student_id: u32 },

    /// A quiz was requested but the bank has no questions.
    #[error("no questions available, add questions first")]
    EmptyBank,

    /// A class report was requested with no recorded results.
    #[error("no student results available")]
    NoResults,

    /// The answer source failed while a quiz was in progress.
    #[error("input error: {0}")]
    Io(#[from] std::io::Error),
}

impl QuizError {
    /// Returns `true` if the error only reports missing data and left every
    /// collection untouched.
    pub fn is_informational(&self) -> bool {
        matches!(
            self,
            QuizError::NotFound { .. } | QuizError::EmptyBank | QuizError::NoResults
        )
    }
}
