//! The question bank: an owned, append-only collection of questions.

use serde::Serialize;

use crate::error::QuizError;
use crate::model::{Question, QuestionDraft};

/// Insertion-ordered store of questions with dense 1-based ids.
#[derive(Debug, Clone, Default, Serialize)]
pub struct QuestionBank {
    /// Bank title, shown in listings.
    pub name: String,
    /// Free-form description.
    pub description: String,
    questions: Vec<Question>,
}

impl QuestionBank {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            questions: Vec::new(),
        }
    }

    /// Build a bank from drafts, all-or-nothing.
    pub fn from_drafts<'a>(
        name: impl Into<String>,
        drafts: impl IntoIterator<Item = &'a QuestionDraft>,
    ) -> Result<Self, QuizError> {
        let mut bank = Self::new(name);
        for draft in drafts {
            bank.add(draft)?;
        }
        Ok(bank)
    }

    /// Append a deep copy of `draft`, assigning the next id.
    ///
    /// On failure the bank is left exactly as it was.
    pub fn add(&mut self, draft: &QuestionDraft) -> Result<&Question, QuizError> {
        draft.validate()?;
        self.questions
            .try_reserve(1)
            .map_err(|_| QuizError::OutOfMemory("question bank"))?;

        let id = self.questions.len() as u32 + 1;
        self.questions.push(Question {
            id,
            text: draft.text.trim().to_string(),
            options: draft.options.iter().map(|o| o.trim().to_string()).collect(),
            correct_index: draft.correct_index,
            category: draft.category.trim().to_string(),
            difficulty: draft.difficulty,
            marks: draft.marks,
        });
        tracing::debug!(id, "question added to bank");

        Ok(&self.questions[self.questions.len() - 1])
    }

    /// Question at `index` (0-based insertion position).
    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    /// Question with the given id.
    pub fn get_by_id(&self, id: u32) -> Option<&Question> {
        // Ids are dense, so the id doubles as a 1-based position.
        id.checked_sub(1)
            .and_then(|i| self.questions.get(i as usize))
            .filter(|q| q.id == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Question> {
        self.questions.iter()
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Sum of marks across the whole bank.
    pub fn total_marks(&self) -> u32 {
        self.questions
            .iter()
            .fold(0u32, |acc, q| acc.saturating_add(q.marks))
    }
}

impl<'a> IntoIterator for &'a QuestionBank {
    type Item = &'a Question;
    type IntoIter = std::slice::Iter<'a, Question>;

    fn into_iter(self) -> Self::IntoIter {
        self.questions.iter()
    }
}
