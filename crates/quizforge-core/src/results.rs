//! Quiz attempt results and the collection that owns them.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::QuizError;
use crate::model::Question;
use crate::scoring;

/// The frozen outcome of one quiz attempt.
///
/// `questions_used`, `answers` and `per_question_correct` always have the
/// same length: one entry per question actually presented.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentResult {
    /// Unique attempt identifier.
    pub attempt_id: Uuid,
    /// Test-taker's name.
    pub student_name: String,
    /// When the attempt started.
    pub taken_at: DateTime<Utc>,
    /// Snapshots of the presented questions, in presentation order.
    pub questions_used: Vec<Question>,
    /// Selected option per question as a canonical index; `None` when no
    /// valid selection was made.
    pub answers: Vec<Option<usize>>,
    /// Correctness per question.
    pub per_question_correct: Vec<bool>,
    /// Marks earned.
    pub score: u32,
    /// Sum of marks of the presented questions.
    pub total_possible_marks: u32,
    /// Wall-clock seconds from first question presented to last answer.
    pub elapsed_secs: f64,
    /// Whether the time budget ended the attempt early.
    #[serde(default)]
    pub timed_out: bool,
}

impl StudentResult {
    /// An attempt in which no questions were presented.
    pub fn empty(student_name: impl Into<String>) -> Self {
        Self {
            attempt_id: Uuid::new_v4(),
            student_name: student_name.into(),
            taken_at: Utc::now(),
            questions_used: Vec::new(),
            answers: Vec::new(),
            per_question_correct: Vec::new(),
            score: 0,
            total_possible_marks: 0,
            elapsed_secs: 0.0,
            timed_out: false,
        }
    }

    /// Number of questions presented.
    pub fn questions_presented(&self) -> usize {
        self.questions_used.len()
    }

    pub fn correct_count(&self) -> usize {
        self.per_question_correct.iter().filter(|c| **c).count()
    }

    pub fn percentage(&self) -> f64 {
        scoring::percentage(self.score, self.total_possible_marks)
    }
}

/// A stored result together with its lookup id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentRecord {
    /// 1-based id, equal to insertion order.
    pub student_id: u32,
    /// Whether this record has been written to the results log.
    #[serde(default)]
    pub logged: bool,
    pub result: StudentResult,
}

/// Insertion-ordered collection of recorded attempts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResultManager {
    records: Vec<StudentRecord>,
}

impl ResultManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a finished attempt and return its student id.
    ///
    /// On failure the collection is left unchanged.
    pub fn record(&mut self, result: StudentResult) -> Result<u32, QuizError> {
        self.records
            .try_reserve(1)
            .map_err(|_| QuizError::OutOfMemory("result collection"))?;

        let student_id = self.next_id();
        tracing::debug!(
            student_id,
            name = %result.student_name,
            score = result.score,
            total = result.total_possible_marks,
            "result recorded"
        );
        self.records.push(StudentRecord {
            student_id,
            logged: false,
            result,
        });
        Ok(student_id)
    }

    /// Look up a record by student id.
    pub fn get(&self, student_id: u32) -> Result<&StudentRecord, QuizError> {
        self.records
            .iter()
            .find(|r| r.student_id == student_id)
            .ok_or(QuizError::NotFound { student_id })
    }

    pub fn records(&self) -> &[StudentRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records not yet written to the results log.
    pub fn unlogged(&self) -> impl Iterator<Item = &StudentRecord> {
        self.records.iter().filter(|r| !r.logged)
    }

    /// Mark every record as written to the results log.
    pub fn mark_all_logged(&mut self) {
        for r in &mut self.records {
            r.logged = true;
        }
    }

    fn next_id(&self) -> u32 {
        self.records
            .iter()
            .map(|r| r.student_id)
            .max()
            .unwrap_or(0)
            + 1
    }

    /// Save all records as JSON.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize results")?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write results to {}", path.display()))?;
        Ok(())
    }

    /// Load records from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read results from {}", path.display()))?;
        let manager: ResultManager =
            serde_json::from_str(&content).context("failed to parse results JSON")?;
        Ok(manager)
    }

    /// Load records if the file exists, otherwise start empty.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load_json(path)
        } else {
            Ok(Self::default())
        }
    }
}
