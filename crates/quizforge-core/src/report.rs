//! Student and class report models.
//!
//! Reports are built only from the frozen `questions_used`/`answers` pairs
//! stored with each result, never from the live bank, so a report reads the
//! same no matter how the bank changes later.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::QuizError;
use crate::model::option_letter;
use crate::results::{ResultManager, StudentRecord};
use crate::statistics::{self, ClassSummary};

/// One student's attempt, ready for rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentReport {
    pub student_id: u32,
    pub name: String,
    pub taken_at: DateTime<Utc>,
    pub score: u32,
    pub total_possible_marks: u32,
    pub percentage: f64,
    pub elapsed_secs: f64,
    pub questions_attempted: usize,
    pub timed_out: bool,
    pub outcomes: Vec<QuestionOutcome>,
}

/// Per-question line of a student report. Letters are canonical labels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionOutcome {
    /// 1-based position in the attempt.
    pub number: usize,
    pub question_id: u32,
    pub text: String,
    /// Letter the student chose, `None` for no valid selection.
    pub selected: Option<char>,
    pub correct: char,
    pub is_correct: bool,
    pub marks: u32,
}

impl StudentReport {
    pub fn from_record(record: &StudentRecord) -> Self {
        let result = &record.result;
        let outcomes = result
            .questions_used
            .iter()
            .zip(&result.answers)
            .zip(&result.per_question_correct)
            .enumerate()
            .map(|(i, ((q, answer), is_correct))| QuestionOutcome {
                number: i + 1,
                question_id: q.id,
                text: q.text.clone(),
                selected: answer.map(option_letter),
                correct: q.correct_letter(),
                is_correct: *is_correct,
                marks: q.marks,
            })
            .collect();

        Self {
            student_id: record.student_id,
            name: result.student_name.clone(),
            taken_at: result.taken_at,
            score: result.score,
            total_possible_marks: result.total_possible_marks,
            percentage: result.percentage(),
            elapsed_secs: result.elapsed_secs,
            questions_attempted: result.questions_presented(),
            timed_out: result.timed_out,
            outcomes,
        }
    }

    /// Look up `student_id` and build its report.
    pub fn for_student(manager: &ResultManager, student_id: u32) -> Result<Self, QuizError> {
        manager.get(student_id).map(Self::from_record)
    }
}

/// Row of the class table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassRow {
    pub student_id: u32,
    pub name: String,
    pub score: u32,
    pub total_possible_marks: u32,
    pub percentage: f64,
    pub elapsed_secs: f64,
}

/// Whole-class report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassReport {
    pub created_at: DateTime<Utc>,
    pub rows: Vec<ClassRow>,
    pub summary: ClassSummary,
    /// Category -> (correct, presented).
    pub categories: BTreeMap<String, (usize, usize)>,
}

impl ClassReport {
    pub fn from_manager(manager: &ResultManager) -> Result<Self, QuizError> {
        if manager.is_empty() {
            return Err(QuizError::NoResults);
        }
        let records = manager.records();
        let rows = records
            .iter()
            .map(|r| ClassRow {
                student_id: r.student_id,
                name: r.result.student_name.clone(),
                score: r.result.score,
                total_possible_marks: r.result.total_possible_marks,
                percentage: r.result.percentage(),
                elapsed_secs: r.result.elapsed_secs,
            })
            .collect();

        Ok(Self {
            created_at: Utc::now(),
            rows,
            summary: statistics::summarize(records),
            categories: statistics::category_breakdown(records),
        })
    }

    /// Save the report as JSON.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Format the class report as markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str(&format!(
            "**Summary:** {} students, average score {:.2}, average time {:.2}s\n\n",
            self.summary.student_count, self.summary.mean_score, self.summary.mean_time_secs
        ));

        md.push_str("| ID | Name | Score | Percentage | Time (s) |\n");
        md.push_str("|----|------|-------|------------|----------|\n");
        for r in &self.rows {
            md.push_str(&format!(
                "| {} | {} | {}/{} | {:.1}% | {:.2} |\n",
                r.student_id,
                r.name,
                r.score,
                r.total_possible_marks,
                r.percentage,
                r.elapsed_secs
            ));
        }

        if let Some(top) = &self.summary.top_performer {
            md.push_str(&format!(
                "\n**Top performer:** {} (Score: {})\n",
                top.name, top.score
            ));
        }

        md
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::results::tests::{make_question, make_result};
    use crate::scoring;

    fn manager_with_attempt() -> ResultManager {
        let mut manager = ResultManager::new();
        let mut result = make_result("Ann", 0, 0, 42.0);
        result.questions_used = vec![make_question(4, 2, 1), make_question(9, 1, 2)];
        result.answers = vec![Some(2), None];
        scoring::evaluate(&mut result);
        manager.record(result).unwrap();
        manager
            .record(make_result("Bob", 3, 3, 10.0))
            .unwrap();
        manager
    }

    #[test]
    fn student_report_breakdown() {
        let manager = manager_with_attempt();
        let report = StudentReport::for_student(&manager, 1).unwrap();
        assert_eq!(report.name, "Ann");
        assert_eq!(report.score, 1);
        assert_eq!(report.total_possible_marks, 3);
        assert_eq!(report.questions_attempted, 2);

        let first = &report.outcomes[0];
        assert_eq!(first.question_id, 4);
        assert_eq!(first.selected, Some('C'));
        assert_eq!(first.correct, 'C');
        assert!(first.is_correct);

        let second = &report.outcomes[1];
        assert_eq!(second.selected, None);
        assert_eq!(second.correct, 'B');
        assert!(!second.is_correct);
    }

    #[test]
    fn out_of_range_answer_renders_as_unknown_letter() {
        let mut manager = ResultManager::new();
        let mut result = make_result("Eve", 0, 0, 5.0);
        result.questions_used = vec![make_question(1, 0, 1)];
        result.answers = vec![Some(500)];
        scoring::evaluate(&mut result);
        manager.record(result).unwrap();

        let report = StudentReport::for_student(&manager, 1).unwrap();
        let outcome = &report.outcomes[0];
        assert_eq!(outcome.selected, Some('?'));
        assert_eq!(outcome.correct, 'A');
        assert!(!outcome.is_correct);
        assert_eq!(report.score, 0);
    }

    #[test]
    fn unknown_student() {
        let manager = manager_with_attempt();
        assert!(matches!(
            StudentReport::for_student(&manager, 5),
            Err(QuizError::NotFound { student_id: 5 })
        ));
    }

    #[test]
    fn class_report() {
        let manager = manager_with_attempt();
        let report = ClassReport::from_manager(&manager).unwrap();
        assert_eq!(report.rows.len(), 2);
        assert_eq!(report.summary.student_count, 2);
        assert_eq!(report.summary.top_performer.as_ref().unwrap().name, "Bob");

        let md = report.to_markdown();
        assert!(md.contains("| 2 | Bob | 3/3 |"));
        assert!(md.contains("Top performer:** Bob"));
    }

    #[test]
    fn class_report_requires_results() {
        assert!(matches!(
            ClassReport::from_manager(&ResultManager::new()),
            Err(QuizError::NoResults)
        ));
    }

    #[test]
    fn class_report_json() {
        let manager = manager_with_attempt();
        let report = ClassReport::from_manager(&manager).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("class.json");
        report.save_json(&path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"top_performer\""));
    }
}
