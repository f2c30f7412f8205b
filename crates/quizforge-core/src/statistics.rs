//! Aggregate statistics across recorded attempts.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::results::StudentRecord;

/// Class-wide aggregates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassSummary {
    /// Number of recorded attempts.
    pub student_count: usize,
    /// Mean of raw scores.
    pub mean_score: f64,
    /// Mean of percentages.
    pub mean_percentage: f64,
    /// Mean elapsed seconds.
    pub mean_time_secs: f64,
    /// First student holding the highest score.
    pub top_performer: Option<TopPerformer>,
}

/// The best-scoring student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopPerformer {
    pub student_id: u32,
    pub name: String,
    pub score: u32,
}

/// Compute class aggregates over `records`, in insertion order.
pub fn summarize(records: &[StudentRecord]) -> ClassSummary {
    let n = records.len();
    if n == 0 {
        return ClassSummary {
            student_count: 0,
            mean_score: 0.0,
            mean_percentage: 0.0,
            mean_time_secs: 0.0,
            top_performer: None,
        };
    }

    let total_score: u64 = records.iter().map(|r| r.result.score as u64).sum();
    let total_time: f64 = records.iter().map(|r| r.result.elapsed_secs).sum();
    let total_pct: f64 = records.iter().map(|r| r.result.percentage()).sum();

    ClassSummary {
        student_count: n,
        mean_score: total_score as f64 / n as f64,
        mean_percentage: total_pct / n as f64,
        mean_time_secs: total_time / n as f64,
        top_performer: top_performer(records),
    }
}

/// First record with the maximum score; ties go to the earliest.
pub fn top_performer(records: &[StudentRecord]) -> Option<TopPerformer> {
    let mut best: Option<&StudentRecord> = None;
    for r in records {
        match best {
            Some(b) if r.result.score > b.result.score => best = Some(r),
            None => best = Some(r),
            _ => {}
        }
    }
    best.map(|r| TopPerformer {
        student_id: r.student_id,
        name: r.result.student_name.clone(),
        score: r.result.score,
    })
}

/// Per-category accuracy across all presented questions: (correct, presented).
pub fn category_breakdown(records: &[StudentRecord]) -> BTreeMap<String, (usize, usize)> {
    let mut breakdown: BTreeMap<String, (usize, usize)> = BTreeMap::new();
    for r in records {
        for (q, correct) in r
            .result
            .questions_used
            .iter()
            .zip(&r.result.per_question_correct)
        {
            let entry = breakdown.entry(q.category.clone()).or_default();
            entry.1 += 1;
            if *correct {
                entry.0 += 1;
            }
        }
    }
    breakdown
}
