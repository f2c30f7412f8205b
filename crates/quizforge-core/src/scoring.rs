//! Scoring of quiz attempts.
//!
//! Correctness is always judged in canonical option space: the stored answer
//! is the canonical index the test-taker chose, never a display slot.

use crate::results::StudentResult;

/// Recompute correctness, score and total marks from the frozen snapshot.
pub fn evaluate(result: &mut StudentResult) {
    debug_assert_eq!(result.answers.len(), result.questions_used.len());

    result.per_question_correct = result
        .questions_used
        .iter()
        .zip(&result.answers)
        .map(|(q, answer)| *answer == Some(q.correct_index))
        .collect();

    result.score = result
        .questions_used
        .iter()
        .zip(&result.per_question_correct)
        .filter(|(_, correct)| **correct)
        .fold(0u32, |acc, (q, _)| acc.saturating_add(q.marks));

    result.total_possible_marks = result
        .questions_used
        .iter()
        .fold(0u32, |acc, q| acc.saturating_add(q.marks));
}

/// Score as a percentage of the total; `0.0` when nothing was possible.
pub fn percentage(score: u32, total_possible_marks: u32) -> f64 {
    if total_possible_marks == 0 {
        return 0.0;
    }
    score as f64 * 100.0 / total_possible_marks as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::results::tests::make_question;

    fn result_with(answers: Vec<Option<usize>>) -> StudentResult {
        let mut result = StudentResult::empty("Ann");
        result.questions_used = vec![
            make_question(1, 2, 1),
            make_question(2, 1, 1),
            make_question(3, 0, 3),
        ];
        result.answers = answers;
        result
    }

    #[test]
    fn all_correct() {
        let mut result = result_with(vec![Some(2), Some(1), Some(0)]);
        evaluate(&mut result);
        assert_eq!(result.per_question_correct, vec![true, true, true]);
        assert_eq!(result.score, 5);
        assert_eq!(result.total_possible_marks, 5);
        assert!((result.percentage() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn partial_and_missing_answers() {
        let mut result = result_with(vec![Some(2), None, Some(1)]);
        evaluate(&mut result);
        assert_eq!(result.per_question_correct, vec![true, false, false]);
        assert_eq!(result.score, 1);
        assert_eq!(result.total_possible_marks, 5);
        assert!((result.percentage() - 20.0).abs() < 1e-9);
    }

    #[test]
    fn score_never_exceeds_total() {
        let mut result = result_with(vec![Some(0), Some(1), Some(0)]);
        evaluate(&mut result);
        assert!(result.score <= result.total_possible_marks);
    }

    #[test]
    fn oversized_marks_saturate_instead_of_overflowing() {
        // Snapshots loaded from a hand-edited results file skip bank validation.
        let mut result = StudentResult::empty("Ann");
        result.questions_used = vec![
            make_question(1, 0, 3_000_000_000),
            make_question(2, 0, 3_000_000_000),
        ];
        result.answers = vec![Some(0), Some(0)];
        evaluate(&mut result);
        assert_eq!(result.score, u32::MAX);
        assert_eq!(result.total_possible_marks, u32::MAX);
        assert!(result.score <= result.total_possible_marks);
    }

    #[test]
    fn percentage_guards_zero_total() {
        assert_eq!(percentage(0, 0), 0.0);
        assert!((percentage(1, 3) - 33.333_333).abs() < 1e-4);
    }
}
