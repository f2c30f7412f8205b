//! Console table rendering.

use comfy_table::{Cell, Table};

use quizforge_core::model::option_letter;
use quizforge_core::report::{ClassReport, StudentReport};
use quizforge_core::QuestionBank;

/// Table of every question in the bank, with the correct letter.
pub fn bank_table(bank: &QuestionBank) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        "ID",
        "Question",
        "Options",
        "Answer",
        "Category",
        "Difficulty",
        "Marks",
    ]);

    for q in bank {
        let options: Vec<String> = q
            .options
            .iter()
            .enumerate()
            .map(|(i, o)| format!("{}) {o}", option_letter(i)))
            .collect();
        table.add_row(vec![
            Cell::new(q.id),
            Cell::new(&q.text),
            Cell::new(options.join("\n")),
            Cell::new(q.correct_letter()),
            Cell::new(&q.category),
            Cell::new(q.difficulty),
            Cell::new(q.marks),
        ]);
    }

    table
}

/// Per-question breakdown of one attempt, preceded by a summary line.
pub fn student_report(report: &StudentReport) -> String {
    let mut out = format!(
        "Student {}: {}\nScore: {}/{} ({:.1}%) | Time: {:.2}s | Questions: {}\n",
        report.student_id,
        report.name,
        report.score,
        report.total_possible_marks,
        report.percentage,
        report.elapsed_secs,
        report.questions_attempted,
    );
    if report.timed_out {
        out.push_str("Time limit reached before the quiz was finished.\n");
    }

    if report.outcomes.is_empty() {
        return out;
    }

    let mut table = Table::new();
    table.set_header(vec!["#", "Question", "Selected", "Correct", "Result", "Marks"]);
    for o in &report.outcomes {
        let selected = o
            .selected
            .map(|c| c.to_string())
            .unwrap_or_else(|| "-".to_string());
        let (verdict, marks) = if o.is_correct {
            ("correct", o.marks)
        } else {
            ("wrong", 0)
        };
        table.add_row(vec![
            Cell::new(o.number),
            Cell::new(&o.text),
            Cell::new(selected),
            Cell::new(o.correct),
            Cell::new(verdict),
            Cell::new(format!("{marks}/{}", o.marks)),
        ]);
    }

    out.push('\n');
    out.push_str(&table.to_string());
    out.push('\n');
    out
}

/// One row per student, then the class averages and the top performer.
pub fn class_report(report: &ClassReport) -> String {
    let mut table = Table::new();
    table.set_header(vec!["ID", "Name", "Score", "Percentage", "Time (s)"]);
    for r in &report.rows {
        table.add_row(vec![
            Cell::new(r.student_id),
            Cell::new(&r.name),
            Cell::new(format!("{}/{}", r.score, r.total_possible_marks)),
            Cell::new(format!("{:.1}%", r.percentage)),
            Cell::new(format!("{:.2}", r.elapsed_secs)),
        ]);
    }

    let mut out = table.to_string();
    out.push_str(&format!(
        "\n\nAverage score: {:.2}\nAverage time: {:.2}s\n",
        report.summary.mean_score, report.summary.mean_time_secs
    ));
    if let Some(top) = &report.summary.top_performer {
        out.push_str(&format!(
            "Top performer: {} (Score: {})\n",
            top.name, top.score
        ));
    }
    out
}
