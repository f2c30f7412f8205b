//! End-to-end workflow tests: bank file -> delivery -> results store ->
//! results log -> reports, driven through the library crates.

use std::io;

use rand::rngs::StdRng;
use rand::SeedableRng;

use quizforge_core::parser;
use quizforge_core::report::{ClassReport, StudentReport};
use quizforge_core::results_log;
use quizforge_core::session::{QuestionView, QuizSession, Responder, SessionConfig};
use quizforge_core::ResultManager;

const BANK: &str = r#"[bank]
name = "Workflow"

[[questions]]
text = "Capital of Italy?"
options = ["Rome", "Milan", "Naples", "Turin"]
answer = "A"
category = "geography"
marks = 2

[[questions]]
text = "Boiling point of water at sea level (C)?"
options = ["90", "100", "110"]
answer = "B"
category = "science"

[[questions]]
text = "Square root of 81?"
options = ["7", "8", "9"]
answer = "C"
category = "math"
marks = 3
"#;

/// Answers correctly, using the view's option order to find the letter.
struct Perfect;

impl Responder for Perfect {
    fn respond(&mut self, view: &QuestionView<'_>) -> io::Result<Option<String>> {
        let slot = view
            .order
            .display_slot(view.question.correct_index)
            .expect("correct option is displayed");
        Ok(Some(((b'a' + slot as u8) as char).to_string()))
    }
}

/// Never gives a usable answer.
struct Blank;

impl Responder for Blank {
    fn respond(&mut self, _: &QuestionView<'_>) -> io::Result<Option<String>> {
        Ok(Some("?".into()))
    }
}

#[test]
fn full_workflow() {
    let dir = tempfile::tempdir().unwrap();
    let bank_path = dir.path().join("bank.toml");
    let results_path = dir.path().join("results.json");
    let log_path = dir.path().join("quiz_results.txt");
    std::fs::write(&bank_path, BANK).unwrap();

    let bank = parser::parse_bank(&bank_path).unwrap();
    assert_eq!(bank.len(), 3);
    assert_eq!(bank.total_marks(), 6);

    let session = QuizSession::new(
        &bank,
        SessionConfig {
            question_count: 3,
            time_limit: None,
        },
    );
    let mut rng = StdRng::seed_from_u64(99);

    let perfect = session.deliver("Ann", &mut rng, &mut Perfect).unwrap();
    assert_eq!(perfect.score, 6);
    assert_eq!(perfect.total_possible_marks, 6);
    assert!(perfect.per_question_correct.iter().all(|&c| c));

    let blank = session.deliver("Bob", &mut rng, &mut Blank).unwrap();
    assert_eq!(blank.score, 0);
    assert!(blank.answers.iter().all(Option::is_none));

    // Persist, reload, and keep going across "runs".
    let mut manager = ResultManager::load_or_default(&results_path).unwrap();
    assert_eq!(manager.record(perfect).unwrap(), 1);
    manager.save_json(&results_path).unwrap();

    let mut manager = ResultManager::load_or_default(&results_path).unwrap();
    assert_eq!(manager.record(blank).unwrap(), 2);

    assert_eq!(
        results_log::append_unlogged(&mut manager, &log_path).unwrap(),
        2
    );
    assert_eq!(
        results_log::append_unlogged(&mut manager, &log_path).unwrap(),
        0
    );
    manager.save_json(&results_path).unwrap();

    let log = std::fs::read_to_string(&log_path).unwrap();
    assert_eq!(log.lines().count(), 2);
    assert!(log.starts_with("Name: Ann | Score: 6/6 | Time: "));

    let manager = ResultManager::load_json(&results_path).unwrap();
    assert!(manager.unlogged().next().is_none());

    let ann = StudentReport::for_student(&manager, 1).unwrap();
    assert_eq!(ann.percentage, 100.0);
    assert!(ann.outcomes.iter().all(|o| o.selected == Some(o.correct)));

    let class = ClassReport::from_manager(&manager).unwrap();
    assert_eq!(class.summary.student_count, 2);
    assert_eq!(class.summary.mean_score, 3.0);
    let top = class.summary.top_performer.as_ref().unwrap();
    assert_eq!((top.student_id, top.name.as_str(), top.score), (1, "Ann", 6));
    assert_eq!(class.categories["math"], (1, 2));

    let html = quizforge_report::html::generate_html(&class, &bank.name);
    assert!(html.contains("Workflow"));
}

#[test]
fn bank_round_trips_through_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("copy.toml");

    let bank = parser::parse_bank_str(BANK, "bank.toml".as_ref()).unwrap();
    parser::write_bank(&bank, &path).unwrap();
    let reloaded = parser::parse_bank(&path).unwrap();

    assert_eq!(reloaded.name, "Workflow");
    assert_eq!(reloaded.questions(), bank.questions());
}
