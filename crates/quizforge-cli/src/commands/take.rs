//! The `quizforge take` command.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;

use quizforge_core::config::QuizforgeConfig;
use quizforge_core::quotes::QuoteStore;
use quizforge_core::session::{QuestionView, QuizSession, Responder, SessionConfig};
use quizforge_core::{parser, QuizError};

pub struct TakeArgs {
    pub name: Option<String>,
    pub count: Option<usize>,
    pub time_limit: Option<u64>,
    pub seed: Option<u64>,
    pub bank: Option<PathBuf>,
}

/// Prints each question and reads one line per answer.
///
/// End of input counts as no selection for every remaining question.
struct ConsoleResponder<I, O> {
    input: I,
    output: O,
}

impl<I: BufRead, O: Write> ConsoleResponder<I, O> {
    fn new(input: I, output: O) -> Self {
        Self { input, output }
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

impl<I: BufRead, O: Write> Responder for ConsoleResponder<I, O> {
    fn on_start(&mut self, total: usize) {
        let _ = writeln!(self.output, "\n=== QUIZ STARTED ===");
        let _ = writeln!(self.output, "You have {total} questions. Good luck!\n");
    }

    fn respond(&mut self, view: &QuestionView<'_>) -> io::Result<Option<String>> {
        writeln!(
            self.output,
            "Question {}/{} (Marks: {})",
            view.number, view.total, view.question.marks
        )?;
        writeln!(self.output, "Q: {}", view.question.text)?;
        writeln!(
            self.output,
            "Category: {} | Difficulty: {}",
            view.question.category, view.question.difficulty
        )?;
        for (letter, option) in view.options() {
            writeln!(self.output, "{letter}) {option}")?;
        }
        write!(self.output, "Your answer (A-{}): ", view.last_letter())?;
        self.output.flush()?;

        let answer = self.read_line()?;
        writeln!(self.output)?;
        Ok(answer)
    }

    fn on_time_up(&mut self, presented: usize, total: usize) {
        let _ = writeln!(
            self.output,
            "Time is up! {presented} of {total} questions were answered."
        );
    }
}

pub fn execute(config: &QuizforgeConfig, args: TakeArgs) -> Result<()> {
    let path = super::bank_path(config, args.bank);
    let bank = parser::load_bank_path(&path)?;
    if bank.is_empty() {
        return Err(QuizError::EmptyBank.into());
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut responder = ConsoleResponder::new(stdin.lock(), stdout.lock());

    let name = match args.name {
        Some(name) => name,
        None => {
            write!(responder.output, "Enter your name: ")?;
            responder.output.flush()?;
            responder.read_line()?.unwrap_or_default()
        }
    };
    let name = student_name(&name)?;

    let question_count = args.count.unwrap_or(config.default_question_count);
    anyhow::ensure!(question_count >= 1, "question count must be at least 1");
    if question_count > bank.len() {
        println!(
            "Only {} questions available, the quiz will use all of them.",
            bank.len()
        );
    }

    let time_limit = match args.time_limit {
        Some(0) => None,
        Some(secs) => Some(Duration::from_secs(secs)),
        None => config.time_limit(),
    };
    if let Some(limit) = time_limit {
        println!("Time limit: {} seconds", limit.as_secs());
    }

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let session = QuizSession::new(
        &bank,
        SessionConfig {
            question_count,
            time_limit,
        },
    );
    let result = session
        .deliver(&name, &mut rng, &mut responder)
        .context("quiz aborted")?;
    drop(responder);

    println!(
        "Quiz completed! Time taken: {:.2} seconds",
        result.elapsed_secs
    );
    println!(
        "Your score: {}/{}",
        result.score, result.total_possible_marks
    );

    let mut manager = super::load_results(config)?;
    let student_id = manager.record(result)?;
    manager.save_json(&config.results_path)?;
    println!("Your student ID is {student_id}.");

    // A missing or unreadable quotes file only costs the closing line.
    if let Ok(Some(quote)) = QuoteStore::new(&config.quotes_path).random(&mut rng) {
        println!("\n\"{quote}\"");
    }

    Ok(())
}

/// Trimmed student name, rejected if blank or containing control characters.
fn student_name(raw: &str) -> Result<String> {
    let name = raw.trim();
    anyhow::ensure!(!name.is_empty(), "student name must not be empty");
    anyhow::ensure!(
        !name.chars().any(char::is_control),
        "student name must not contain control characters"
    );
    Ok(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use quizforge_core::{Difficulty, QuestionBank, QuestionDraft};

    fn bank() -> QuestionBank {
        let mut bank = QuestionBank::new("t");
        bank.add(
            &QuestionDraft::new("2 + 2?", vec!["3".into(), "4".into(), "5".into()], 1)
                .with_category("arithmetic")
                .with_difficulty(Difficulty::Hard),
        )
        .unwrap();
        bank
    }

    #[test]
    fn console_responder_prints_and_reads() {
        let bank = bank();
        let session = QuizSession::new(&bank, SessionConfig::default());
        let mut out = Vec::new();

        // Try every letter: exactly one of them is correct after the shuffle.
        let mut scores = Vec::new();
        for letter in ["a", "b", "c"] {
            out.clear();
            let input = format!("{letter}\n");
            let mut responder = ConsoleResponder::new(input.as_bytes(), &mut out);
            let mut rng = StdRng::seed_from_u64(5);
            let result = session.deliver("Ann", &mut rng, &mut responder).unwrap();
            scores.push(result.score);
        }
        assert_eq!(scores.iter().sum::<u32>(), 1);

        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("QUIZ STARTED"));
        assert!(printed.contains("Question 1/1 (Marks: 1)"));
        assert!(printed.contains("Q: 2 + 2?"));
        assert!(printed.contains("Category: arithmetic | Difficulty: hard"));
        assert!(printed.contains("Your answer (A-C): "));
    }

    #[test]
    fn end_of_input_is_no_selection() {
        let bank = bank();
        let session = QuizSession::new(&bank, SessionConfig::default());
        let mut out = Vec::new();
        let mut responder = ConsoleResponder::new(&b""[..], &mut out);
        let mut rng = StdRng::seed_from_u64(1);

        let result = session.deliver("Ann", &mut rng, &mut responder).unwrap();
        assert_eq!(result.answers, vec![None]);
        assert_eq!(result.score, 0);
        assert_eq!(result.total_possible_marks, 1);
    }

    #[test]
    fn student_name_rules() {
        assert_eq!(student_name("  Ann Lee \n").unwrap(), "Ann Lee");
        assert!(student_name("   ").is_err());
        assert!(student_name("Ann\nName: Mallory | Score: 9/9 | Time: 1 sec").is_err());
        assert!(student_name("Ann\rBob").is_err());
        assert!(student_name("Ann\tLee").is_err());
    }
}
