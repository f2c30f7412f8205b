//! Quiz delivery.
//!
//! A session draws questions from the bank without replacement, shuffles the
//! options of each one, collects one answer per question from a `Responder`
//! and freezes everything into a `StudentResult`.
//!
//! Two index spaces are in play for every question:
//!
//! - the *display slot*: position of an option as shown (`A`, `B`, ...);
//! - the *canonical index*: position in the question's stored option list.
//!
//! `OptionOrder` maps the first onto the second. Answers are stored in
//! canonical space only, so scoring never sees a display slot.

use std::cell::Cell;
use std::io;
use std::rc::Rc;
use std::time::{Duration, Instant};

use rand::seq::SliceRandom;
use rand::Rng;

use crate::bank::QuestionBank;
use crate::error::QuizError;
use crate::model::{option_letter, parse_option_letter, Question};
use crate::results::StudentResult;
use crate::scoring;

/// Configuration for one quiz attempt.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Requested number of questions; clamped to the bank size.
    pub question_count: usize,
    /// Time budget for the whole attempt, checked between questions.
    pub time_limit: Option<Duration>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            question_count: 5,
            time_limit: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Clocks
// ---------------------------------------------------------------------------

/// Monotonic time source, measured from an arbitrary fixed origin.
pub trait Clock {
    fn now(&self) -> Duration;
}

/// Wall clock backed by `Instant`.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Manually advanced clock. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

// ---------------------------------------------------------------------------
// Option shuffling
// ---------------------------------------------------------------------------

/// Presentation order of one question's options: `order[slot] = canonical`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionOrder(Vec<usize>);

impl OptionOrder {
    /// Options shown in their canonical order.
    pub fn identity(len: usize) -> Self {
        Self((0..len).collect())
    }

    /// A fresh uniform permutation (Fisher–Yates).
    pub fn shuffled<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Self {
        let mut order: Vec<usize> = (0..len).collect();
        order.shuffle(rng);
        Self(order)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Canonical index of the option shown in `slot`.
    pub fn canonical(&self, slot: usize) -> Option<usize> {
        self.0.get(slot).copied()
    }

    /// Display slot in which the canonical option `index` is shown.
    pub fn display_slot(&self, index: usize) -> Option<usize> {
        self.0.iter().position(|&c| c == index)
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }
}

/// Turn a raw reply into a canonical option index.
///
/// Anything that is not a single in-range letter yields `None`.
pub fn decode_answer(raw: Option<&str>, order: &OptionOrder) -> Option<usize> {
    raw.and_then(|s| parse_option_letter(s, order.len()))
        .and_then(|slot| order.canonical(slot))
}

/// Uniformly choose `count` distinct indices from `0..pool_len`.
///
/// Shuffles the full range and keeps a prefix, so the result is both the
/// selection and its presentation order.
pub fn select_indices<R: Rng + ?Sized>(pool_len: usize, count: usize, rng: &mut R) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..pool_len).collect();
    indices.shuffle(rng);
    indices.truncate(count.min(pool_len));
    indices
}

// ---------------------------------------------------------------------------
// Answer collection
// ---------------------------------------------------------------------------

/// What a responder sees for one question.
#[derive(Debug, Clone, Copy)]
pub struct QuestionView<'a> {
    /// 1-based position in the session.
    pub number: usize,
    /// Questions selected for the session.
    pub total: usize,
    pub question: &'a Question,
    pub order: &'a OptionOrder,
}

impl<'a> QuestionView<'a> {
    /// Options in display order, labeled `A`, `B`, ...
    pub fn options(&self) -> impl Iterator<Item = (char, &'a str)> + 'a {
        let question = self.question;
        let order = self.order;
        order
            .as_slice()
            .iter()
            .enumerate()
            .map(move |(slot, &index)| (option_letter(slot), question.options[index].as_str()))
    }

    /// Last valid letter for this question.
    pub fn last_letter(&self) -> char {
        option_letter(self.order.len().saturating_sub(1))
    }
}

/// Source of answers for a session.
pub trait Responder {
    fn on_start(&mut self, _total: usize) {}

    /// Return the raw reply, or `None` when input has ended.
    fn respond(&mut self, view: &QuestionView<'_>) -> io::Result<Option<String>>;

    fn on_time_up(&mut self, _presented: usize, _total: usize) {}
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// One quiz attempt over a read-only bank.
pub struct QuizSession<'a> {
    bank: &'a QuestionBank,
    config: SessionConfig,
    clock: Box<dyn Clock + 'a>,
}

impl<'a> QuizSession<'a> {
    pub fn new(bank: &'a QuestionBank, config: SessionConfig) -> Self {
        Self {
            bank,
            config,
            clock: Box::new(SystemClock::new()),
        }
    }

    pub fn with_clock(mut self, clock: impl Clock + 'a) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Requested question count clamped to the bank size.
    pub fn effective_count(&self) -> usize {
        self.config.question_count.min(self.bank.len())
    }

    /// Run the attempt to completion.
    pub fn deliver<R: Rng + ?Sized>(
        &self,
        student_name: &str,
        rng: &mut R,
        responder: &mut dyn Responder,
    ) -> Result<StudentResult, QuizError> {
        let mut result = StudentResult::empty(student_name);
        let effective = self.effective_count();
        if effective == 0 {
            tracing::debug!("no questions to deliver");
            return Ok(result);
        }

        let selected: Vec<Question> = select_indices(self.bank.len(), effective, rng)
            .into_iter()
            .map(|i| self.bank.questions()[i].clone())
            .collect();
        let orders: Vec<OptionOrder> = selected
            .iter()
            .map(|q| OptionOrder::shuffled(q.options.len(), rng))
            .collect();

        result
            .questions_used
            .try_reserve_exact(effective)
            .and_then(|_| result.answers.try_reserve_exact(effective))
            .map_err(|_| QuizError::OutOfMemory("quiz session"))?;

        tracing::debug!(
            requested = self.config.question_count,
            effective,
            time_limit = ?self.config.time_limit,
            "quiz started"
        );
        responder.on_start(effective);

        let start = self.clock.now();
        for (i, (question, order)) in selected.into_iter().zip(&orders).enumerate() {
            if let Some(limit) = self.config.time_limit {
                if self.clock.now().saturating_sub(start) >= limit {
                    tracing::debug!(presented = i, total = effective, "time limit reached");
                    result.timed_out = true;
                    responder.on_time_up(i, effective);
                    break;
                }
            }

            let view = QuestionView {
                number: i + 1,
                total: effective,
                question: &question,
                order,
            };
            let raw = responder.respond(&view)?;
            let answer = decode_answer(raw.as_deref(), order);

            result.questions_used.push(question);
            result.answers.push(answer);
        }
        result.elapsed_secs = self.clock.now().saturating_sub(start).as_secs_f64();

        scoring::evaluate(&mut result);
        tracing::debug!(
            score = result.score,
            total = result.total_possible_marks,
            presented = result.questions_presented(),
            "quiz finished"
        );
        Ok(result)
    }
}
