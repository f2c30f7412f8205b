//! quizforge-core: Question bank, quiz delivery, and scoring.
//!
//! This crate defines the data model, the randomized delivery algorithm and
//! the scoring/reporting model that the rest of quizforge builds on.

pub mod bank;
pub mod config;
pub mod error;
pub mod model;
pub mod parser;
pub mod quotes;
pub mod report;
pub mod results;
pub mod results_log;
pub mod scoring;
pub mod session;
pub mod statistics;

pub use bank::QuestionBank;
pub use error::QuizError;
pub use model::{Difficulty, Question, QuestionDraft};
pub use results::{ResultManager, StudentRecord, StudentResult};
pub use session::{QuizSession, Responder, SessionConfig};
