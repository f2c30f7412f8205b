//! quizforge-report: Console tables and HTML pages for quiz results.

pub mod html;
pub mod text;
