//! Session engine: state, answers, and grading for one quiz attempt.

mod answer;
mod engine;

pub use answer::{grade, AnswerStatus, AnswerValue, UserAnswer};
pub use engine::{
    format_clock, QuestionStatus, QuizSession, SessionPhase, ViewMode,
};
