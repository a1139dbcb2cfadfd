//! # Quizdeck Core Library
//!
//! This library provides the core business logic for the Quizdeck assessment
//! platform: a single-session quiz state machine with navigation, answer
//! grading, and derived statistics. Presentation layers (CLI, GUI, web) are
//! thin consumers of this crate.
//!
//! ## Architecture
//!
//! - **Session Engine**: A caller-driven state machine that requires the host
//!   to invoke commands on user interaction and to feed elapsed-time deltas
//!   into it -- the engine owns no clock or thread
//! - **Quiz Model**: Questions, options, answer keys, and the knowledge
//!   taxonomy, deserialized wholesale from an external JSON payload
//! - **Statistics**: Pure reporting views over the recorded answers
//!
//! ## Key Components
//!
//! - [`QuizSession`]: Core session state machine
//! - [`Quiz`]: The loaded assessment container
//! - [`SessionEvent`]: Emitted by every effective command

pub mod error;
pub mod events;
pub mod quiz;
pub mod session;
pub mod stats;

pub use error::{QuizError, Result, ValidationError};
pub use events::SessionEvent;
pub use quiz::{
    ActiveQuiz, AnswerKey, Difficulty, KnowledgeMatrix, Question, QuestionOption, QuestionType,
    Quiz, QuizSource,
};
pub use session::{
    format_clock, grade, AnswerStatus, AnswerValue, QuestionStatus, QuizSession, SessionPhase,
    UserAnswer, ViewMode,
};
pub use stats::{DifficultyBreakdown, ResultStatistics, SubjectGroup};
