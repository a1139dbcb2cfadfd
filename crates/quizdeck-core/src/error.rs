//! Core error types for quizdeck-core.
//!
//! The session engine itself is total: queries return empty results and
//! commands report `None` instead of failing. Errors only arise at the
//! loading and validation boundary, where quiz payloads enter the process.

use thiserror::Error;

/// Core error type for quizdeck-core.
#[derive(Error, Debug)]
pub enum QuizError {
    /// Structural problems in a quiz payload
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Structural validation errors for quiz payloads.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Quiz carries no questions
    #[error("Quiz '{quiz_id}' has no questions")]
    EmptyQuiz { quiz_id: String },

    /// Two questions share an id
    #[error("Duplicate question id '{question_id}'")]
    DuplicateQuestionId { question_id: String },

    /// Answer key points at an option the question does not offer
    #[error("Answer key for question '{question_id}' references unknown option '{option_id}'")]
    UnknownOption {
        question_id: String,
        option_id: String,
    },

    /// Answer key kind is inconsistent with the question type
    #[error("Answer key kind does not match the type of question '{question_id}'")]
    KeyMismatch { question_id: String },

    /// Multiple-choice key with no members can never be matched
    #[error("Multiple-choice answer key for question '{question_id}' is empty")]
    EmptyAnswerKey { question_id: String },
}

/// Result type alias for QuizError
pub type Result<T, E = QuizError> = std::result::Result<T, E>;
