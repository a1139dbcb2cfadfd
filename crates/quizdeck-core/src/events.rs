use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::quiz::{QuestionId, QuizSource};
use crate::session::{AnswerStatus, SessionPhase, ViewMode};
use crate::stats::ResultStatistics;

/// Every effective command on a session produces an Event.
/// Presentation layers render or log them; `None` from a command means the
/// input was dropped and no event exists.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SessionEvent {
    QuizLoaded {
        session_id: Uuid,
        source: QuizSource,
        quiz_id: String,
        title: String,
        question_count: usize,
        at: DateTime<Utc>,
    },
    SessionReset {
        session_id: Uuid,
        at: DateTime<Utc>,
    },
    SessionStarted {
        session_id: Uuid,
        question_count: usize,
        at: DateTime<Utc>,
    },
    /// Carries the final grading summary and total elapsed time.
    SessionFinished {
        session_id: Uuid,
        stats: ResultStatistics,
        elapsed_secs: u64,
        at: DateTime<Utc>,
    },
    QuestionSkipped {
        question_id: QuestionId,
        index: usize,
        at: DateTime<Utc>,
    },
    /// `replaced` is true when this answer overwrote a prior one for the
    /// same question.
    AnswerRecorded {
        question_id: QuestionId,
        status: AnswerStatus,
        replaced: bool,
        at: DateTime<Utc>,
    },
    /// Full state snapshot, polled by presentation layers.
    Snapshot {
        session_id: Uuid,
        phase: SessionPhase,
        quiz_title: String,
        current_index: usize,
        question_count: usize,
        answered: usize,
        skipped: usize,
        progress: f64,
        elapsed_secs: u64,
        view: ViewMode,
        at: DateTime<Utc>,
    },
}
