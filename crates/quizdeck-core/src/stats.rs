//! Statistics and reporting views.
//!
//! Pure functions over borrowed session state - nothing here mutates or
//! caches. The engine exposes thin wrappers around these so presentation
//! layers can also call them directly on a quiz they have not loaded yet.

use serde::{Deserialize, Serialize};

use crate::quiz::{Difficulty, Question, Quiz};
use crate::session::{AnswerStatus, UserAnswer};

/// Subject label for questions that carry no knowledge taxonomy.
pub const UNCLASSIFIED_SUBJECT: &str = "Uncategorized";

/// Grading summary over the recorded answers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultStatistics {
    pub total_answered: u32,
    pub correct_answers: u32,
    pub incorrect_answers: u32,
    pub pending_answers: u32,
    /// One point per correct answer.
    pub score: u32,
}

/// Classify each recorded answer by its status.
pub fn result_statistics(answers: &[UserAnswer]) -> ResultStatistics {
    let mut stats = ResultStatistics::default();
    for answer in answers {
        stats.total_answered += 1;
        match answer.status {
            AnswerStatus::Correct => stats.correct_answers += 1,
            AnswerStatus::Incorrect => stats.incorrect_answers += 1,
            AnswerStatus::PendingReview => stats.pending_answers += 1,
        }
    }
    stats.score = stats.correct_answers;
    stats
}

/// Questions sharing a primary subject, in quiz order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectGroup {
    pub subject: String,
    pub questions: Vec<Question>,
}

/// Partition a quiz's questions by primary subject.
///
/// Subjects appear in first-seen order and question order is preserved
/// within each group. Questions without a knowledge matrix fall into
/// [`UNCLASSIFIED_SUBJECT`].
pub fn group_by_subject(quiz: &Quiz) -> Vec<SubjectGroup> {
    let mut groups: Vec<SubjectGroup> = Vec::new();
    for question in &quiz.questions {
        let subject = question.subject().unwrap_or(UNCLASSIFIED_SUBJECT);
        match groups.iter_mut().find(|g| g.subject == subject) {
            Some(group) => group.questions.push(question.clone()),
            None => groups.push(SubjectGroup {
                subject: subject.to_owned(),
                questions: vec![question.clone()],
            }),
        }
    }
    groups
}

/// Question counts per difficulty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DifficultyBreakdown {
    pub easy: u32,
    pub medium: u32,
    pub hard: u32,
}

pub fn difficulty_breakdown(quiz: &Quiz) -> DifficultyBreakdown {
    let mut breakdown = DifficultyBreakdown::default();
    for question in &quiz.questions {
        match question.difficulty {
            Difficulty::Easy => breakdown.easy += 1,
            Difficulty::Medium => breakdown.medium += 1,
            Difficulty::Hard => breakdown.hard += 1,
        }
    }
    breakdown
}
