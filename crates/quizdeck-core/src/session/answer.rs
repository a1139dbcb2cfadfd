//! User answers and grading.
//!
//! Grading is deterministic and total: a malformed comparison (wrong payload
//! shape, unknown option, set mismatch) resolves to `Incorrect`, never to an
//! error. Free-text responses grade as `PendingReview` and are settled by a
//! human outside the engine.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::quiz::{AnswerKey, OptionId, Question, QuestionId};

/// Derived correctness of a recorded answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnswerStatus {
    Correct,
    Incorrect,
    /// Awaiting external human grading (free-text responses).
    PendingReview,
}

/// The payload of a user's response.
///
/// Blank payloads (`None` selection, empty set, empty text) are legal and
/// stored as "no answer" -- distinguishable from "not attempted" only by the
/// presence of a [`UserAnswer`] record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum AnswerValue {
    /// Single-choice selection.
    Selected { option_id: Option<OptionId> },
    /// Multiple-choice selection -- always the full replacement set.
    SelectedMany { option_ids: Vec<OptionId> },
    /// Free-text response.
    Text { text: Option<String> },
}

impl AnswerValue {
    /// True when the stored payload carries no actual response.
    pub fn is_blank(&self) -> bool {
        match self {
            AnswerValue::Selected { option_id } => option_id.is_none(),
            AnswerValue::SelectedMany { option_ids } => option_ids.is_empty(),
            AnswerValue::Text { text } => text.as_deref().map_or(true, |t| t.trim().is_empty()),
        }
    }

    /// Every option id recorded in this payload, in recorded order.
    pub fn selected_options(&self) -> Vec<OptionId> {
        match self {
            AnswerValue::Selected { option_id } => option_id.iter().cloned().collect(),
            AnswerValue::SelectedMany { option_ids } => option_ids.clone(),
            AnswerValue::Text { .. } => Vec::new(),
        }
    }
}

/// A user's response to one question. At most one exists per question id
/// within a session; re-answering replaces the prior record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAnswer {
    pub question_id: QuestionId,
    pub value: AnswerValue,
    pub status: AnswerStatus,
    pub answered_at: DateTime<Utc>,
}

/// Grade a submitted value against the question's answer key.
pub fn grade(question: &Question, value: &AnswerValue) -> AnswerStatus {
    match &question.answer_key {
        AnswerKey::Single { option_id } => match value {
            AnswerValue::Selected {
                option_id: Some(selected),
            } if selected == option_id => AnswerStatus::Correct,
            _ => AnswerStatus::Incorrect,
        },
        AnswerKey::Multiple { option_ids } => match value {
            AnswerValue::SelectedMany {
                option_ids: selected,
            } => {
                // Exact set equality: same members, any order.
                let selected: BTreeSet<&OptionId> = selected.iter().collect();
                let expected: BTreeSet<&OptionId> = option_ids.iter().collect();
                if selected == expected {
                    AnswerStatus::Correct
                } else {
                    AnswerStatus::Incorrect
                }
            }
            _ => AnswerStatus::Incorrect,
        },
        AnswerKey::Ungraded => AnswerStatus::PendingReview,
    }
}
