//! Quiz data model.
//!
//! A [`Quiz`] is loaded wholesale from an external source (typically a JSON
//! API payload) and handed to the session engine. The engine never fetches
//! anything itself, and it treats the quiz as immutable for the lifetime of
//! the session.

use std::collections::{BTreeSet, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{QuizError, ValidationError};

/// Stable identifier of a question, assigned by the upstream service.
pub type QuestionId = String;

/// Stable identifier of a selectable option within a question.
pub type OptionId = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionType {
    SingleChoice,
    MultipleChoice,
    Dissertative,
    FillInBlank,
    TrueFalseMatrix,
    Matching,
    ImageClick,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// Subject/topic taxonomy attached to a question.
///
/// Used only for grouping and reporting, never for answer evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KnowledgeMatrix {
    pub subject: String,
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub subtopic: Option<String>,
}

/// One selectable choice within a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionOption {
    pub id: OptionId,
    pub text: String,
}

/// The canonical correct answer for a question.
///
/// Exactly one key kind is meaningful per question type: a single option id
/// for single-choice, a set of option ids for multiple-choice, and `Ungraded`
/// for free-text and other manually graded types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum AnswerKey {
    Single { option_id: OptionId },
    Multiple { option_ids: BTreeSet<OptionId> },
    Ungraded,
}

/// One assessment item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: QuestionId,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub statement: String,
    /// Ordered list of choices; empty for free-text questions.
    #[serde(default)]
    pub options: Vec<QuestionOption>,
    pub answer_key: AnswerKey,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub knowledge_matrix: Option<KnowledgeMatrix>,
}

impl Question {
    /// Primary subject classifier, if the question carries a taxonomy.
    pub fn subject(&self) -> Option<&str> {
        self.knowledge_matrix.as_ref().map(|m| m.subject.as_str())
    }

    pub fn option_by_id(&self, option_id: &str) -> Option<&QuestionOption> {
        self.options.iter().find(|o| o.id == option_id)
    }
}

/// The assessment container handed to the session engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quiz {
    pub id: String,
    pub title: String,
    pub questions: Vec<Question>,
}

impl Quiz {
    /// Parse a quiz from its JSON wire shape.
    pub fn from_json(json: &str) -> Result<Self, QuizError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a quiz JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, QuizError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    pub fn question_by_id(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    /// Structural validation of the payload.
    ///
    /// The engine itself never validates -- loading a malformed quiz simply
    /// yields degenerate-but-total query results. Callers that want to reject
    /// bad payloads up front opt into this check.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.questions.is_empty() {
            return Err(ValidationError::EmptyQuiz {
                quiz_id: self.id.clone(),
            });
        }
        let mut seen = HashSet::new();
        for question in &self.questions {
            if !seen.insert(question.id.as_str()) {
                return Err(ValidationError::DuplicateQuestionId {
                    question_id: question.id.clone(),
                });
            }
            question.validate_key()?;
        }
        Ok(())
    }
}

impl Question {
    fn validate_key(&self) -> Result<(), ValidationError> {
        let known: HashSet<&str> = self.options.iter().map(|o| o.id.as_str()).collect();
        match &self.answer_key {
            AnswerKey::Single { option_id } => {
                if matches!(
                    self.question_type,
                    QuestionType::MultipleChoice | QuestionType::Dissertative
                ) {
                    return Err(ValidationError::KeyMismatch {
                        question_id: self.id.clone(),
                    });
                }
                if !known.contains(option_id.as_str()) {
                    return Err(ValidationError::UnknownOption {
                        question_id: self.id.clone(),
                        option_id: option_id.clone(),
                    });
                }
            }
            AnswerKey::Multiple { option_ids } => {
                if matches!(
                    self.question_type,
                    QuestionType::SingleChoice | QuestionType::Dissertative
                ) {
                    return Err(ValidationError::KeyMismatch {
                        question_id: self.id.clone(),
                    });
                }
                if option_ids.is_empty() {
                    return Err(ValidationError::EmptyAnswerKey {
                        question_id: self.id.clone(),
                    });
                }
                for option_id in option_ids {
                    if !known.contains(option_id.as_str()) {
                        return Err(ValidationError::UnknownOption {
                            question_id: self.id.clone(),
                            option_id: option_id.clone(),
                        });
                    }
                }
            }
            AnswerKey::Ungraded => {
                if matches!(
                    self.question_type,
                    QuestionType::SingleChoice | QuestionType::MultipleChoice
                ) {
                    return Err(ValidationError::KeyMismatch {
                        question_id: self.id.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

/// Provenance of the active quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuizSource {
    Exam,
    Activity,
    Lesson,
}

/// The currently loaded quiz together with where it came from.
///
/// At most one quiz is active per session; `Option<ActiveQuiz>` replaces the
/// older convention of three mutually exclusive optional slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveQuiz {
    pub quiz: Quiz,
    pub source: QuizSource,
}
