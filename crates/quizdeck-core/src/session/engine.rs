//! Quiz session engine.
//!
//! The session is a caller-driven state machine. It does not use internal
//! threads or timers - the host invokes commands on user interaction and
//! feeds elapsed-time deltas into `add_time()` from whatever scheduling
//! primitive it owns.
//!
//! ## State Transitions
//!
//! ```text
//! NotStarted -> InProgress -> Finished
//! ```
//!
//! `reset()` and the load commands return the session to `NotStarted` from
//! any phase. Navigation and answer commands are accepted in any phase; they
//! are only meaningful while in progress, and gating the UI is the caller's
//! job.
//!
//! ## Usage
//!
//! ```ignore
//! let mut session = QuizSession::with_quiz(quiz, QuizSource::Exam);
//! session.start();
//! session.select_answer("q1", Some("q1-a"));
//! session.next_question();
//! session.finish();
//! ```
//!
//! Commands return `Some(SessionEvent)` when they took effect and `None`
//! when they were ignored, so callers can tell a recorded answer from a
//! silently dropped one. Queries are total: with no quiz loaded or an
//! out-of-range index they return empty/zero/`None` results, never errors.

use std::collections::HashSet;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::events::SessionEvent;
use crate::quiz::{ActiveQuiz, OptionId, Question, QuestionId, Quiz, QuizSource};
use crate::session::answer::{grade, AnswerStatus, AnswerValue, UserAnswer};
use crate::stats::{self, ResultStatistics, SubjectGroup};

/// Lifecycle phase of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SessionPhase {
    NotStarted,
    InProgress,
    Finished,
}

/// Presentation mode tracked by the engine but consumed by the rendering
/// layer: `Default` is interactive answering, `Result` is a read-only review
/// that reveals correctness.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Default,
    Result,
}

/// Derived per-question label. Answered outranks skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionStatus {
    Answered,
    Skipped,
    Unanswered,
}

/// Single source of truth for an in-progress assessment session.
///
/// One instance per session - callers own it and pass it by reference, so a
/// multi-tenant host simply scopes one session per user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizSession {
    session_id: Uuid,
    active: Option<ActiveQuiz>,
    current_index: usize,
    /// Ordered by first answer; unique per question id.
    answers: Vec<UserAnswer>,
    skipped: HashSet<QuestionId>,
    started: bool,
    finished: bool,
    time_elapsed_secs: u64,
    view: ViewMode,
}

impl QuizSession {
    /// Create an empty session with no quiz loaded.
    pub fn new() -> Self {
        Self {
            session_id: Uuid::new_v4(),
            active: None,
            current_index: 0,
            answers: Vec::new(),
            skipped: HashSet::new(),
            started: false,
            finished: false,
            time_elapsed_secs: 0,
            view: ViewMode::Default,
        }
    }

    /// Create a session with a quiz already loaded.
    pub fn with_quiz(quiz: Quiz, source: QuizSource) -> Self {
        let mut session = Self::new();
        session.load(quiz, source);
        session
    }

    // ── Loading ──────────────────────────────────────────────────────

    pub fn load_exam(&mut self, quiz: Quiz) -> SessionEvent {
        self.load(quiz, QuizSource::Exam)
    }

    pub fn load_activity(&mut self, quiz: Quiz) -> SessionEvent {
        self.load(quiz, QuizSource::Activity)
    }

    pub fn load_lesson(&mut self, quiz: Quiz) -> SessionEvent {
        self.load(quiz, QuizSource::Lesson)
    }

    /// Replace the active quiz and reset all session state.
    pub fn load(&mut self, quiz: Quiz, source: QuizSource) -> SessionEvent {
        let event = SessionEvent::QuizLoaded {
            session_id: self.session_id,
            source,
            quiz_id: quiz.id.clone(),
            title: quiz.title.clone(),
            question_count: quiz.questions.len(),
            at: Utc::now(),
        };
        self.active = Some(ActiveQuiz { quiz, source });
        self.clear_session_state();
        event
    }

    /// Clear session state but keep the loaded quiz (restart without
    /// re-fetching).
    pub fn reset(&mut self) -> SessionEvent {
        self.clear_session_state();
        SessionEvent::SessionReset {
            session_id: self.session_id,
            at: Utc::now(),
        }
    }

    fn clear_session_state(&mut self) {
        self.current_index = 0;
        self.answers.clear();
        self.skipped.clear();
        self.started = false;
        self.finished = false;
        self.time_elapsed_secs = 0;
        self.view = ViewMode::Default;
    }

    // ── Lifecycle ────────────────────────────────────────────────────

    /// Begin the attempt. Idempotent - `None` when already started.
    pub fn start(&mut self) -> Option<SessionEvent> {
        if self.started {
            return None;
        }
        self.started = true;
        Some(SessionEvent::SessionStarted {
            session_id: self.session_id,
            question_count: self.total_questions(),
            at: Utc::now(),
        })
    }

    /// End the attempt. Only meaningful while in progress; idempotent.
    pub fn finish(&mut self) -> Option<SessionEvent> {
        if !self.started || self.finished {
            return None;
        }
        self.finished = true;
        Some(SessionEvent::SessionFinished {
            session_id: self.session_id,
            stats: self.result_statistics(),
            elapsed_secs: self.time_elapsed_secs,
            at: Utc::now(),
        })
    }

    /// Accumulate externally measured elapsed time.
    ///
    /// The engine owns no clock. The host feeds it deltas, typically once per
    /// second. Ignored unless the session is in progress.
    pub fn add_time(&mut self, delta_secs: u64) {
        if self.started && !self.finished {
            self.time_elapsed_secs = self.time_elapsed_secs.saturating_add(delta_secs);
        }
    }

    // ── Navigation ───────────────────────────────────────────────────

    /// Jump to `index`, clamped into the valid range. Returns the index
    /// actually landed on.
    pub fn go_to(&mut self, index: usize) -> usize {
        let count = self.total_questions();
        self.current_index = if count == 0 { 0 } else { index.min(count - 1) };
        self.current_index
    }

    /// Advance one question; no-op at the last one.
    pub fn next_question(&mut self) -> usize {
        self.go_to(self.current_index.saturating_add(1))
    }

    /// Step back one question; no-op at the first one.
    pub fn previous_question(&mut self) -> usize {
        self.go_to(self.current_index.saturating_sub(1))
    }

    /// Mark the current question as skipped without touching its answer.
    ///
    /// A question can be both skipped and later answered; the answer takes
    /// priority in every derived status.
    pub fn skip_current(&mut self) -> Option<SessionEvent> {
        let question_id = self.current_question()?.id.clone();
        let index = self.current_index;
        self.skipped.insert(question_id.clone());
        Some(SessionEvent::QuestionSkipped {
            question_id,
            index,
            at: Utc::now(),
        })
    }

    // ── Answering ────────────────────────────────────────────────────

    /// Upsert a single-choice answer, regrading it against the answer key.
    pub fn select_answer(&mut self, question_id: &str, option_id: Option<&str>) -> Option<SessionEvent> {
        self.record(
            question_id,
            AnswerValue::Selected {
                option_id: option_id.map(str::to_owned),
            },
        )
    }

    /// Upsert a multi-choice answer as the full replacement set of selected
    /// option ids (not incremental).
    pub fn select_multiple(
        &mut self,
        question_id: &str,
        option_ids: Vec<OptionId>,
    ) -> Option<SessionEvent> {
        self.record(question_id, AnswerValue::SelectedMany { option_ids })
    }

    /// Upsert a free-text answer; it grades as pending review until settled
    /// outside the engine.
    pub fn select_dissertative(
        &mut self,
        question_id: &str,
        text: Option<String>,
    ) -> Option<SessionEvent> {
        self.record(question_id, AnswerValue::Text { text })
    }

    /// `None` when no quiz is loaded or the id is not in the active quiz -
    /// the command was dropped, not recorded.
    fn record(&mut self, question_id: &str, value: AnswerValue) -> Option<SessionEvent> {
        let question = self.active.as_ref()?.quiz.question_by_id(question_id)?;
        let status = grade(question, &value);
        let answer = UserAnswer {
            question_id: question_id.to_owned(),
            value,
            status,
            answered_at: Utc::now(),
        };
        let replaced = match self.answers.iter_mut().find(|a| a.question_id == question_id) {
            Some(slot) => {
                *slot = answer;
                true
            }
            None => {
                self.answers.push(answer);
                false
            }
        };
        Some(SessionEvent::AnswerRecorded {
            question_id: question_id.to_owned(),
            status,
            replaced,
            at: Utc::now(),
        })
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn active_quiz(&self) -> Option<&ActiveQuiz> {
        self.active.as_ref()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn phase(&self) -> SessionPhase {
        if self.finished {
            SessionPhase::Finished
        } else if self.started {
            SessionPhase::InProgress
        } else {
            SessionPhase::NotStarted
        }
    }

    pub fn time_elapsed_secs(&self) -> u64 {
        self.time_elapsed_secs
    }

    pub fn view(&self) -> ViewMode {
        self.view
    }

    pub fn set_view(&mut self, view: ViewMode) {
        self.view = view;
    }

    pub fn total_questions(&self) -> usize {
        self.active.as_ref().map_or(0, |a| a.quiz.questions.len())
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.active.as_ref()?.quiz.questions.get(self.current_index)
    }

    pub fn current_answer(&self) -> Option<&UserAnswer> {
        let question = self.current_question()?;
        self.answer_for(&question.id)
    }

    /// Every option id recorded for the current question (empty when none).
    pub fn current_selected_options(&self) -> Vec<OptionId> {
        self.current_answer()
            .map_or_else(Vec::new, |a| a.value.selected_options())
    }

    pub fn answer_for(&self, question_id: &str) -> Option<&UserAnswer> {
        self.answers.iter().find(|a| a.question_id == question_id)
    }

    pub fn answer_status(&self, question_id: &str) -> Option<AnswerStatus> {
        self.answer_for(question_id).map(|a| a.status)
    }

    /// 1-based position of a question in the active quiz, 0 when absent.
    pub fn question_number(&self, question_id: &str) -> usize {
        self.active.as_ref().map_or(0, |a| {
            a.quiz
                .questions
                .iter()
                .position(|q| q.id == question_id)
                .map_or(0, |i| i + 1)
        })
    }

    pub fn is_answered(&self, question_id: &str) -> bool {
        self.answers.iter().any(|a| a.question_id == question_id)
    }

    pub fn is_skipped(&self, question_id: &str) -> bool {
        self.skipped.contains(question_id)
    }

    pub fn question_status(&self, question_id: &str) -> QuestionStatus {
        if self.is_answered(question_id) {
            QuestionStatus::Answered
        } else if self.is_skipped(question_id) {
            QuestionStatus::Skipped
        } else {
            QuestionStatus::Unanswered
        }
    }

    /// 1-based numbers of questions with no recorded answer and no skip
    /// mark, in quiz order.
    pub fn unanswered_numbers(&self) -> Vec<usize> {
        self.active.as_ref().map_or_else(Vec::new, |a| {
            a.quiz
                .questions
                .iter()
                .enumerate()
                .filter(|(_, q)| !self.is_answered(&q.id) && !self.is_skipped(&q.id))
                .map(|(i, _)| i + 1)
                .collect()
        })
    }

    /// Questions partitioned by primary subject; empty with no quiz.
    pub fn questions_by_subject(&self) -> Vec<SubjectGroup> {
        self.active
            .as_ref()
            .map_or_else(Vec::new, |a| stats::group_by_subject(&a.quiz))
    }

    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    /// Fraction of questions answered, 0.0..=1.0. Zero when no quiz is
    /// loaded rather than a division by zero.
    pub fn progress(&self) -> f64 {
        let total = self.total_questions();
        if total == 0 {
            return 0.0;
        }
        self.answers.len() as f64 / total as f64
    }

    pub fn result_statistics(&self) -> ResultStatistics {
        stats::result_statistics(&self.answers)
    }

    /// All recorded answers, in first-answer order.
    pub fn answers(&self) -> &[UserAnswer] {
        &self.answers
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> SessionEvent {
        SessionEvent::Snapshot {
            session_id: self.session_id,
            phase: self.phase(),
            quiz_title: self
                .active
                .as_ref()
                .map(|a| a.quiz.title.clone())
                .unwrap_or_default(),
            current_index: self.current_index,
            question_count: self.total_questions(),
            answered: self.answers.len(),
            skipped: self.skipped.len(),
            progress: self.progress(),
            elapsed_secs: self.time_elapsed_secs,
            view: self.view,
            at: Utc::now(),
        }
    }
}

impl Default for QuizSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Render elapsed seconds as `MM:SS`, or `HH:MM:SS` from one hour up.
pub fn format_clock(total_secs: u64) -> String {
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    if hours > 0 {
        format!("{hours:02}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes:02}:{seconds:02}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::{AnswerKey, Difficulty, KnowledgeMatrix, QuestionOption, QuestionType};

    fn question(id: &str, correct: &str, subject: Option<&str>) -> Question {
        Question {
            id: id.into(),
            question_type: QuestionType::SingleChoice,
            statement: format!("statement for {id}"),
            options: vec![
                QuestionOption {
                    id: format!("{id}-a"),
                    text: "A".into(),
                },
                QuestionOption {
                    id: format!("{id}-b"),
                    text: "B".into(),
                },
            ],
            answer_key: AnswerKey::Single {
                option_id: correct.into(),
            },
            difficulty: Difficulty::Easy,
            knowledge_matrix: subject.map(|s| KnowledgeMatrix {
                subject: s.into(),
                topic: None,
                subtopic: None,
            }),
        }
    }

    fn three_question_quiz() -> Quiz {
        Quiz {
            id: "quiz-1".into(),
            title: "Fractions".into(),
            questions: vec![
                question("q1", "q1-a", Some("Mathematics")),
                question("q2", "q2-b", Some("Mathematics")),
                question("q3", "q3-a", Some("Language")),
            ],
        }
    }

    fn session() -> QuizSession {
        QuizSession::with_quiz(three_question_quiz(), QuizSource::Activity)
    }

    #[test]
    fn load_resets_everything() {
        let mut s = session();
        s.start();
        s.select_answer("q1", Some("q1-a"));
        s.skip_current();
        s.add_time(30);
        s.go_to(2);

        s.load_exam(three_question_quiz());
        assert_eq!(s.current_index(), 0);
        assert!(s.answers().is_empty());
        assert_eq!(s.skipped_count(), 0);
        assert!(!s.is_started());
        assert_eq!(s.time_elapsed_secs(), 0);
        assert_eq!(s.active_quiz().unwrap().source, QuizSource::Exam);
    }

    #[test]
    fn reset_keeps_the_loaded_quiz() {
        let mut s = session();
        s.start();
        s.select_answer("q1", Some("q1-a"));
        s.go_to(2);

        s.reset();
        assert_eq!(s.current_index(), 0);
        assert!(s.answers().is_empty());
        assert_eq!(s.skipped_count(), 0);
        assert!(!s.is_started());
        let active = s.active_quiz().unwrap();
        assert_eq!(active.quiz.id, "quiz-1");
        assert_eq!(active.source, QuizSource::Activity);
    }

    #[test]
    fn start_is_idempotent() {
        let mut s = session();
        assert!(s.start().is_some());
        assert!(s.start().is_none());
        assert_eq!(s.phase(), SessionPhase::InProgress);
    }

    #[test]
    fn finish_requires_start() {
        let mut s = session();
        assert!(s.finish().is_none());
        s.start();
        assert!(s.finish().is_some());
        assert!(s.finish().is_none());
        assert_eq!(s.phase(), SessionPhase::Finished);
    }

    #[test]
    fn add_time_only_counts_while_in_progress() {
        let mut s = session();
        s.add_time(10);
        assert_eq!(s.time_elapsed_secs(), 0);
        s.start();
        s.add_time(10);
        s.add_time(5);
        assert_eq!(s.time_elapsed_secs(), 15);
        s.finish();
        s.add_time(10);
        assert_eq!(s.time_elapsed_secs(), 15);
    }

    #[test]
    fn navigation_clamps_at_both_ends() {
        let mut s = session();
        assert_eq!(s.previous_question(), 0);
        s.go_to(2);
        assert_eq!(s.next_question(), 2);
        assert_eq!(s.go_to(99), 2);
        assert_eq!(s.go_to(1), 1);
        assert_eq!(s.current_question().unwrap().id, "q2");
    }

    #[test]
    fn navigation_with_no_quiz_stays_at_zero() {
        let mut s = QuizSession::new();
        assert_eq!(s.go_to(5), 0);
        assert_eq!(s.next_question(), 0);
    }

    #[test]
    fn reanswering_replaces_the_prior_record() {
        let mut s = session();
        let first = s.select_answer("q1", Some("q1-b")).unwrap();
        let second = s.select_answer("q1", Some("q1-a")).unwrap();
        match (first, second) {
            (
                SessionEvent::AnswerRecorded { replaced: false, .. },
                SessionEvent::AnswerRecorded {
                    replaced: true,
                    status,
                    ..
                },
            ) => assert_eq!(status, AnswerStatus::Correct),
            other => panic!("unexpected events: {other:?}"),
        }
        assert_eq!(s.answered_count(), 1);
        let answer = s.answer_for("q1").unwrap();
        assert_eq!(
            answer.value,
            AnswerValue::Selected {
                option_id: Some("q1-a".into())
            }
        );
    }

    #[test]
    fn answering_with_no_quiz_is_dropped() {
        let mut s = QuizSession::new();
        assert!(s.select_answer("q1", Some("q1-a")).is_none());
        assert!(s.select_dissertative("q1", Some("text".into())).is_none());
        assert!(s.answers().is_empty());
    }

    #[test]
    fn answering_unknown_question_is_dropped() {
        let mut s = session();
        assert!(s.select_answer("q99", Some("q99-a")).is_none());
        assert!(s.answers().is_empty());
    }

    #[test]
    fn answered_outranks_skipped() {
        let mut s = session();
        s.skip_current();
        assert_eq!(s.question_status("q1"), QuestionStatus::Skipped);
        s.select_answer("q1", Some("q1-a"));
        assert_eq!(s.question_status("q1"), QuestionStatus::Answered);
        assert!(s.is_skipped("q1"));
        assert!(s.is_answered("q1"));
    }

    #[test]
    fn unanswered_numbers_exclude_answered_and_skipped() {
        let mut s = session();
        assert_eq!(s.unanswered_numbers(), vec![1, 2, 3]);
        s.select_answer("q2", Some("q2-b"));
        s.go_to(2);
        s.skip_current();
        assert_eq!(s.unanswered_numbers(), vec![1]);
    }

    #[test]
    fn question_number_is_one_based() {
        let s = session();
        assert_eq!(s.question_number("q1"), 1);
        assert_eq!(s.question_number("q3"), 3);
        assert_eq!(s.question_number("q99"), 0);
        assert_eq!(QuizSession::new().question_number("q1"), 0);
    }

    #[test]
    fn progress_is_answered_over_total() {
        let mut s = session();
        assert_eq!(s.progress(), 0.0);
        s.select_answer("q1", Some("q1-a"));
        s.select_answer("q2", Some("q2-a"));
        assert!((s.progress() - 2.0 / 3.0).abs() < f64::EPSILON);
        assert_eq!(QuizSession::new().progress(), 0.0);
    }

    #[test]
    fn statistics_classify_by_status() {
        let mut s = session();
        s.start();
        s.select_answer("q1", Some("q1-a")); // correct
        s.select_answer("q2", Some("q2-a")); // incorrect
        let stats = s.result_statistics();
        assert_eq!(stats.total_answered, 2);
        assert_eq!(stats.correct_answers, 1);
        assert_eq!(stats.incorrect_answers, 1);
        assert_eq!(stats.pending_answers, 0);
        assert_eq!(stats.score, 1);
    }

    #[test]
    fn empty_session_queries_are_total() {
        let s = QuizSession::new();
        assert_eq!(s.total_questions(), 0);
        assert!(s.current_question().is_none());
        assert!(s.current_answer().is_none());
        assert!(s.questions_by_subject().is_empty());
        assert!(s.unanswered_numbers().is_empty());
        assert!(s.active_quiz().is_none());
        assert_eq!(s.phase(), SessionPhase::NotStarted);
    }

    #[test]
    fn current_selected_options_follow_the_cursor() {
        let mut s = session();
        s.select_answer("q1", Some("q1-b"));
        assert_eq!(s.current_selected_options(), vec!["q1-b".to_string()]);
        s.next_question();
        assert!(s.current_selected_options().is_empty());
    }

    #[test]
    fn grouping_preserves_subject_and_question_order() {
        let s = session();
        let groups = s.questions_by_subject();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].subject, "Mathematics");
        assert_eq!(groups[0].questions.len(), 2);
        assert_eq!(groups[0].questions[0].id, "q1");
        assert_eq!(groups[1].subject, "Language");
    }

    #[test]
    fn format_clock_switches_at_one_hour() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(65), "01:05");
        assert_eq!(format_clock(3599), "59:59");
        assert_eq!(format_clock(3600), "01:00:00");
        assert_eq!(format_clock(3661), "01:01:01");
    }
}
