//! End-to-end session walkthroughs against the public API.

use quizdeck_core::{
    format_clock, AnswerKey, AnswerStatus, Difficulty, KnowledgeMatrix, Question, QuestionOption,
    QuestionType, Quiz, QuizSession, QuizSource, SessionEvent, SessionPhase,
};

fn option(id: &str, text: &str) -> QuestionOption {
    QuestionOption {
        id: id.into(),
        text: text.into(),
    }
}

fn single_choice(id: &str, correct: &str, subject: &str) -> Question {
    Question {
        id: id.into(),
        question_type: QuestionType::SingleChoice,
        statement: format!("statement for {id}"),
        options: vec![option(&format!("{id}-a"), "A"), option(&format!("{id}-b"), "B")],
        answer_key: AnswerKey::Single {
            option_id: correct.into(),
        },
        difficulty: Difficulty::Medium,
        knowledge_matrix: Some(KnowledgeMatrix {
            subject: subject.into(),
            topic: None,
            subtopic: None,
        }),
    }
}

fn multi_choice(id: &str, correct: &[&str], subject: &str) -> Question {
    Question {
        id: id.into(),
        question_type: QuestionType::MultipleChoice,
        statement: format!("statement for {id}"),
        options: vec![
            option(&format!("{id}-a"), "A"),
            option(&format!("{id}-b"), "B"),
            option(&format!("{id}-c"), "C"),
        ],
        answer_key: AnswerKey::Multiple {
            option_ids: correct.iter().map(|s| s.to_string()).collect(),
        },
        difficulty: Difficulty::Hard,
        knowledge_matrix: Some(KnowledgeMatrix {
            subject: subject.into(),
            topic: None,
            subtopic: None,
        }),
    }
}

fn dissertative(id: &str, subject: &str) -> Question {
    Question {
        id: id.into(),
        question_type: QuestionType::Dissertative,
        statement: format!("statement for {id}"),
        options: vec![],
        answer_key: AnswerKey::Ungraded,
        difficulty: Difficulty::Easy,
        knowledge_matrix: Some(KnowledgeMatrix {
            subject: subject.into(),
            topic: None,
            subtopic: None,
        }),
    }
}

fn mixed_quiz() -> Quiz {
    Quiz {
        id: "quiz-mixed".into(),
        title: "Mixed Assessment".into(),
        questions: vec![
            single_choice("q1", "q1-a", "Mathematics"),
            multi_choice("q2", &["q2-a", "q2-c"], "Mathematics"),
            dissertative("q3", "History"),
            single_choice("q4", "q4-b", "History"),
        ],
    }
}

#[test]
fn full_attempt_walkthrough() {
    let mut session = QuizSession::with_quiz(mixed_quiz(), QuizSource::Exam);
    assert!(mixed_quiz().validate().is_ok());
    assert_eq!(session.phase(), SessionPhase::NotStarted);

    session.start();
    session.add_time(12);

    // q1 correct.
    assert_eq!(session.current_question().unwrap().id, "q1");
    session.select_answer("q1", Some("q1-a"));
    session.next_question();

    // q2 wrong set: one member missing.
    session.select_multiple("q2", vec!["q2-a".into()]);
    session.next_question();

    // q3 free text: pending review.
    session.select_dissertative("q3", Some("the treaty ended the war".into()));
    session.next_question();

    // q4 skipped.
    session.skip_current();
    session.add_time(53);

    assert_eq!(session.answered_count(), 3);
    assert_eq!(session.skipped_count(), 1);
    assert_eq!(session.unanswered_numbers(), Vec::<usize>::new());
    assert!((session.progress() - 0.75).abs() < f64::EPSILON);

    let event = session.finish().expect("finish should take effect");
    match event {
        SessionEvent::SessionFinished {
            stats,
            elapsed_secs,
            ..
        } => {
            assert_eq!(stats.total_answered, 3);
            assert_eq!(stats.correct_answers, 1);
            assert_eq!(stats.incorrect_answers, 1);
            assert_eq!(stats.pending_answers, 1);
            assert_eq!(stats.score, 1);
            assert_eq!(elapsed_secs, 65);
            assert_eq!(format_clock(elapsed_secs), "01:05");
        }
        other => panic!("expected SessionFinished, got {other:?}"),
    }
    assert_eq!(session.phase(), SessionPhase::Finished);
}

#[test]
fn two_question_scoring_scenario() {
    let quiz = Quiz {
        id: "quiz-2".into(),
        title: "Short".into(),
        questions: vec![
            single_choice("q1", "q1-a", "Mathematics"),
            single_choice("q2", "q2-b", "Mathematics"),
        ],
    };
    let mut session = QuizSession::with_quiz(quiz, QuizSource::Activity);
    session.start();
    session.select_answer("q1", Some("q1-a"));
    session.select_answer("q2", Some("q2-a"));

    let stats = session.result_statistics();
    assert_eq!(stats.total_answered, 2);
    assert_eq!(stats.correct_answers, 1);
    assert_eq!(stats.incorrect_answers, 1);
    assert_eq!(stats.pending_answers, 0);
    assert_eq!(stats.score, 1);
}

#[test]
fn answer_status_tracks_regrading() {
    let mut session = QuizSession::with_quiz(mixed_quiz(), QuizSource::Lesson);
    session.select_multiple("q2", vec!["q2-a".into(), "q2-c".into()]);
    assert_eq!(session.answer_status("q2"), Some(AnswerStatus::Correct));
    session.select_multiple("q2", vec!["q2-a".into(), "q2-b".into(), "q2-c".into()]);
    assert_eq!(session.answer_status("q2"), Some(AnswerStatus::Incorrect));
    assert_eq!(session.answered_count(), 1);
}

#[test]
fn reload_round_trip_restores_a_fresh_attempt() {
    let mut session = QuizSession::new();
    session.load_exam(mixed_quiz());
    session.start();
    session.select_answer("q1", Some("q1-b"));
    session.add_time(30);

    session.reset();
    assert_eq!(session.current_index(), 0);
    assert!(session.answers().is_empty());
    assert_eq!(session.time_elapsed_secs(), 0);
    assert!(!session.is_started());
    let active = session.active_quiz().expect("quiz survives reset");
    assert_eq!(active.quiz.id, "quiz-mixed");
    assert_eq!(active.source, QuizSource::Exam);
}

#[test]
fn snapshot_serializes_for_presentation_layers() {
    let mut session = QuizSession::with_quiz(mixed_quiz(), QuizSource::Exam);
    session.start();
    session.select_answer("q1", Some("q1-a"));

    let json = serde_json::to_value(session.snapshot()).unwrap();
    assert_eq!(json["type"], "Snapshot");
    assert_eq!(json["question_count"], 4);
    assert_eq!(json["answered"], 1);
}
