//! Interactive terminal play-through of a quiz file.
//!
//! The engine is timer-agnostic; this command owns the clock and feeds
//! wall-clock deltas into the session before handling each input line.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Instant;

use clap::{Args, ValueEnum};
use quizdeck_core::{
    format_clock, AnswerStatus, Question, QuestionType, Quiz, QuizSession, QuizSource,
    SessionEvent,
};

use crate::config::Config;

#[derive(Args)]
pub struct PlayArgs {
    /// Path to the quiz file
    pub file: PathBuf,
    /// Where the quiz came from
    #[arg(long, value_enum, default_value = "activity")]
    pub source: SourceArg,
    /// Print the final report as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum SourceArg {
    Exam,
    Activity,
    Lesson,
}

impl From<SourceArg> for QuizSource {
    fn from(value: SourceArg) -> Self {
        match value {
            SourceArg::Exam => QuizSource::Exam,
            SourceArg::Activity => QuizSource::Activity,
            SourceArg::Lesson => QuizSource::Lesson,
        }
    }
}

pub fn run(args: PlayArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load();
    let quiz = Quiz::load(&args.file)?;
    quiz.validate()?;

    let mut session = QuizSession::with_quiz(quiz, args.source.into());
    session.start();

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let started = Instant::now();
    let mut ticked_secs = 0u64;

    println!(
        "{} -- {} questions. Answer with option numbers (e.g. \"2\" or \"1,3\"),",
        session.active_quiz().map(|a| a.quiz.title.as_str()).unwrap_or_default(),
        session.total_questions()
    );
    println!("or type text for open questions. n/p move, s skips, f finishes, q quits.");

    loop {
        let Some(question) = session.current_question().cloned() else {
            break;
        };
        print_question(&session, &question);
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break; // EOF ends the attempt.
        };
        let line = line?;

        let elapsed = started.elapsed().as_secs();
        session.add_time(elapsed.saturating_sub(ticked_secs));
        ticked_secs = elapsed;

        match line.trim() {
            "" => {}
            "n" => {
                session.next_question();
            }
            "p" => {
                session.previous_question();
            }
            "s" => {
                session.skip_current();
                session.next_question();
            }
            "f" => break,
            "q" => return Ok(()),
            input => handle_answer(&mut session, &question, input, &config),
        }
    }

    session.finish();
    report(&session, args.json || config.output.json)
}

fn print_question(session: &QuizSession, question: &Question) {
    println!();
    println!(
        "[{}/{}] {}",
        session.current_index() + 1,
        session.total_questions(),
        question.statement
    );
    for (i, option) in question.options.iter().enumerate() {
        let marker = if session
            .current_selected_options()
            .contains(&option.id)
        {
            "*"
        } else {
            " "
        };
        println!("  {}{}. {}", marker, i + 1, option.text);
    }
}

fn handle_answer(session: &mut QuizSession, question: &Question, input: &str, config: &Config) {
    let event = match question.question_type {
        QuestionType::MultipleChoice => {
            let Some(option_ids) = parse_selection(question, input) else {
                println!("unrecognized selection: {input}");
                return;
            };
            session.select_multiple(&question.id, option_ids)
        }
        QuestionType::SingleChoice => {
            let Some(option_ids) = parse_selection(question, input) else {
                println!("unrecognized selection: {input}");
                return;
            };
            session.select_answer(&question.id, option_ids.first().map(String::as_str))
        }
        _ => session.select_dissertative(&question.id, Some(input.to_owned())),
    };

    if config.play.show_feedback {
        if let Some(SessionEvent::AnswerRecorded { status, .. }) = &event {
            match status {
                AnswerStatus::Correct => println!("correct"),
                AnswerStatus::Incorrect => println!("incorrect"),
                AnswerStatus::PendingReview => println!("recorded for review"),
            }
        }
    }
    if event.is_some() {
        session.next_question();
    }
}

/// Map 1-based option numbers ("2" or "1,3") onto option ids.
fn parse_selection(question: &Question, input: &str) -> Option<Vec<String>> {
    let mut option_ids = Vec::new();
    for part in input.split(',') {
        let number: usize = part.trim().parse().ok()?;
        let option = question.options.get(number.checked_sub(1)?)?;
        option_ids.push(option.id.clone());
    }
    if option_ids.is_empty() {
        return None;
    }
    Some(option_ids)
}

fn report(session: &QuizSession, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let stats = session.result_statistics();
    if json {
        println!("{}", serde_json::to_string_pretty(&session.snapshot())?);
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!();
    println!(
        "answered {}/{} ({} correct, {} incorrect, {} pending) in {}",
        stats.total_answered,
        session.total_questions(),
        stats.correct_answers,
        stats.incorrect_answers,
        stats.pending_answers,
        format_clock(session.time_elapsed_secs())
    );
    let unanswered = session.unanswered_numbers();
    if !unanswered.is_empty() {
        let numbers: Vec<String> = unanswered.iter().map(|n| n.to_string()).collect();
        println!("unanswered: {}", numbers.join(", "));
    }
    println!("score: {}", stats.score);
    Ok(())
}
