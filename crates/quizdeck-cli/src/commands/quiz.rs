use std::path::PathBuf;

use clap::Subcommand;
use quizdeck_core::stats::{difficulty_breakdown, group_by_subject};
use quizdeck_core::{DifficultyBreakdown, Quiz};
use serde::Serialize;

#[derive(Subcommand)]
pub enum QuizAction {
    /// Validate a quiz JSON file
    Validate {
        /// Path to the quiz file
        file: PathBuf,
    },
    /// Show quiz structure and breakdowns
    Inspect {
        /// Path to the quiz file
        file: PathBuf,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Serialize)]
struct SubjectCount {
    subject: String,
    questions: usize,
}

#[derive(Serialize)]
struct InspectReport {
    id: String,
    title: String,
    question_count: usize,
    subjects: Vec<SubjectCount>,
    difficulty: DifficultyBreakdown,
}

pub fn run(action: QuizAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        QuizAction::Validate { file } => {
            let quiz = Quiz::load(&file)?;
            quiz.validate()?;
            println!("ok: {} ({} questions)", quiz.title, quiz.question_count());
        }
        QuizAction::Inspect { file, json } => {
            let quiz = Quiz::load(&file)?;
            let report = InspectReport {
                id: quiz.id.clone(),
                title: quiz.title.clone(),
                question_count: quiz.question_count(),
                subjects: group_by_subject(&quiz)
                    .into_iter()
                    .map(|g| SubjectCount {
                        subject: g.subject,
                        questions: g.questions.len(),
                    })
                    .collect(),
                difficulty: difficulty_breakdown(&quiz),
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{} ({})", report.title, report.id);
                println!("questions: {}", report.question_count);
                for group in &report.subjects {
                    println!("  {}: {}", group.subject, group.questions);
                }
                println!(
                    "difficulty: {} easy / {} medium / {} hard",
                    report.difficulty.easy, report.difficulty.medium, report.difficulty.hard
                );
            }
        }
    }
    Ok(())
}
