//! History command handler

use super::history_store;
use crate::args::HistorySubcommand;
use degree_planner::config::Config;
use degree_planner::core::error::Result;
use degree_planner::core::models::AcademicHistory;
use degree_planner::core::progress::ProgressRecord;
use degree_planner::core::sources::HistoryStore;

/// Dispatch history subcommands against the configured store
///
/// # Errors
/// Propagates store errors and invalid progress records
pub fn run(subcommand: HistorySubcommand, config: &Config) -> Result<()> {
    let store = history_store(config);

    match subcommand {
        HistorySubcommand::Show { student } => {
            let history = store.get_history(&student)?;
            print_history(&student, &history);
        }
        HistorySubcommand::Set {
            student,
            approved,
            failed,
        } => {
            let history = AcademicHistory::from_lists(approved, failed);
            store.set_history(&student, history.clone())?;
            println!("✓ History of {student} saved");
            print_history(&student, &history);
        }
        HistorySubcommand::Record {
            student,
            course,
            status,
            grade,
            year,
            period,
        } => {
            let record = ProgressRecord {
                course_code: course,
                status: status.into(),
                grade,
                year,
                period,
            };
            let history = store.record_progress(&student, &record)?;
            println!(
                "✓ Recorded {} for {student} in {period}-{year}",
                record.course_code
            );
            print_history(&student, &history);
        }
    }
    Ok(())
}

fn join_or_none<'a>(codes: impl Iterator<Item = &'a String>) -> String {
    let joined: Vec<&str> = codes.map(String::as_str).collect();
    if joined.is_empty() {
        "(none)".to_string()
    } else {
        joined.join(", ")
    }
}

fn print_history(student: &str, history: &AcademicHistory) {
    println!("History of {student}");
    println!("  Approved: {}", join_or_none(history.approved.iter()));
    println!("  Failed:   {}", join_or_none(history.failed.iter()));
}
