//! Command-line interface entry point for `degreeplanner`

mod args;
mod commands;

use args::{Cli, Command};
use clap::Parser;
use degree_planner::config::Config;
use degree_planner::logging;
use degree_planner::PlannerError;
use std::path::PathBuf;
use tracing::{debug, info};

fn main() {
    let args = Cli::parse();

    // Load configuration once at startup and apply CLI overrides to it
    let mut config = Config::load();
    let defaults = Config::from_defaults();
    config.apply_overrides(&args.to_config_overrides());

    let level = args.effective_log_level(&config.logging.level);
    let verbose = args.verbose || config.logging.verbose;

    // CLI flag wins, otherwise config logging.file if set
    let log_file = args.log_file.clone().or_else(|| {
        (!config.logging.file.is_empty()).then(|| PathBuf::from(&config.logging.file))
    });

    match logging::init(&level, log_file.as_deref()) {
        Ok(()) => {
            if let Some(path) = &log_file {
                if verbose {
                    eprintln!("✓ File logging initialized at: {}", path.display());
                } else {
                    info!("File logging initialized at: {}", path.display());
                }
            }
        }
        Err(e) => eprintln!("✗ Failed to initialize file logging: {e}"),
    }
    debug!("degreeplanner {}", degree_planner::get_version());

    let result = match args.command {
        Command::Config { subcommand } => {
            commands::config::run(subcommand, &mut config, &defaults);
            Ok(())
        }
        Command::Project {
            student,
            career,
            plan,
            max_credits,
            max_courses,
            start,
            retake,
            report,
            json,
        } => {
            let options = commands::project::ProjectOptions {
                student,
                career,
                plan,
                max_credits,
                max_courses,
                start,
                retake,
                report,
                json,
            };
            commands::project::run(&options, &config, verbose)
        }
        Command::Pending { student, career } => {
            commands::pending::run(&student, &career, &config, verbose)
        }
        Command::History { subcommand } => commands::history::run(subcommand, &config),
        Command::Course { code, career } => commands::course::run(&code, &career, &config),
    };

    if let Err(err) = result {
        eprintln!("✗ {err}");
        std::process::exit(exit_code(&err));
    }
}

/// 2 for problems with the user's input, 1 for everything else
const fn exit_code(err: &PlannerError) -> i32 {
    if err.is_client_error() {
        2
    } else {
        1
    }
}
