#![forbid(unsafe_code)]

//! `task-tracker`: command-line front-end for the JSON task list.
//!
//! ```bash
//! task-tracker add <title> [description]
//! task-tracker update <id> <title> [description]
//! task-tracker delete <id>
//! task-tracker mark <id> <not_done|in_progress|done>
//! task-tracker list [all|done|not_done|in_progress]
//! ```
//!
//! Data lives in `./tasks.json` unless `--db` points elsewhere.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{CommandFactory, Parser};

use task_tracker::cli::Cli;
use task_tracker::cmd::dispatch;
use task_tracker::db::{JsonFileStore, DEFAULT_DB_FILE};
use task_tracker::{init_tracing, TaskService};

fn main() -> ExitCode {
    init_tracing("warn");

    // Usage mistakes print clap's message and still exit cleanly.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
    };

    let Some(command) = cli.command else {
        let _ = Cli::command().print_help();
        return ExitCode::SUCCESS;
    };

    let db_path = cli.db.unwrap_or_else(|| PathBuf::from(DEFAULT_DB_FILE));
    let service = TaskService::new(JsonFileStore::new(&db_path));

    match dispatch(&service, command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.is_user_error() => {
            println!("{e}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
