//! `tasklist` command-line front end.
//!
//! Every subcommand prints the response envelope as pretty JSON and exits
//! with status 1 when the envelope reports a failure.

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use tasklist_api::{ApiConfig, ApiResponse, TaskListApi};

/// Priority-ordered task lists backed by SQLite.
#[derive(Parser, Debug)]
#[command(name = "tasklist", version)]
struct Cli {
    /// SQLite database file (overrides TASKLIST_DB_PATH)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Log level: trace|debug|info|warn|error (overrides TASKLIST_LOG_LEVEL)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Absolute log directory (overrides TASKLIST_LOG_DIR)
    #[arg(long, global = true)]
    log_dir: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create an empty list
    CreateList {
        title: String,
    },
    /// Show every list with its tasks, highest priority first
    Lists,
    /// Show one list with its tasks, highest priority first
    ShowList {
        list_id: String,
    },
    /// Append a task to the top of a list
    CreateTask {
        list_id: String,
        title: String,
    },
    /// Change a task's title and/or status
    UpdateTask(UpdateTaskArgs),
    /// Move a task directly before or after another task
    MoveTask(MoveTaskArgs),
}

#[derive(Args, Debug)]
struct UpdateTaskArgs {
    id: String,
    #[arg(long)]
    title: Option<String>,
    /// PENDING or COMPLETED
    #[arg(long)]
    status: Option<String>,
}

#[derive(Args, Debug)]
struct MoveTaskArgs {
    id: String,
    /// Place the task directly above this task
    #[arg(long)]
    before: Option<String>,
    /// Place the task directly below this task
    #[arg(long)]
    after: Option<String>,
}

impl Cli {
    fn config(&self) -> ApiConfig {
        let mut config = ApiConfig::from_env();
        if let Some(db) = &self.db {
            config.db_path = db.clone();
        }
        if let Some(level) = &self.log_level {
            config.log_level = level.clone();
        }
        if let Some(dir) = &self.log_dir {
            config.log_dir = Some(dir.clone());
        }
        config
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = cli.config();
    if let Err(err) = config.init_logging() {
        eprintln!("tasklist: logging disabled: {err}");
    }

    let api = TaskListApi::from_config(&config);
    match cli.command {
        Command::CreateList { title } => print_response(&api.create_list(&title)),
        Command::Lists => print_response(&api.list_all()),
        Command::ShowList { list_id } => print_response(&api.get_list(&list_id)),
        Command::CreateTask { list_id, title } => {
            print_response(&api.create_task(&list_id, &title))
        }
        Command::UpdateTask(args) => print_response(&api.update_task(
            &args.id,
            args.title.as_deref(),
            args.status.as_deref(),
        )),
        Command::MoveTask(args) => print_response(&api.move_task(
            &args.id,
            args.before.as_deref(),
            args.after.as_deref(),
        )),
    }
}

fn print_response<T: Serialize>(response: &ApiResponse<T>) -> ExitCode {
    match serde_json::to_string_pretty(response) {
        Ok(json) => println!("{json}"),
        Err(err) => {
            eprintln!("tasklist: failed to encode response: {err}");
            return ExitCode::FAILURE;
        }
    }
    if response.ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
