//! Command implementations for the CLI interface.
//!
//! Each subcommand runs one task operation and prints a single confirmation
//! line, or the listing for `list`.

use clap::Subcommand;
use clap_complete::{generate, Shell};

use crate::db::TaskStore;
use crate::error::Result;
use crate::fields::{Status, StatusFilter};
use crate::ops::TaskService;
use crate::task::{Task, TaskPatch};

#[derive(Subcommand)]
pub enum Commands {
    /// Add a new task.
    Add {
        /// Short title for the task.
        title: String,
        /// Optional longer description.
        description: Option<String>,
    },

    /// Replace the title (and optionally the description) of a task.
    Update {
        id: u64,
        title: String,
        description: Option<String>,
    },

    /// Delete a task by ID.
    Delete { id: u64 },

    /// Set the status of a task: not_done | in_progress | done.
    Mark {
        id: u64,
        #[arg(value_enum)]
        status: Status,
    },

    /// List tasks, optionally filtered by status.
    List {
        /// all | done | not_done | in_progress.
        #[arg(value_enum, default_value_t = StatusFilter::All)]
        filter: StatusFilter,
    },

    /// Generate shell completion scripts.
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Run one subcommand against `service`.
pub fn dispatch<S: TaskStore>(service: &TaskService<S>, command: Commands) -> Result<()> {
    match command {
        Commands::Add { title, description } => {
            cmd_add(service, &title, description.as_deref().unwrap_or(""))
        }
        Commands::Update { id, title, description } => {
            cmd_update(service, id, title, description)
        }
        Commands::Delete { id } => cmd_delete(service, id),
        Commands::Mark { id, status } => cmd_mark(service, id, status),
        Commands::List { filter } => cmd_list(service, filter),
        Commands::Completions { shell } => {
            cmd_completions(shell);
            Ok(())
        }
    }
}

pub fn cmd_add<S: TaskStore>(service: &TaskService<S>, title: &str, description: &str) -> Result<()> {
    let task = service.add(title, description)?;
    println!("Task added: {}", task.title);
    Ok(())
}

pub fn cmd_update<S: TaskStore>(
    service: &TaskService<S>,
    id: u64,
    title: String,
    description: Option<String>,
) -> Result<()> {
    let patch = TaskPatch {
        title: Some(title),
        description,
        status: None,
    };
    service.update(id, patch)?;
    println!("Task {id} updated");
    Ok(())
}

pub fn cmd_delete<S: TaskStore>(service: &TaskService<S>, id: u64) -> Result<()> {
    service.delete(id)?;
    println!("Task {id} deleted");
    Ok(())
}

pub fn cmd_mark<S: TaskStore>(service: &TaskService<S>, id: u64, status: Status) -> Result<()> {
    service.set_status(id, status)?;
    println!("Task {id} marked as {status}");
    Ok(())
}

pub fn cmd_list<S: TaskStore>(service: &TaskService<S>, filter: StatusFilter) -> Result<()> {
    let tasks = service.list(filter)?;
    print!("{}", render_listing(&tasks));
    Ok(())
}

/// Generate a completion script for `shell` on stdout.
pub fn cmd_completions(shell: Shell) {
    use clap::CommandFactory;
    use crate::cli::Cli;

    let mut app = Cli::command();
    let app_name = app.get_name().to_string();
    generate(shell, &mut app, app_name, &mut std::io::stdout());
}

/// One `[id] title - status` line per task, description indented below.
pub fn render_listing(tasks: &[Task]) -> String {
    if tasks.is_empty() {
        return "No tasks found\n".to_string();
    }
    let mut out = String::new();
    for t in tasks {
        out.push_str(&format!("[{}] {} - {}\n", t.id, t.title, t.status));
        if !t.description.is_empty() {
            out.push_str(&format!("    {}\n", t.description));
        }
    }
    out
}
