//! taskman CLI - personal task list with dependency-aware scheduling.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use taskman_core::{format_due_date, parse_dependency_list, parse_priority, Task};
use taskman_registry::{RegistryError, TaskRegistry};
use taskman_storage::JsonStorage;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "taskman")]
#[command(about = "Personal task list with dependency-aware scheduling", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path of the JSON task store
    #[arg(short, long, global = true, env = "TASKMAN_STORE", default_value = "tasks.json")]
    store: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a new task
    Add {
        /// Task name
        name: String,
        /// Priority (integer, lower number = more important)
        #[arg(allow_hyphen_values = true)]
        priority: String,
        /// Due date (YYYY-MM-DD)
        due_date: String,
        /// Comma-separated names of tasks this one depends on
        #[arg(long, short = 'd', default_value = "")]
        depends_on: String,
    },
    /// List pending tasks by priority
    List,
    /// Mark a task as completed
    Complete {
        /// Task name (case-insensitive)
        name: String,
    },
    /// Show the next executable task
    Next,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    init_logging();

    let cli = Cli::parse();
    debug!("Using task store {}", cli.store.display());

    let storage = JsonStorage::new(&cli.store);
    let mut registry = TaskRegistry::open(storage)
        .await
        .with_context(|| format!("failed to open task store {}", cli.store.display()))?;

    let outcome = match cli.command {
        Commands::Add { name, priority, due_date, depends_on } => {
            match parse_priority(&priority) {
                Ok(priority) => registry
                    .add(name, priority, &due_date, parse_dependency_list(&depends_on))
                    .await
                    .map(|task| println!("Added task: {}", task)),
                Err(e) => Err(e.into()),
            }
        }
        Commands::List => {
            if registry.is_empty() {
                println!("No tasks recorded.");
            } else {
                let pending = registry.list_pending();
                if pending.is_empty() {
                    println!("No pending tasks.");
                } else {
                    println!("Pending tasks ({})", pending.len());
                    for task in pending {
                        println!("  {}", task);
                    }
                }
            }
            Ok(())
        }
        Commands::Complete { name } => registry
            .complete(&name)
            .await
            .map(|task| println!("Completed task: {}", task.name())),
        Commands::Next => {
            match registry.next_executable() {
                Some(task) => println!("{}", render_next(task)),
                None => println!("No executable tasks available."),
            }
            Ok(())
        }
    };

    match outcome {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(RegistryError::Storage(e)) => {
            Err(e).with_context(|| format!("failed to write task store {}", cli.store.display()))
        }
        Err(e) => {
            eprintln!("Error: {}", render_error(&e));
            Ok(ExitCode::FAILURE)
        }
    }
}

fn render_next(task: &Task) -> String {
    format!(
        "Next executable task: {} (priority {}, due {})",
        task.name(),
        task.priority(),
        format_due_date(task.due_date())
    )
}

fn render_error(error: &RegistryError) -> String {
    match error {
        // Date errors already name the offending component.
        RegistryError::Validation(e) => e.to_string(),
        RegistryError::NotFound(name) => format!("task not found: {}", name),
        RegistryError::Blocked { name, unsatisfied } => format!(
            "cannot complete '{}' until these dependencies are completed: {}",
            name,
            unsatisfied.join(", ")
        ),
        RegistryError::Storage(e) => e.to_string(),
    }
}
