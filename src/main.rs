//! task-ledger
//!
//! A flat-file personal task manager: users register and log in, then
//! create, list, complete, and delete tasks kept in a delimited text file.

use anyhow::Result;
use clap::Parser;
use std::fs::OpenOptions;
use task_ledger::cli::{Cli, Command};
use task_ledger::config::Config;
use task_ledger::error::{DeleteOutcome, OpError};
use task_ledger::format::{self, OutputFormat};
use task_ledger::menu;
use task_ledger::ops::TaskOps;
use task_ledger::store::TaskStore;
use task_ledger::types::Task;
use task_ledger::users::UserStore;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on --log option
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    match cli.log.as_str() {
        "0" | "off" => {
            // No logging
        }
        "1" | "stdout" => {
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(std::io::stdout)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        "2" | "stderr" => {
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(std::io::stderr)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        filename => {
            // Log to file (append mode)
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(filename)?;
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(file)
                .with_ansi(false)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
    }

    let mut config = Config::load(cli.config.as_deref())?;

    // Override paths from CLI arguments
    if let Some(path) = &cli.tasks_file {
        config.tasks_file = path.clone();
    }
    if let Some(path) = &cli.users_file {
        config.users_file = path.clone();
    }

    let ops = TaskOps::new(TaskStore::new(&config.tasks_file));
    let users = UserStore::new(&config.users_file);

    match cli.command {
        Some(Command::Add { user, title }) => {
            let task = ops.add_task(&user, &title)?;
            println!("Task added successfully!");
            println!("   ID: {}", task.id);
        }
        Some(Command::List { user, format }) => {
            let tasks = ops.list(user.as_deref());
            print_tasks(&tasks, "Tasks", format)?;
        }
        Some(Command::Status {
            status,
            user,
            format,
        }) => {
            let tasks = ops.get_by_status(&status, user.as_deref())?;
            let label = format!("{status} Tasks");
            print_tasks(&tasks, &label, format)?;
        }
        Some(Command::Summary { user }) => {
            print!("{}", format::format_summary(&ops.list(user.as_deref())));
        }
        Some(Command::Complete { id, user }) => {
            ops.complete_task(&id, &user)?;
            println!("Task marked as completed successfully!");
        }
        Some(Command::Delete { id, user, yes }) => {
            let confirmed = if yes {
                true
            } else {
                let task = ops
                    .get_by_id(&id, Some(&user))
                    .ok_or(OpError::NotFoundOrForbidden)?;
                menu::confirm(&format!(
                    "Are you sure you want to delete '{}'? (y/n): ",
                    task.title
                ))?
            };
            match ops.delete_task(&id, &user, confirmed)? {
                DeleteOutcome::Deleted => println!("Task deleted successfully!"),
                DeleteOutcome::Cancelled => println!("Deletion cancelled."),
            }
        }
        Some(Command::Session) | None => menu::run_session(&ops, &users)?,
    }

    Ok(())
}

fn print_tasks(tasks: &[Task], label: &str, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print!("{}", format::format_tasks(tasks, label)),
        OutputFormat::Json => println!("{}", format::format_tasks_json(tasks)?),
    }
    Ok(())
}
