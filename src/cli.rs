//! CLI command definitions for task-ledger.
//!
//! This module defines the CLI structure using clap's derive macros.
//! The main entry point is the `Cli` struct which contains subcommands.

use crate::format::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Flat-file personal task manager
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to the task file (overrides config)
    #[arg(long, global = true)]
    pub tasks_file: Option<PathBuf>,

    /// Path to the user credential file (overrides config)
    #[arg(long, global = true)]
    pub users_file: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Logging output: 0/off, 1/stdout, 2/stderr (default), or filename
    #[arg(short, long, default_value = "2", global = true)]
    pub log: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start an interactive session (default if no subcommand given)
    Session,

    /// Add a new pending task
    Add {
        /// Owner of the task
        #[arg(short, long)]
        user: String,

        /// Task title
        title: String,
    },

    /// List tasks
    List {
        /// Limit to one user's tasks
        #[arg(short, long)]
        user: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// List tasks with a given status
    Status {
        /// Status to filter by (pending, in_progress, completed, cancelled)
        status: String,

        /// Limit to one user's tasks
        #[arg(short, long)]
        user: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Show task counts by status and the most recent tasks
    Summary {
        /// Limit to one user's tasks
        #[arg(short, long)]
        user: Option<String>,
    },

    /// Mark a task as completed
    Complete {
        /// Task id
        id: String,

        /// Owner of the task
        #[arg(short, long)]
        user: String,
    },

    /// Delete a task
    Delete {
        /// Task id
        id: String,

        /// Owner of the task
        #[arg(short, long)]
        user: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}
