//! Output formatting for task records, as text or JSON.

use crate::types::{Task, TaskStatus};
use anyhow::Result;
use clap::ValueEnum;
use std::collections::HashMap;
use std::fmt::{self, Write};

/// Output format for list commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => f.write_str("text"),
            OutputFormat::Json => f.write_str("json"),
        }
    }
}

/// Status glyph used by the text views.
fn status_icon(status: TaskStatus) -> char {
    if status == TaskStatus::Completed {
        '✓'
    } else {
        '○'
    }
}

/// Render one task with its id and status on indented lines. `index` is a
/// 1-based list position, omitted for standalone display.
pub fn format_task(task: &Task, index: Option<usize>) -> String {
    let number = index.map(|i| format!("{i}. ")).unwrap_or_default();
    format!(
        "{number}{} {}\n   ID: {}\n   Status: {}\n",
        status_icon(task.status),
        task.title,
        task.id,
        task.status,
    )
}

/// Render a task list under a header, numbered from 1.
pub fn format_tasks(tasks: &[Task], label: &str) -> String {
    if tasks.is_empty() {
        return format!("No {} found.\n", label.to_lowercase());
    }
    let mut out = format!("=== {} ({}) ===\n", label, tasks.len());
    for (i, task) in tasks.iter().enumerate() {
        out.push_str(&format_task(task, Some(i + 1)));
        out.push('\n');
    }
    out
}

/// Render counts by status plus the five most recent records.
pub fn format_summary(tasks: &[Task]) -> String {
    if tasks.is_empty() {
        return "No tasks found.\n".to_string();
    }

    let mut by_status: HashMap<TaskStatus, usize> = HashMap::new();
    for task in tasks {
        *by_status.entry(task.status).or_default() += 1;
    }

    let mut out = String::new();
    let _ = writeln!(out, "=== Task Summary ===");
    let _ = writeln!(out, "Total Tasks: {}", tasks.len());
    for status in TaskStatus::ALL {
        if let Some(count) = by_status.get(&status) {
            let _ = writeln!(out, "{}: {}", status, count);
        }
    }

    let recent = &tasks[tasks.len().saturating_sub(5)..];
    let _ = writeln!(out, "\nRecent Tasks:");
    for task in recent {
        let _ = writeln!(out, "{} {}", status_icon(task.status), task.title);
    }
    out
}

/// Pretty-printed JSON for the record slice.
pub fn format_tasks_json(tasks: &[Task]) -> Result<String> {
    Ok(serde_json::to_string_pretty(tasks)?)
}
