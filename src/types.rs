//! Core types for the task ledger.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Field delimiter of the flat-file record format. The format has no
/// escaping mechanism, so this character is banned inside owner and title.
pub const FIELD_DELIMITER: char = '|';

/// Owner synthesized for rows decoded from the legacy 3-field format,
/// which predates per-owner records.
pub const LEGACY_OWNER: &str = "unknown";

/// Lifecycle status of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

impl TaskStatus {
    /// All valid statuses, in menu order.
    pub const ALL: [TaskStatus; 4] = [
        TaskStatus::Pending,
        TaskStatus::InProgress,
        TaskStatus::Completed,
        TaskStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Completed => "completed",
            TaskStatus::Cancelled => "cancelled",
        }
    }

    /// Parse the wire string. Case-sensitive.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(TaskStatus::Pending),
            "in_progress" => Some(TaskStatus::InProgress),
            "completed" => Some(TaskStatus::Completed),
            "cancelled" => Some(TaskStatus::Cancelled),
            _ => None,
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single task record as persisted in the backing file.
///
/// `id` and `owner` are fixed at creation; only `status` changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub owner: String,
    pub title: String,
    pub status: TaskStatus,
}

impl Task {
    /// Create a new pending task with a fresh random id.
    pub fn new(owner: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            owner: owner.into(),
            title: title.into(),
            status: TaskStatus::Pending,
        }
    }
}
