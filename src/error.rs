//! Typed errors for the store, task operations, and user accounts.

use thiserror::Error;

/// Errors from the task store itself.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Record failed validation. The backing file was not touched.
    #[error("invalid record: {0}")]
    Validation(String),

    /// The backing file could not be written. Fatal for this call; retry,
    /// if any, is a fresh user-driven invocation.
    #[error("task file I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from the task operations layer.
#[derive(Debug, Error)]
pub enum OpError {
    #[error("task title cannot be empty")]
    EmptyTitle,

    #[error("status cannot be empty")]
    EmptyStatus,

    #[error("invalid status '{0}' (expected pending, in_progress, completed or cancelled)")]
    InvalidStatus(String),

    /// Lookup failed or the record belongs to another user. The two cases
    /// are deliberately indistinguishable so task ids are not leaked across
    /// users.
    #[error("task not found or you don't have permission to modify it")]
    NotFoundOrForbidden,

    /// Completing a completed task is rejected, not absorbed as a no-op.
    #[error("task is already completed")]
    AlreadyCompleted,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Outcome of a delete request. Declining the confirmation is an expected
/// no-op, distinct from any failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    Cancelled,
}

/// Errors from the user account registry.
#[derive(Debug, Error)]
pub enum UserError {
    #[error("invalid username: {0}")]
    InvalidUsername(String),

    #[error("password cannot be empty")]
    EmptyPassword,

    #[error("username already exists")]
    UsernameTaken,

    /// Unknown user and wrong password report identically.
    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("user file I/O failed: {0}")]
    Io(#[from] std::io::Error),
}
