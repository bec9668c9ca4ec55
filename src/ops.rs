//! Task operations: the verbs the CLI and menus call.
//!
//! Ownership is enforced here, not in the store. A record may only be
//! mutated or removed by its owner, and a failed lookup reports the same as
//! a permission mismatch.

use crate::error::{DeleteOutcome, OpError};
use crate::store::TaskStore;
use crate::types::{Task, TaskStatus};
use tracing::{debug, info};

/// High-level task verbs over a [`TaskStore`].
#[derive(Debug, Clone)]
pub struct TaskOps {
    store: TaskStore,
}

impl TaskOps {
    pub fn new(store: TaskStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    /// All tasks, scoped to `owner` when given, in file order.
    pub fn list(&self, owner: Option<&str>) -> Vec<Task> {
        self.store.load(owner)
    }

    /// Create a new pending task owned by `owner`.
    ///
    /// Uniqueness of the id rests on the entropy of a random UUID; it is
    /// not checked against existing records.
    pub fn add_task(&self, owner: &str, title: &str) -> Result<Task, OpError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(OpError::EmptyTitle);
        }
        let task = Task::new(owner, title);
        self.store.append(&task)?;
        info!(id = %task.id, owner, "task added");
        Ok(task)
    }

    /// Find a task by id, scoped to `owner` when given. First match wins;
    /// ids are assumed globally unique.
    pub fn get_by_id(&self, id: &str, owner: Option<&str>) -> Option<Task> {
        if id.trim().is_empty() {
            return None;
        }
        self.store.load(owner).into_iter().find(|t| t.id == id)
    }

    /// All tasks whose status exactly matches `status` (case-sensitive),
    /// scoped to `owner` when given.
    pub fn get_by_status(&self, status: &str, owner: Option<&str>) -> Result<Vec<Task>, OpError> {
        if status.trim().is_empty() {
            return Err(OpError::EmptyStatus);
        }
        Ok(self
            .store
            .load(owner)
            .into_iter()
            .filter(|t| t.status.as_str() == status)
            .collect())
    }

    /// Change the status of a task owned by `owner`.
    ///
    /// Membership in the valid status set is the only transition rule here;
    /// any status may move to any other. `complete_task` layers its own
    /// already-completed rejection on top.
    pub fn update_status(&self, id: &str, owner: &str, new_status: &str) -> Result<(), OpError> {
        let status = TaskStatus::from_str(new_status)
            .ok_or_else(|| OpError::InvalidStatus(new_status.to_string()))?;

        // Ownership check against the caller-scoped view, then the mutation
        // re-scans the unfiltered set so the rewrite keeps every record.
        if !self.store.load(Some(owner)).iter().any(|t| t.id == id) {
            return Err(OpError::NotFoundOrForbidden);
        }

        let mut all = self.store.load(None);
        match all.iter_mut().find(|t| t.id == id && t.owner == owner) {
            Some(task) => task.status = status,
            None => return Err(OpError::NotFoundOrForbidden),
        }
        self.store.rewrite(&all)?;
        info!(id, owner, status = status.as_str(), "task status updated");
        Ok(())
    }

    /// Mark a task completed. Completing an already-completed task is an
    /// error, not a no-op; the backing file is left untouched.
    pub fn complete_task(&self, id: &str, owner: &str) -> Result<(), OpError> {
        let task = self
            .get_by_id(id, Some(owner))
            .ok_or(OpError::NotFoundOrForbidden)?;
        if task.status == TaskStatus::Completed {
            return Err(OpError::AlreadyCompleted);
        }
        self.update_status(id, owner, TaskStatus::Completed.as_str())
    }

    /// Delete a task owned by `owner`. `confirmed` is the collaborator's
    /// confirmation signal; declining yields [`DeleteOutcome::Cancelled`]
    /// without touching the file.
    pub fn delete_task(
        &self,
        id: &str,
        owner: &str,
        confirmed: bool,
    ) -> Result<DeleteOutcome, OpError> {
        if self.get_by_id(id, Some(owner)).is_none() {
            return Err(OpError::NotFoundOrForbidden);
        }
        if !confirmed {
            debug!(id, owner, "delete declined");
            return Ok(DeleteOutcome::Cancelled);
        }
        let mut all = self.store.load(None);
        all.retain(|t| !(t.id == id && t.owner == owner));
        self.store.rewrite(&all)?;
        info!(id, owner, "task deleted");
        Ok(DeleteOutcome::Deleted)
    }
}
