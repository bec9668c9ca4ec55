//! Flat-file task store.
//!
//! The backing file is plain-appendable for creation and fully rewritten for
//! any update or deletion; the format has no in-place update. No state is
//! cached between calls: every operation opens the file, does its work, and
//! releases it, so each call observes the latest durable contents.
//!
//! The file is a single-process resource. There is no locking discipline;
//! concurrent external writers are unsupported.

use crate::codec;
use crate::error::StoreError;
use crate::types::Task;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Durable task collection backed by one delimited text file.
#[derive(Debug, Clone)]
pub struct TaskStore {
    path: PathBuf,
}

impl TaskStore {
    /// Create a store over the given backing file. The file itself is
    /// created lazily on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load all records in file order, optionally filtered to one owner.
    ///
    /// A missing backing file reads as an empty store. Undecodable lines
    /// are logged and skipped. This never fails outright; an unreadable
    /// file degrades to an empty result with a diagnostic.
    pub fn load(&self, owner: Option<&str>) -> Vec<Task> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no task file yet, starting empty");
                return Vec::new();
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "task file unreadable, treating as empty");
                return Vec::new();
            }
        };

        let mut tasks = Vec::new();
        for (index, line) in BufReader::new(file).lines().enumerate() {
            let line_number = index + 1;
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    warn!(line = line_number, error = %e, "stopped reading task file");
                    break;
                }
            };
            if line.trim().is_empty() {
                continue;
            }
            match codec::decode(&line) {
                Ok(task) => {
                    if owner.is_none_or(|o| o == task.owner) {
                        tasks.push(task);
                    }
                }
                Err(e) => {
                    warn!(line = line_number, error = %e, "skipping malformed task line");
                }
            }
        }
        tasks
    }

    /// Durably append one record. Validates before touching the file.
    pub fn append(&self, task: &Task) -> Result<(), StoreError> {
        let line = codec::encode(task)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())?;
        file.sync_all()?;
        debug!(id = %task.id, owner = %task.owner, "appended task");
        Ok(())
    }

    /// Replace the entire backing file with the given records, in order.
    ///
    /// All records are encoded before the file is opened, so a validation
    /// failure leaves the previous contents intact. An I/O failure mid-write
    /// may leave the file partially overwritten; callers treat that as fatal
    /// for the invocation and do not retry.
    pub fn rewrite(&self, tasks: &[Task]) -> Result<(), StoreError> {
        let mut encoded = String::new();
        for task in tasks {
            encoded.push_str(&codec::encode(task)?);
        }
        let mut file = File::create(&self.path)?;
        file.write_all(encoded.as_bytes())?;
        file.sync_all()?;
        debug!(count = tasks.len(), "rewrote task file");
        Ok(())
    }
}
