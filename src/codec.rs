//! Line codec for the flat-file task format.
//!
//! One record per line, UTF-8: `id|owner|title|status`. A legacy 3-field
//! variant (`id|title|status`) is accepted on read only, with the owner
//! synthesized as [`LEGACY_OWNER`]. There is no escaping mechanism for the
//! delimiter, hence the hard ban on `|` inside owner and title.

use crate::error::StoreError;
use crate::types::{FIELD_DELIMITER, LEGACY_OWNER, Task, TaskStatus};
use thiserror::Error;

/// Why a single line could not be decoded. Line-level failures are skipped
/// by the store with a diagnostic, never propagated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("expected 3 or 4 fields, found {0}")]
    FieldCount(usize),

    #[error("field '{0}' is empty")]
    EmptyField(&'static str),

    #[error("unknown status '{0}'")]
    UnknownStatus(String),
}

/// Check that a record can survive the delimited format.
pub fn validate(task: &Task) -> Result<(), StoreError> {
    if task.id.trim().is_empty() {
        return Err(StoreError::Validation("task id cannot be empty".into()));
    }
    if task.owner.trim().is_empty() {
        return Err(StoreError::Validation("owner cannot be empty".into()));
    }
    if task.title.trim().is_empty() {
        return Err(StoreError::Validation("title cannot be empty".into()));
    }
    if task.owner.contains(FIELD_DELIMITER) {
        return Err(StoreError::Validation(format!(
            "owner cannot contain '{FIELD_DELIMITER}'"
        )));
    }
    if task.title.contains(FIELD_DELIMITER) {
        return Err(StoreError::Validation(format!(
            "title cannot contain '{FIELD_DELIMITER}'"
        )));
    }
    Ok(())
}

/// Encode one record as a newline-terminated delimited line.
///
/// Re-validates and refuses records that would desynchronize parsing, so a
/// bad record can never corrupt the file.
pub fn encode(task: &Task) -> Result<String, StoreError> {
    validate(task)?;
    Ok(format!(
        "{}{d}{}{d}{}{d}{}\n",
        task.id,
        task.owner,
        task.title,
        task.status.as_str(),
        d = FIELD_DELIMITER,
    ))
}

/// Decode one non-blank line. Callers skip blank lines before calling.
pub fn decode(line: &str) -> Result<Task, DecodeError> {
    let parts: Vec<&str> = line.trim().split(FIELD_DELIMITER).collect();
    let (id, owner, title, status) = match parts.as_slice() {
        // Legacy format predating per-owner records.
        [id, title, status] => (*id, LEGACY_OWNER, *title, *status),
        [id, owner, title, status] => (*id, *owner, *title, *status),
        _ => return Err(DecodeError::FieldCount(parts.len())),
    };

    if id.trim().is_empty() {
        return Err(DecodeError::EmptyField("id"));
    }
    if owner.trim().is_empty() {
        return Err(DecodeError::EmptyField("owner"));
    }
    if title.trim().is_empty() {
        return Err(DecodeError::EmptyField("title"));
    }
    let status = TaskStatus::from_str(status.trim())
        .ok_or_else(|| DecodeError::UnknownStatus(status.trim().to_string()))?;

    Ok(Task {
        id: id.to_string(),
        owner: owner.to_string(),
        title: title.to_string(),
        status,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;

    fn record(id: &str, owner: &str, title: &str, status: TaskStatus) -> Task {
        Task {
            id: id.to_string(),
            owner: owner.to_string(),
            title: title.to_string(),
            status,
        }
    }

    #[test]
    fn encode_decode_round_trip() {
        let task = record("id1", "alice", "buy milk", TaskStatus::Pending);
        let line = encode(&task).unwrap();
        assert_eq!(line, "id1|alice|buy milk|pending\n");
        assert_eq!(decode(&line).unwrap(), task);
    }

    #[test]
    fn decode_legacy_three_field_line() {
        let task = decode("id1|title|pending").unwrap();
        assert_eq!(task.id, "id1");
        assert_eq!(task.owner, "unknown");
        assert_eq!(task.title, "title");
        assert_eq!(task.status, TaskStatus::Pending);
    }

    #[test]
    fn decode_rejects_bad_field_counts() {
        assert_eq!(decode("just-two|fields"), Err(DecodeError::FieldCount(2)));
        assert_eq!(
            decode("a|b|c|d|e"),
            Err(DecodeError::FieldCount(5))
        );
        assert_eq!(decode("garbage"), Err(DecodeError::FieldCount(1)));
    }

    #[test]
    fn decode_rejects_empty_fields() {
        assert_eq!(
            decode("id1||title|pending"),
            Err(DecodeError::EmptyField("owner"))
        );
        assert_eq!(
            decode("id1|alice|   |pending"),
            Err(DecodeError::EmptyField("title"))
        );
        // 3-field line with an empty title parses as legacy, then fails.
        assert_eq!(decode("id1||pending"), Err(DecodeError::EmptyField("title")));
    }

    #[test]
    fn decode_rejects_unknown_status() {
        assert_eq!(
            decode("id1|alice|title|done"),
            Err(DecodeError::UnknownStatus("done".to_string()))
        );
    }

    #[test]
    fn encode_refuses_delimiter_in_title() {
        let task = record("id1", "alice", "buy|milk", TaskStatus::Pending);
        assert!(matches!(encode(&task), Err(StoreError::Validation(_))));
    }

    #[test]
    fn encode_refuses_delimiter_in_owner() {
        let task = record("id1", "ali|ce", "buy milk", TaskStatus::Pending);
        assert!(matches!(encode(&task), Err(StoreError::Validation(_))));
    }

    #[test]
    fn encode_refuses_empty_fields() {
        let task = record("", "alice", "buy milk", TaskStatus::Pending);
        assert!(matches!(encode(&task), Err(StoreError::Validation(_))));
        let task = record("id1", "alice", "  ", TaskStatus::Pending);
        assert!(matches!(encode(&task), Err(StoreError::Validation(_))));
    }
}
