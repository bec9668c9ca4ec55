//! User account registry backed by a `username:stored` credential file.
//!
//! New registrations store `username:salt$hash` where the hash is
//! SHA-256 over `salt:password`. Bare unsalted SHA-256 entries written by
//! older versions of the format are still accepted on login.

use crate::error::UserError;
use crate::types::FIELD_DELIMITER;
use sha2::{Digest, Sha256};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use uuid::Uuid;

/// Separates username from stored credential on each line.
const CREDENTIAL_DELIMITER: char = ':';

/// Separates salt from digest inside the stored credential.
const SALT_DELIMITER: char = '$';

/// Credential file access. Like the task store, the file is created lazily
/// on first write and re-read on every operation.
#[derive(Debug, Clone)]
pub struct UserStore {
    path: PathBuf,
}

impl UserStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored credential for `username`, if the user exists.
    fn find_stored(&self, username: &str) -> Option<String> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "user file unreadable");
                return None;
            }
        };
        for line in contents.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let Some((stored_user, stored)) = line.split_once(CREDENTIAL_DELIMITER) else {
                warn!("skipping malformed credential line");
                continue;
            };
            if stored_user == username {
                return Some(stored.to_string());
            }
        }
        None
    }

    pub fn username_taken(&self, username: &str) -> bool {
        self.find_stored(username).is_some()
    }

    /// Register a new user and append their credentials.
    pub fn register(&self, username: &str, password: &str) -> Result<(), UserError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(UserError::InvalidUsername("username cannot be empty".into()));
        }
        if username.contains(CREDENTIAL_DELIMITER) || username.contains(FIELD_DELIMITER) {
            return Err(UserError::InvalidUsername(format!(
                "username cannot contain '{CREDENTIAL_DELIMITER}' or '{FIELD_DELIMITER}'"
            )));
        }
        if password.is_empty() {
            return Err(UserError::EmptyPassword);
        }
        if self.username_taken(username) {
            return Err(UserError::UsernameTaken);
        }

        let salt = Uuid::new_v4().simple().to_string();
        let digest = salted_digest(&salt, password);
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(
            file,
            "{username}{CREDENTIAL_DELIMITER}{salt}{SALT_DELIMITER}{digest}"
        )?;
        debug!(username, "user registered");
        Ok(())
    }

    /// Verify a username/password pair. Unknown user and wrong password are
    /// reported identically.
    pub fn login(&self, username: &str, password: &str) -> Result<(), UserError> {
        let stored = self
            .find_stored(username.trim())
            .ok_or(UserError::InvalidCredentials)?;
        let ok = match stored.split_once(SALT_DELIMITER) {
            Some((salt, digest)) => salted_digest(salt, password) == digest,
            // Unsalted legacy entry.
            None => hex_digest(password.as_bytes()) == stored,
        };
        if ok {
            debug!(username, "login succeeded");
            Ok(())
        } else {
            Err(UserError::InvalidCredentials)
        }
    }
}

fn salted_digest(salt: &str, password: &str) -> String {
    hex_digest(format!("{salt}{CREDENTIAL_DELIMITER}{password}").as_bytes())
}

fn hex_digest(input: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input);
    format!("{:x}", hasher.finalize())
}
