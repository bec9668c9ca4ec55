//! Integration tests for the user account registry.

use sha2::{Digest, Sha256};
use std::fs;
use task_ledger::error::UserError;
use task_ledger::users::UserStore;
use tempfile::TempDir;

/// Helper to create a user store over a file inside a fresh temp directory.
fn setup_users() -> (UserStore, TempDir) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let users = UserStore::new(dir.path().join("users.txt"));
    (users, dir)
}

#[test]
fn register_then_login_round_trips() {
    let (users, _dir) = setup_users();

    users.register("alice", "hunter2").unwrap();

    assert!(users.login("alice", "hunter2").is_ok());
}

#[test]
fn stored_credentials_are_salted_and_not_plaintext() {
    let (users, _dir) = setup_users();
    users.register("alice", "hunter2").unwrap();

    let contents = fs::read_to_string(users.path()).unwrap();

    assert!(contents.starts_with("alice:"));
    assert!(contents.contains('$'));
    assert!(!contents.contains("hunter2"));
}

#[test]
fn duplicate_username_is_rejected() {
    let (users, _dir) = setup_users();
    users.register("alice", "hunter2").unwrap();

    let result = users.register("alice", "other");

    assert!(matches!(result, Err(UserError::UsernameTaken)));
}

#[test]
fn wrong_password_is_rejected() {
    let (users, _dir) = setup_users();
    users.register("alice", "hunter2").unwrap();

    let result = users.login("alice", "wrong");

    assert!(matches!(result, Err(UserError::InvalidCredentials)));
}

#[test]
fn unknown_user_reports_like_wrong_password() {
    let (users, _dir) = setup_users();
    users.register("alice", "hunter2").unwrap();

    let unknown = users.login("mallory", "hunter2");
    let wrong = users.login("alice", "wrong");

    assert!(matches!(unknown, Err(UserError::InvalidCredentials)));
    assert!(matches!(wrong, Err(UserError::InvalidCredentials)));
}

#[test]
fn legacy_unsalted_entry_still_verifies() {
    let (users, _dir) = setup_users();
    let digest = format!("{:x}", Sha256::digest(b"hunter2"));
    fs::write(users.path(), format!("alice:{digest}\n")).unwrap();

    assert!(users.login("alice", "hunter2").is_ok());
    assert!(matches!(
        users.login("alice", "wrong"),
        Err(UserError::InvalidCredentials)
    ));
}

#[test]
fn invalid_usernames_are_rejected() {
    let (users, _dir) = setup_users();

    assert!(matches!(
        users.register("", "pw"),
        Err(UserError::InvalidUsername(_))
    ));
    assert!(matches!(
        users.register("al:ice", "pw"),
        Err(UserError::InvalidUsername(_))
    ));
    assert!(matches!(
        users.register("al|ice", "pw"),
        Err(UserError::InvalidUsername(_))
    ));
    assert!(!users.path().exists());
}

#[test]
fn empty_password_is_rejected() {
    let (users, _dir) = setup_users();

    assert!(matches!(
        users.register("alice", ""),
        Err(UserError::EmptyPassword)
    ));
}

#[test]
fn missing_file_means_no_users() {
    let (users, _dir) = setup_users();

    assert!(!users.username_taken("alice"));
    assert!(matches!(
        users.login("alice", "pw"),
        Err(UserError::InvalidCredentials)
    ));
}
