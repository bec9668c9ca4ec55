//! Task Ledger Library
//!
//! This module exports the record codec, task store, and task operations
//! for testing and embedding; the binary layers the CLI and menus on top.

pub mod cli;
pub mod codec;
pub mod config;
pub mod error;
pub mod format;
pub mod menu;
pub mod ops;
pub mod store;
pub mod types;
pub mod users;
