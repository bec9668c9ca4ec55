//! Interactive terminal session: login/register menu and per-user task menu.
//!
//! This is presentation glue over [`TaskOps`] and [`UserStore`]. Operation
//! failures are printed and the loop continues; only I/O failures on the
//! terminal itself propagate.

use crate::error::{DeleteOutcome, OpError, UserError};
use crate::format;
use crate::ops::TaskOps;
use crate::types::TaskStatus;
use crate::users::UserStore;
use anyhow::Result;
use std::io::{self, BufRead, Write};

/// Print a prompt and read one trimmed line. Returns `None` on EOF.
fn prompt_line(input: &mut impl BufRead, prompt: &str) -> Result<Option<String>> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Re-prompt until a non-empty line is read. Returns `None` on EOF.
fn prompt_nonempty(
    input: &mut impl BufRead,
    prompt: &str,
    error_message: &str,
) -> Result<Option<String>> {
    loop {
        match prompt_line(input, prompt)? {
            None => return Ok(None),
            Some(value) if value.is_empty() => println!("{error_message}"),
            Some(value) => return Ok(Some(value)),
        }
    }
}

/// Ask a yes/no question on stdin. Anything other than `y`/`yes` declines.
pub fn confirm(prompt: &str) -> Result<bool> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    confirm_with(&mut input, prompt)
}

fn confirm_with(input: &mut impl BufRead, prompt: &str) -> Result<bool> {
    match prompt_line(input, prompt)? {
        Some(answer) => Ok(matches!(answer.to_lowercase().as_str(), "y" | "yes")),
        None => Ok(false),
    }
}

/// Run the top-level session loop until the user exits or stdin closes.
pub fn run_session(ops: &TaskOps, users: &UserStore) -> Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    loop {
        println!();
        println!("=== Task Ledger ===");
        println!("1. Login");
        println!("2. Register");
        println!("3. Exit");
        let Some(choice) = prompt_line(&mut input, "Enter your choice (1-3): ")? else {
            return Ok(());
        };
        match choice.as_str() {
            "1" => {
                if let Some(username) = login_flow(&mut input, users)? {
                    task_menu(&mut input, ops, &username)?;
                }
            }
            "2" => {
                if let Some(username) = register_flow(&mut input, users)? {
                    task_menu(&mut input, ops, &username)?;
                }
            }
            "3" => {
                println!("Goodbye!");
                return Ok(());
            }
            _ => println!("Invalid choice. Please try again."),
        }
    }
}

fn login_flow(input: &mut impl BufRead, users: &UserStore) -> Result<Option<String>> {
    let Some(username) = prompt_nonempty(input, "Enter your username: ", "Username cannot be empty")?
    else {
        return Ok(None);
    };
    let Some(password) = prompt_nonempty(input, "Enter your password: ", "Password cannot be empty")?
    else {
        return Ok(None);
    };
    match users.login(&username, &password) {
        Ok(()) => {
            println!("Welcome back, {username}!");
            Ok(Some(username))
        }
        Err(UserError::InvalidCredentials) => {
            println!("Invalid username or password.");
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

fn register_flow(input: &mut impl BufRead, users: &UserStore) -> Result<Option<String>> {
    let Some(username) = prompt_nonempty(input, "Enter your username: ", "Username cannot be empty")?
    else {
        return Ok(None);
    };
    let Some(password) = prompt_nonempty(input, "Enter your password: ", "Password cannot be empty")?
    else {
        return Ok(None);
    };
    match users.register(&username, &password) {
        Ok(()) => {
            println!("Welcome, {username}! You are now logged in.");
            Ok(Some(username))
        }
        Err(e @ (UserError::UsernameTaken
        | UserError::InvalidUsername(_)
        | UserError::EmptyPassword)) => {
            println!("Registration failed: {e}.");
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

fn task_menu(input: &mut impl BufRead, ops: &TaskOps, username: &str) -> Result<()> {
    loop {
        println!();
        println!("=== Task Menu for {username} ===");
        println!("1. Add Task");
        println!("2. View All Tasks");
        println!("3. View Tasks by Status");
        println!("4. Complete Task");
        println!("5. Delete Task");
        println!("6. Log Out");
        let Some(choice) = prompt_line(input, "Enter your choice (1-6): ")? else {
            return Ok(());
        };
        match choice.as_str() {
            "1" => add_flow(input, ops, username)?,
            "2" => print!("{}", format::format_tasks(&ops.list(Some(username)), "All Tasks")),
            "3" => status_flow(input, ops, username)?,
            "4" => complete_flow(input, ops, username)?,
            "5" => delete_flow(input, ops, username)?,
            "6" => return Ok(()),
            _ => println!("Invalid choice. Please try again."),
        }
    }
}

fn add_flow(input: &mut impl BufRead, ops: &TaskOps, username: &str) -> Result<()> {
    let Some(title) = prompt_line(input, "Enter a task: ")? else {
        return Ok(());
    };
    match ops.add_task(username, &title) {
        Ok(task) => println!("Task added successfully! (ID: {})", task.id),
        Err(e) => println!("Error: {e}"),
    }
    Ok(())
}

fn status_flow(input: &mut impl BufRead, ops: &TaskOps, username: &str) -> Result<()> {
    println!();
    println!("View by status:");
    for (i, status) in TaskStatus::ALL.iter().enumerate() {
        println!("{}. {}", i + 1, status);
    }
    println!("5. Back");
    let Some(choice) = prompt_line(input, "Enter your choice (1-5): ")? else {
        return Ok(());
    };
    let status = match choice.as_str() {
        "1" => TaskStatus::Pending,
        "2" => TaskStatus::InProgress,
        "3" => TaskStatus::Completed,
        "4" => TaskStatus::Cancelled,
        "5" => return Ok(()),
        _ => {
            println!("Invalid choice.");
            return Ok(());
        }
    };
    match ops.get_by_status(status.as_str(), Some(username)) {
        Ok(tasks) => {
            let label = format!("{status} Tasks");
            print!("{}", format::format_tasks(&tasks, &label));
        }
        Err(e) => println!("Error: {e}"),
    }
    Ok(())
}

fn complete_flow(input: &mut impl BufRead, ops: &TaskOps, username: &str) -> Result<()> {
    let pending = match ops.get_by_status(TaskStatus::Pending.as_str(), Some(username)) {
        Ok(tasks) => tasks,
        Err(e) => {
            println!("Error: {e}");
            return Ok(());
        }
    };
    if pending.is_empty() {
        println!("No pending tasks to complete.");
        return Ok(());
    }
    print!("{}", format::format_tasks(&pending, "Pending Tasks"));
    let Some(id) = prompt_nonempty(input, "Enter task ID to complete: ", "No task ID provided.")?
    else {
        return Ok(());
    };
    match ops.complete_task(&id, username) {
        Ok(()) => println!("Task marked as completed successfully!"),
        Err(e) => println!("Error: {e}"),
    }
    Ok(())
}

fn delete_flow(input: &mut impl BufRead, ops: &TaskOps, username: &str) -> Result<()> {
    let tasks = ops.list(Some(username));
    if tasks.is_empty() {
        println!("No tasks to delete.");
        return Ok(());
    }
    print!("{}", format::format_tasks(&tasks, "Your Tasks"));
    let Some(id) = prompt_nonempty(input, "Enter task ID to delete: ", "No task ID provided.")?
    else {
        return Ok(());
    };
    let Some(task) = ops.get_by_id(&id, Some(username)) else {
        println!("Error: {}", OpError::NotFoundOrForbidden);
        return Ok(());
    };
    let confirmed = confirm_with(
        input,
        &format!("Are you sure you want to delete '{}'? (y/n): ", task.title),
    )?;
    match ops.delete_task(&id, username, confirmed) {
        Ok(DeleteOutcome::Deleted) => println!("Task deleted successfully!"),
        Ok(DeleteOutcome::Cancelled) => println!("Deletion cancelled."),
        Err(e) => println!("Error: {e}"),
    }
    Ok(())
}
