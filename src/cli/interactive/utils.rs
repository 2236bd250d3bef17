use std::io::{self, IsTerminal, Write};

use inquire::error::InquireError;
use inquire::{Password, PasswordDisplayMode, Select, Text};

use crate::cli::i18n::texts;
use crate::error::AppError;

pub fn clear_screen() {
    if io::stdout().is_terminal() {
        print!("\x1B[2J\x1B[1;1H");
        let _ = io::stdout().flush();
    }
}

pub fn pause() {
    print!("{}", texts::press_enter());
    let _ = io::stdout().flush();
    let mut buf = String::new();
    let _ = io::stdin().read_line(&mut buf);
}

/// `Ok(None)` when the user pressed Esc or Ctrl-C.
fn cancelled_as_none<T>(result: Result<T, InquireError>) -> Result<Option<T>, AppError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(InquireError::OperationCanceled) | Err(InquireError::OperationInterrupted) => Ok(None),
        Err(e) => Err(AppError::Message(e.to_string())),
    }
}

pub fn prompt_select<T: std::fmt::Display>(
    message: &str,
    options: Vec<T>,
) -> Result<Option<T>, AppError> {
    cancelled_as_none(Select::new(message, options).prompt())
}

pub fn prompt_select_at<T: std::fmt::Display>(
    message: &str,
    options: Vec<T>,
    starting_cursor: usize,
) -> Result<Option<T>, AppError> {
    let cursor = starting_cursor.min(options.len().saturating_sub(1));
    cancelled_as_none(
        Select::new(message, options)
            .with_starting_cursor(cursor)
            .prompt(),
    )
}

pub fn prompt_text(
    message: &str,
    initial: &str,
    placeholder: &str,
) -> Result<Option<String>, AppError> {
    cancelled_as_none(
        Text::new(message)
            .with_initial_value(initial)
            .with_placeholder(placeholder)
            .prompt(),
    )
}

pub fn prompt_secret(message: &str, help: &str) -> Result<Option<String>, AppError> {
    cancelled_as_none(
        Password::new(message)
            .with_display_mode(PasswordDisplayMode::Masked)
            .without_confirmation()
            .with_help_message(help)
            .prompt(),
    )
}
