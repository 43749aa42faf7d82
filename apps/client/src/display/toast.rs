//! One-line notices on stderr, the terminal counterpart of UI toasts.

use crossterm::style::Stylize;
use tracing::{info, warn};

use crate::errors::AppError;

pub fn success(message: &str) {
    info!("{message}");
    eprintln!("{} {message}", "✓".green().bold());
}

pub fn warning(message: &str) {
    warn!("{message}");
    eprintln!("{} {message}", "!".yellow().bold());
}

pub fn error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message.red());
}

/// Reports `err` using the server message when present, `fallback` otherwise.
pub fn api_error(err: &AppError, fallback: &str) {
    warn!(code = err.code(), "{err}");
    error(&err.user_message(fallback));
}
