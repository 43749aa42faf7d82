//! Blocking y/N confirmation, the terminal counterpart of a confirm dialog.

use std::io::{BufRead, Write};

use crate::errors::AppError;

/// Asks `question` on stdout and reads one line from stdin.
/// Returns `true` immediately when `assume_yes` is set.
pub fn confirm(question: &str, assume_yes: bool) -> Result<bool, AppError> {
    if assume_yes {
        return Ok(true);
    }
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    confirm_with(question, &mut stdin.lock(), &mut stdout)
}

pub fn confirm_with<R: BufRead, W: Write>(
    question: &str,
    input: &mut R,
    output: &mut W,
) -> Result<bool, AppError> {
    write!(output, "{question} [y/N] ")?;
    output.flush()?;
    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(is_yes(&answer))
}

pub fn is_yes(answer: &str) -> bool {
    matches!(
        answer.trim().to_lowercase().as_str(),
        "y" | "yes" | "c" | "có"
    )
}
