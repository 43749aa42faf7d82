//! Transcript rendering with a minimal Markdown pass for assistant replies.

use chrono::{DateTime, Utc};
use crossterm::style::Stylize;

use crate::chat::conversation::{ChatEntry, Delivery};
use crate::display::format::relative_time;
use crate::models::chat::MessageRole;

const INDENT: &str = "  ";

/// Renders one entry as display lines (header, body, attachments, spacer).
pub fn render_entry(entry: &ChatEntry, now: DateTime<Utc>, color: bool) -> Vec<String> {
    let who = match entry.role {
        MessageRole::User => "Bạn",
        MessageRole::Assistant => "Trợ lý AI",
    };
    let mut header = format!("{who} · {}", relative_time(entry.created_at, now));
    if entry.delivery == Delivery::Pending {
        header.push_str(" · đang gửi…");
    }
    let header = match (color, entry.role) {
        (false, _) => header,
        (true, MessageRole::User) => header.cyan().bold().to_string(),
        (true, MessageRole::Assistant) => header.magenta().bold().to_string(),
    };

    let mut lines = vec![header];
    let body = match entry.role {
        MessageRole::Assistant => render_markdown(&entry.content, color),
        MessageRole::User => entry.content.lines().map(String::from).collect(),
    };
    lines.extend(body.into_iter().map(|l| format!("{INDENT}{l}")));
    for name in &entry.attachments {
        lines.push(format!("{INDENT}📎 {name}"));
    }
    lines.push(String::new());
    lines
}

/// `* ` / `- ` lines become bullets, `**bold**` spans are emboldened,
/// blank lines are kept.
pub fn render_markdown(text: &str, color: bool) -> Vec<String> {
    text.lines()
        .map(|line| {
            let trimmed = line.trim_start();
            let (prefix, rest) = match trimmed
                .strip_prefix("* ")
                .or_else(|| trimmed.strip_prefix("- "))
            {
                Some(rest) => ("• ", rest),
                None => ("", line),
            };
            format!("{prefix}{}", render_bold(rest, color))
        })
        .collect()
}

fn render_bold(line: &str, color: bool) -> String {
    let mut out = String::new();
    let mut rest = line;
    while let Some(start) = rest.find("**") {
        let after = &rest[start + 2..];
        let Some(end) = after.find("**") else {
            break;
        };
        out.push_str(&rest[..start]);
        let span = &after[..end];
        if color {
            out.push_str(&span.bold().to_string());
        } else {
            out.push_str(span);
        }
        rest = &after[end + 2..];
    }
    out.push_str(rest);
    out
}
