//! Display helpers: everything that turns domain values into terminal text.
//!
//! Pure functions only (apart from `toast` and `prompt`, which own stdout/stderr
//! interaction). Colors are expressed as a [`Tone`] so they can be asserted in
//! tests and mapped to `crossterm` colors at the edge.

pub mod format;
pub mod prompt;
pub mod status;
pub mod toast;

use crossterm::style::{Color, StyledContent, Stylize};

/// Palette used by badges, charts and notices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Green,
    Emerald,
    Yellow,
    Amber,
    Orange,
    Red,
    Blue,
    Purple,
    Gray,
}

impl Tone {
    pub fn color(&self) -> Color {
        match self {
            Tone::Green => Color::Green,
            Tone::Emerald => Color::Rgb { r: 16, g: 185, b: 129 },
            Tone::Yellow => Color::Yellow,
            Tone::Amber => Color::Rgb { r: 245, g: 158, b: 11 },
            Tone::Orange => Color::Rgb { r: 249, g: 115, b: 22 },
            Tone::Red => Color::Red,
            Tone::Blue => Color::Blue,
            Tone::Purple => Color::Magenta,
            Tone::Gray => Color::Grey,
        }
    }

    pub fn paint<'a>(&self, text: &'a str) -> StyledContent<&'a str> {
        text.with(self.color())
    }
}

/// A bracketed colored label, e.g. `[Đang tuyển]`.
pub fn badge(label: &str, tone: Tone) -> String {
    format!("[{label}]").with(tone.color()).bold().to_string()
}
