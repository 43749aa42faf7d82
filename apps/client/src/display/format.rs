//! Date, number, currency and percentage formatting (vi-VN conventions).

use chrono::{DateTime, Utc};

use crate::display::Tone;
use crate::models::timestamp::server_offset;

/// Growth rates within this band (in percent) count as flat.
pub const GROWTH_EPSILON: f64 = 0.05;

/// "Vừa xong", "5 phút trước", ... or the calendar date after a week.
pub fn relative_time(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(at);
    let minutes = elapsed.num_minutes();
    let hours = elapsed.num_hours();
    let days = elapsed.num_days();

    if minutes < 1 {
        "Vừa xong".to_string()
    } else if minutes < 60 {
        format!("{minutes} phút trước")
    } else if hours < 24 {
        format!("{hours} giờ trước")
    } else if days < 7 {
        format!("{days} ngày trước")
    } else {
        format_date(at)
    }
}

/// `d/M/yyyy` in the server's zone.
pub fn format_date(at: DateTime<Utc>) -> String {
    at.with_timezone(&server_offset())
        .format("%-d/%-m/%Y")
        .to_string()
}

/// `1234567` → `1.234.567`
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

/// Missing counters render as `0`.
pub fn format_number(value: Option<u64>) -> String {
    group_thousands(value.unwrap_or(0))
}

/// `10000.0` → `10.000 ₫`
pub fn format_vnd(amount: f64) -> String {
    let rounded = amount.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{sign}{} ₫", group_thousands(rounded.abs() as u64))
}

/// Signed percentage with one decimal; near-zero and missing values are `0%`.
pub fn format_percentage(value: Option<f64>) -> String {
    match value {
        None => "0%".to_string(),
        Some(v) if v.abs() < GROWTH_EPSILON => "0%".to_string(),
        Some(v) => {
            let sign = if v > 0.0 { "+" } else { "" };
            format!("{sign}{v:.1}%")
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Growth {
    Up,
    Down,
    Flat,
}

impl Growth {
    pub fn classify(rate: Option<f64>) -> Self {
        let rate = rate.unwrap_or(0.0);
        if rate > GROWTH_EPSILON {
            Growth::Up
        } else if rate < -GROWTH_EPSILON {
            Growth::Down
        } else {
            Growth::Flat
        }
    }

    pub fn arrow(&self) -> &'static str {
        match self {
            Growth::Up => "↑",
            Growth::Down => "↓",
            Growth::Flat => "→",
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            Growth::Up => Tone::Green,
            Growth::Down => Tone::Red,
            Growth::Flat => Tone::Yellow,
        }
    }
}

/// `"2024-01"` → `"T1/2024"`. Malformed input is returned unchanged.
pub fn month_label(month: &str) -> String {
    match month.split_once('-') {
        Some((year, m)) => match m.parse::<u32>() {
            Ok(m) => format!("T{m}/{year}"),
            Err(_) => month.to_string(),
        },
        None => month.to_string(),
    }
}

/// CV match score bands: ≥80 green, ≥60 yellow, ≥40 orange, else red.
pub fn score_tone(score: f64) -> Tone {
    if score >= 80.0 {
        Tone::Green
    } else if score >= 60.0 {
        Tone::Yellow
    } else if score >= 40.0 {
        Tone::Orange
    } else {
        Tone::Red
    }
}
