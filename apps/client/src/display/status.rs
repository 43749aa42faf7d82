//! Labels, tones and icons for the backend's status enums.

use crate::display::Tone;
use crate::models::job::{JobLevel, JobStatus};
use crate::models::notification::NotificationKind;
use crate::models::resume::ResumeStatus;

// ────────────────────────────────────────────────────────────────────────────
// Jobs
// ────────────────────────────────────────────────────────────────────────────

pub fn job_status_label(status: JobStatus) -> &'static str {
    match status {
        JobStatus::Active => "Đang tuyển",
        JobStatus::Expired => "Hết hạn",
        JobStatus::Paused => "Tạm dừng",
        JobStatus::Draft => "Nháp",
        JobStatus::Unknown => "Không rõ",
    }
}

pub fn job_status_tone(status: JobStatus) -> Tone {
    match status {
        JobStatus::Active => Tone::Green,
        JobStatus::Expired => Tone::Red,
        JobStatus::Paused => Tone::Yellow,
        JobStatus::Draft | JobStatus::Unknown => Tone::Gray,
    }
}

pub fn level_label(level: JobLevel) -> &'static str {
    match level {
        JobLevel::Intern => "Intern",
        JobLevel::Fresher => "Fresher",
        JobLevel::Middle => "Middle",
        JobLevel::Senior => "Senior",
        JobLevel::Leader => "Leader",
    }
}

pub fn level_tone(level: JobLevel) -> Tone {
    match level {
        JobLevel::Intern => Tone::Blue,
        JobLevel::Fresher => Tone::Green,
        JobLevel::Middle => Tone::Yellow,
        JobLevel::Senior => Tone::Purple,
        JobLevel::Leader => Tone::Red,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Resumes
// ────────────────────────────────────────────────────────────────────────────

pub fn resume_status_label(status: ResumeStatus) -> &'static str {
    match status {
        ResumeStatus::Pending => "Chờ duyệt",
        ResumeStatus::Reviewing => "Đang xét duyệt",
        ResumeStatus::Approved => "Đã duyệt",
        ResumeStatus::Rejected => "Từ chối",
    }
}

pub fn resume_status_tone(status: ResumeStatus) -> Tone {
    match status {
        ResumeStatus::Pending => Tone::Amber,
        ResumeStatus::Reviewing => Tone::Blue,
        ResumeStatus::Approved => Tone::Emerald,
        ResumeStatus::Rejected => Tone::Red,
    }
}

pub fn resume_status_icon(status: ResumeStatus) -> &'static str {
    match status {
        ResumeStatus::Pending => "◐",
        ResumeStatus::Reviewing => "◑",
        ResumeStatus::Approved => "●",
        ResumeStatus::Rejected => "✕",
    }
}

/// Label for a raw status string; unknown values are echoed back with a
/// hollow icon.
pub fn resume_status_display(raw: &str) -> (String, &'static str, Tone) {
    match ResumeStatus::parse(raw) {
        Some(status) => (
            resume_status_label(status).to_string(),
            resume_status_icon(status),
            resume_status_tone(status),
        ),
        None => (raw.to_string(), "○", Tone::Gray),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Notifications and permissions
// ────────────────────────────────────────────────────────────────────────────

pub fn notification_label(kind: NotificationKind) -> &'static str {
    match kind {
        NotificationKind::NewResume => "CV mới",
        NotificationKind::ResumeStatusUpdated => "Cập nhật",
        NotificationKind::NewJob => "Việc mới",
        NotificationKind::System => "Thông báo",
    }
}

pub fn notification_tone(kind: NotificationKind) -> Tone {
    match kind {
        NotificationKind::NewResume => Tone::Blue,
        NotificationKind::ResumeStatusUpdated => Tone::Green,
        NotificationKind::NewJob => Tone::Purple,
        NotificationKind::System => Tone::Gray,
    }
}

/// Tone for an HTTP method, as shown next to permission strings.
pub fn method_tone(method: &str) -> Tone {
    match method.to_ascii_uppercase().as_str() {
        "GET" => Tone::Green,
        "POST" => Tone::Blue,
        "PUT" => Tone::Yellow,
        "DELETE" => Tone::Red,
        _ => Tone::Gray,
    }
}
