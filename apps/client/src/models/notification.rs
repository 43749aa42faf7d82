use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::timestamp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationKind {
    NewResume,
    ResumeStatusUpdated,
    NewJob,
    #[serde(other)]
    System,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSender {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub logo_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub message: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    #[serde(default)]
    pub is_read: bool,
    #[serde(default)]
    pub action_url: Option<String>,
    #[serde(default)]
    pub reference_id: Option<i64>,
    #[serde(default, with = "timestamp::option")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub sender: Option<NotificationSender>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct UnreadCount {
    pub count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_type_field_maps_to_kind() {
        let json = r#"{
            "id": 9, "title": "CV mới", "message": "Ứng viên vừa nộp CV",
            "type": "NEW_RESUME", "isRead": false, "actionUrl": "/recruiter/resumes",
            "createdAt": "2024-05-01 08:00:00"
        }"#;
        let n: Notification = serde_json::from_str(json).unwrap();
        assert_eq!(n.kind, NotificationKind::NewResume);
        assert!(!n.is_read);
        assert!(n.created_at.is_some());
    }

    #[test]
    fn test_unrecognised_type_is_system() {
        let kind: NotificationKind = serde_json::from_str(r#""PROMOTION""#).unwrap();
        assert_eq!(kind, NotificationKind::System);
    }
}
