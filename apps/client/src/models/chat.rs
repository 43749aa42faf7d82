use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{null_as_default, timestamp};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessageDto {
    pub id: i64,
    pub role: MessageRole,
    pub content: String,
    #[serde(with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub attachment_urls: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub attachment_types: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatSessionDto {
    pub session_id: String,
    #[serde(default)]
    pub first_message: Option<String>,
    #[serde(default)]
    pub last_message: Option<String>,
    #[serde(default)]
    pub message_count: u64,
    #[serde(default, with = "timestamp::option")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, with = "timestamp::option")]
    pub last_message_time: Option<DateTime<Utc>>,
}

impl ChatSessionDto {
    /// One-line title for session lists: the opening question, truncated.
    pub fn title(&self, max_chars: usize) -> String {
        let source = self
            .first_message
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or("(cuộc trò chuyện mới)");
        let mut title: String = source.chars().take(max_chars).collect();
        if source.chars().count() > max_chars {
            title.push('…');
        }
        title
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedSession {
    pub session_id: String,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatSessionInfo {
    pub session_id: String,
    pub exists: bool,
    #[serde(default)]
    pub message_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_deserializes_server_payload() {
        let json = r#"{
            "id": 42,
            "role": "ASSISTANT",
            "content": "Xin chào",
            "createdAt": "2024-05-01 10:00:00",
            "createdBy": "assistant",
            "attachmentUrls": null
        }"#;
        let msg: ChatMessageDto = serde_json::from_str(json).unwrap();
        assert_eq!(msg.id, 42);
        assert_eq!(msg.role, MessageRole::Assistant);
        assert!(msg.attachment_urls.is_empty());
    }

    #[test]
    fn test_session_title_truncates() {
        let session = ChatSessionDto {
            session_id: "s1".to_string(),
            first_message: Some("Tôi muốn tìm việc Rust backend ở Hà Nội".to_string()),
            last_message: None,
            message_count: 2,
            created_at: None,
            last_message_time: None,
        };
        assert_eq!(session.title(10), "Tôi muốn t…");
    }

    #[test]
    fn test_session_title_placeholder_when_empty() {
        let session: ChatSessionDto =
            serde_json::from_str(r#"{"sessionId":"abc","messageCount":0}"#).unwrap();
        assert_eq!(session.title(40), "(cuộc trò chuyện mới)");
    }
}
