//! Chat endpoints: sessions, history, and message send.

use reqwest::multipart::{Form, Part};

use crate::api_client::{ApiClient, UploadFile};
use crate::errors::AppError;
use crate::models::chat::{ChatMessageDto, ChatSessionDto, ChatSessionInfo, CreatedSession};

impl ApiClient {
    /// POST /chat-message (multipart). The backend answers with the raw
    /// assistant reply.
    pub async fn send_chat_message(
        &self,
        session_id: &str,
        question: &str,
        files: &[UploadFile],
    ) -> Result<String, AppError> {
        let mut form = Form::new()
            .part("question", Part::text(question.to_string()))
            .part("sessionId", Part::text(session_id.to_string()));
        for file in files {
            form = form.part("files", file.to_part()?);
        }
        self.post_multipart_text("chat-message", form).await
    }

    /// GET /chat-history/{sessionId}
    pub async fn chat_history(&self, session_id: &str) -> Result<Vec<ChatMessageDto>, AppError> {
        self.get(&format!("chat-history/{session_id}")).await
    }

    /// DELETE /chat-history/{sessionId}
    pub async fn clear_chat_history(&self, session_id: &str) -> Result<(), AppError> {
        self.delete_unit(&format!("chat-history/{session_id}")).await
    }

    /// POST /chat-sessions
    pub async fn create_chat_session(&self) -> Result<CreatedSession, AppError> {
        self.post_empty("chat-sessions").await
    }

    /// GET /chat-sessions
    pub async fn chat_sessions(&self) -> Result<Vec<ChatSessionDto>, AppError> {
        self.get("chat-sessions").await
    }

    /// GET /chat-session/{sessionId}/info
    pub async fn chat_session_info(&self, session_id: &str) -> Result<ChatSessionInfo, AppError> {
        self.get(&format!("chat-session/{session_id}/info")).await
    }
}
