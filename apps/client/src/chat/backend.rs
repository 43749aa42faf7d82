use async_trait::async_trait;

use crate::api_client::{ApiClient, UploadFile};
use crate::errors::AppError;
use crate::models::chat::{ChatMessageDto, ChatSessionDto, CreatedSession};

/// The chat operations the view-model needs. `ApiClient` is the real
/// implementation; tests substitute an in-memory one.
///
/// Carried in `ChatView` as `Arc<dyn ChatBackend>`.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn sessions(&self) -> Result<Vec<ChatSessionDto>, AppError>;
    async fn history(&self, session_id: &str) -> Result<Vec<ChatMessageDto>, AppError>;
    async fn create_session(&self) -> Result<CreatedSession, AppError>;
    async fn send(
        &self,
        session_id: &str,
        question: &str,
        files: &[UploadFile],
    ) -> Result<String, AppError>;
    async fn clear(&self, session_id: &str) -> Result<(), AppError>;
}

#[async_trait]
impl ChatBackend for ApiClient {
    async fn sessions(&self) -> Result<Vec<ChatSessionDto>, AppError> {
        self.chat_sessions().await
    }

    async fn history(&self, session_id: &str) -> Result<Vec<ChatMessageDto>, AppError> {
        self.chat_history(session_id).await
    }

    async fn create_session(&self) -> Result<CreatedSession, AppError> {
        self.create_chat_session().await
    }

    async fn send(
        &self,
        session_id: &str,
        question: &str,
        files: &[UploadFile],
    ) -> Result<String, AppError> {
        self.send_chat_message(session_id, question, files).await
    }

    async fn clear(&self, session_id: &str) -> Result<(), AppError> {
        self.clear_chat_history(session_id).await
    }
}
