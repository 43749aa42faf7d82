//! Chat view-model: session list, per-session transcript, optimistic sends.
//!
//! State machine for a send:
//!
//! ```text
//! Idle ──begin_send──▶ Sending ──reply──▶ Idle   (USER entry Confirmed, ASSISTANT appended)
//!                         └────error────▶ Idle   (USER entry removed, input + files restored)
//! ```
//!
//! Local entries are keyed by a client-side [`LocalId`]; server ids are
//! attached when known and never synthesized from timestamps.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures::future::join_all;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::chat::attachments::{self, AddOutcome, Attachments};
use crate::chat::backend::ChatBackend;
use crate::errors::AppError;
use crate::models::chat::{ChatMessageDto, ChatSessionDto, MessageRole};

// ────────────────────────────────────────────────────────────────────────────
// Transcript entries
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LocalId(Uuid);

impl LocalId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for LocalId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for LocalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Pending,
    Confirmed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatEntry {
    pub local_id: LocalId,
    pub server_id: Option<i64>,
    pub role: MessageRole,
    pub content: String,
    pub created_at: DateTime<Utc>,
    /// File names (for local entries) or URLs (for server history).
    pub attachments: Vec<String>,
    pub delivery: Delivery,
}

impl From<ChatMessageDto> for ChatEntry {
    fn from(dto: ChatMessageDto) -> Self {
        Self {
            local_id: LocalId::new(),
            server_id: Some(dto.id),
            role: dto.role,
            content: dto.content,
            created_at: dto.created_at,
            attachments: dto.attachment_urls,
            delivery: Delivery::Confirmed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendPhase {
    Idle,
    Sending,
}

/// A send that has been staged locally but not yet delivered.
#[derive(Debug)]
pub struct PendingSend {
    pub local_id: LocalId,
    pub question: String,
    pub files: Vec<PathBuf>,
}

/// Outcome of deleting several sessions at once.
#[derive(Debug, Default)]
pub struct BulkDeleteReport {
    pub deleted: Vec<String>,
    pub failed: Vec<(String, AppError)>,
}

impl BulkDeleteReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// View-model
// ────────────────────────────────────────────────────────────────────────────

pub struct ChatView {
    backend: Arc<dyn ChatBackend>,
    sessions: Vec<ChatSessionDto>,
    active: Option<String>,
    messages: Vec<ChatEntry>,
    input: String,
    attachments: Attachments,
    phase: SendPhase,
}

impl ChatView {
    pub fn new(backend: Arc<dyn ChatBackend>) -> Self {
        Self {
            backend,
            sessions: Vec::new(),
            active: None,
            messages: Vec::new(),
            input: String::new(),
            attachments: Attachments::new(),
            phase: SendPhase::Idle,
        }
    }

    pub fn sessions(&self) -> &[ChatSessionDto] {
        &self.sessions
    }

    pub fn active_session(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn messages(&self) -> &[ChatEntry] {
        &self.messages
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn attachments(&self) -> &Attachments {
        &self.attachments
    }

    pub fn attach<I>(&mut self, paths: I) -> AddOutcome
    where
        I: IntoIterator<Item = PathBuf>,
    {
        self.attachments.add(paths)
    }

    pub fn detach(&mut self, index: usize) -> Option<PathBuf> {
        self.attachments.remove(index)
    }

    pub fn phase(&self) -> SendPhase {
        self.phase
    }

    // ── Session list ────────────────────────────────────────────────────────

    /// Loads sessions and, when nothing is selected, opens the most recent one.
    pub async fn open(&mut self) -> Result<(), AppError> {
        self.refresh_sessions().await?;
        if self.active.is_none() {
            if let Some(first) = self.sessions.first().map(|s| s.session_id.clone()) {
                self.select_session(&first).await?;
            }
        }
        Ok(())
    }

    /// Full reload of the session list. On error the previous list is kept.
    pub async fn refresh_sessions(&mut self) -> Result<(), AppError> {
        let sessions = self.backend.sessions().await?;
        debug!(count = sessions.len(), "chat sessions reloaded");
        self.sessions = sessions;
        Ok(())
    }

    /// Replaces the transcript with the history of `session_id`.
    /// On error the current selection and transcript are kept.
    pub async fn select_session(&mut self, session_id: &str) -> Result<(), AppError> {
        let history = self.backend.history(session_id).await?;
        self.active = Some(session_id.to_string());
        self.messages = history.into_iter().map(ChatEntry::from).collect();
        Ok(())
    }

    pub fn deselect(&mut self) {
        self.active = None;
        self.messages.clear();
    }

    /// Creates an empty session, reloads the list and selects it.
    pub async fn new_session(&mut self) -> Result<String, AppError> {
        let created = self.backend.create_session().await?;
        info!(session_id = %created.session_id, "chat session created");
        if let Err(e) = self.refresh_sessions().await {
            warn!("session list reload after create failed: {e}");
        }
        self.active = Some(created.session_id.clone());
        self.messages.clear();
        Ok(created.session_id)
    }

    // ── Sending ─────────────────────────────────────────────────────────────

    /// Stages the current input as an optimistic USER entry and moves to
    /// `Sending`. Returns `Ok(None)` for blank input, `Busy` while another
    /// send is in flight.
    pub fn begin_send(&mut self) -> Result<Option<PendingSend>, AppError> {
        if self.phase == SendPhase::Sending {
            return Err(AppError::Busy("a message is already being sent"));
        }
        let question = self.input.trim().to_string();
        if question.is_empty() {
            return Ok(None);
        }

        let files = self.attachments.take();
        let local_id = LocalId::new();
        self.messages.push(ChatEntry {
            local_id,
            server_id: None,
            role: MessageRole::User,
            content: question.clone(),
            created_at: Utc::now(),
            attachments: files.iter().map(|p| attachments::display_name(p)).collect(),
            delivery: Delivery::Pending,
        });
        self.input.clear();
        self.phase = SendPhase::Sending;

        Ok(Some(PendingSend {
            local_id,
            question,
            files,
        }))
    }

    /// Sends the current input. Returns the assistant reply, or `None` when
    /// the input was blank.
    pub async fn send(&mut self) -> Result<Option<String>, AppError> {
        let Some(pending) = self.begin_send()? else {
            return Ok(None);
        };
        self.finish_send(pending).await.map(Some)
    }

    /// Delivers a staged send and reconciles the transcript with the outcome.
    pub async fn finish_send(&mut self, pending: PendingSend) -> Result<String, AppError> {
        match self.deliver(&pending).await {
            Ok(reply) => {
                self.confirm(&pending, &reply);
                if let Err(e) = self.refresh_sessions().await {
                    warn!("session list reload after send failed: {e}");
                }
                Ok(reply)
            }
            Err(err) => {
                self.rollback(pending);
                Err(err)
            }
        }
    }

    async fn deliver(&mut self, pending: &PendingSend) -> Result<String, AppError> {
        let session_id = match self.active.clone() {
            Some(id) => id,
            None => self.start_implicit_session().await?,
        };
        let files = attachments::load_all(&pending.files).await?;
        self.backend
            .send(&session_id, &pending.question, &files)
            .await
    }

    /// First send without a session: create one but keep the optimistic entry.
    async fn start_implicit_session(&mut self) -> Result<String, AppError> {
        let created = self.backend.create_session().await?;
        if let Err(e) = self.refresh_sessions().await {
            warn!("session list reload after implicit create failed: {e}");
        }
        self.active = Some(created.session_id.clone());
        Ok(created.session_id)
    }

    fn confirm(&mut self, pending: &PendingSend, reply: &str) {
        if let Some(entry) = self
            .messages
            .iter_mut()
            .find(|m| m.local_id == pending.local_id)
        {
            entry.delivery = Delivery::Confirmed;
        }
        self.messages.push(ChatEntry {
            local_id: LocalId::new(),
            server_id: None,
            role: MessageRole::Assistant,
            content: reply.to_string(),
            created_at: Utc::now(),
            attachments: Vec::new(),
            delivery: Delivery::Confirmed,
        });
        self.phase = SendPhase::Idle;
    }

    /// Removes the optimistic entry and gives the input and files back.
    fn rollback(&mut self, pending: PendingSend) {
        self.messages.retain(|m| m.local_id != pending.local_id);
        self.input = pending.question;
        self.attachments.restore(pending.files);
        self.phase = SendPhase::Idle;
    }

    // ── Deletion ────────────────────────────────────────────────────────────

    /// Clears one session's history on the server. Deleting the active
    /// session also clears the transcript.
    pub async fn delete_session(&mut self, session_id: &str) -> Result<(), AppError> {
        self.backend.clear(session_id).await?;
        info!(session_id, "chat session deleted");
        if self.active.as_deref() == Some(session_id) {
            self.deselect();
        }
        if let Err(e) = self.refresh_sessions().await {
            warn!("session list reload after delete failed: {e}");
        }
        Ok(())
    }

    /// Deletes every listed session concurrently, then clears the selection
    /// and reloads so local state matches the server whatever failed.
    pub async fn delete_all_sessions(&mut self) -> BulkDeleteReport {
        let ids: Vec<String> = self.sessions.iter().map(|s| s.session_id.clone()).collect();
        let backend = self.backend.clone();
        let results = join_all(ids.iter().map(|id| {
            let backend = backend.clone();
            async move { backend.clear(id).await }
        }))
        .await;

        let mut report = BulkDeleteReport::default();
        for (id, result) in ids.into_iter().zip(results) {
            match result {
                Ok(()) => report.deleted.push(id),
                Err(e) => {
                    warn!(session_id = %id, "bulk delete failed: {e}");
                    report.failed.push((id, e));
                }
            }
        }

        self.deselect();
        if let Err(e) = self.refresh_sessions().await {
            warn!("session list reload after bulk delete failed: {e}");
        }
        report
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
