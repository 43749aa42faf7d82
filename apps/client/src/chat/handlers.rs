use std::path::PathBuf;
use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::chat::conversation::ChatView;
use crate::chat::render::render_entry;
use crate::chat::repl::{self, session_lines};
use crate::chat::ensure_allowed;
use crate::display::{prompt, toast};
use crate::errors::AppError;
use crate::state::AppState;

fn view(state: &AppState) -> Result<ChatView, AppError> {
    ensure_allowed(&state.config)?;
    Ok(ChatView::new(Arc::new(state.api.clone())))
}

/// `talentbridge chat`: interactive session.
pub async fn handle_open(state: &AppState) -> Result<(), AppError> {
    let mut chat = view(state)?;
    if let Err(e) = chat.open().await {
        toast::api_error(&e, "Không thể tải danh sách cuộc trò chuyện");
    }
    repl::run(chat, state.color).await
}

/// `talentbridge chat sessions`
pub async fn handle_sessions(state: &AppState) -> Result<(), AppError> {
    let mut chat = view(state)?;
    chat.refresh_sessions().await?;
    if chat.sessions().is_empty() {
        println!("(Chưa có cuộc trò chuyện nào)");
    }
    for line in session_lines(chat.sessions(), None) {
        println!("{line}");
    }
    Ok(())
}

/// `talentbridge chat history <session>`
pub async fn handle_history(state: &AppState, session_id: &str) -> Result<(), AppError> {
    let mut chat = view(state)?;
    let info = state.api.chat_session_info(session_id).await?;
    if !info.exists {
        return Err(AppError::Validation(format!(
            "Không tìm thấy cuộc trò chuyện {session_id}"
        )));
    }
    println!("Cuộc trò chuyện {} · {} tin nhắn\n", info.session_id, info.message_count);
    chat.select_session(session_id).await?;
    let now = Utc::now();
    for entry in chat.messages() {
        for line in render_entry(entry, now, state.color) {
            println!("{line}");
        }
    }
    Ok(())
}

/// `talentbridge chat ask`: one question, one answer.
pub async fn handle_ask(
    state: &AppState,
    question: &str,
    session_id: Option<&str>,
    files: Vec<PathBuf>,
) -> Result<(), AppError> {
    let mut chat = view(state)?;
    if let Some(id) = session_id {
        chat.select_session(id).await?;
    }
    if let Some(warning) = chat.attach(files).warning() {
        toast::warning(&warning);
    }
    chat.set_input(question);
    match chat.send().await? {
        Some(reply) => {
            if let Some(id) = chat.active_session() {
                info!(session_id = id, "chat reply received");
            }
            let now = Utc::now();
            if let Some(entry) = chat.messages().last() {
                for line in render_entry(entry, now, state.color) {
                    println!("{line}");
                }
            } else {
                println!("{reply}");
            }
        }
        None => toast::warning("Nội dung tin nhắn trống"),
    }
    Ok(())
}

/// `talentbridge chat delete <session>`
pub async fn handle_delete(state: &AppState, session_id: &str, yes: bool) -> Result<(), AppError> {
    let mut chat = view(state)?;
    if !prompt::confirm("Bạn có chắc muốn xóa cuộc trò chuyện này?", yes)? {
        return Ok(());
    }
    chat.delete_session(session_id).await?;
    toast::success("Đã xóa cuộc trò chuyện");
    Ok(())
}

/// `talentbridge chat delete-all`
pub async fn handle_delete_all(state: &AppState, yes: bool) -> Result<(), AppError> {
    let mut chat = view(state)?;
    chat.refresh_sessions().await?;
    if chat.sessions().is_empty() {
        toast::warning("Không có cuộc trò chuyện nào");
        return Ok(());
    }
    let question =
        "Bạn có chắc muốn xóa TẤT CẢ lịch sử trò chuyện? Hành động này không thể hoàn tác!";
    if !prompt::confirm(question, yes)? {
        return Ok(());
    }
    let report = chat.delete_all_sessions().await;
    if report.is_complete() {
        toast::success("Đã xóa tất cả lịch sử trò chuyện");
        return Ok(());
    }
    for (id, err) in &report.failed {
        toast::api_error(err, &format!("Không thể xóa cuộc trò chuyện {id}"));
    }
    Err(AppError::Validation(format!(
        "Đã xóa {}/{} cuộc trò chuyện",
        report.deleted.len(),
        report.deleted.len() + report.failed.len()
    )))
}
