//! AI chat assistant: session list, optimistic message sending, transcript
//! viewport, and the interactive loop that drives them.

pub mod attachments;
pub mod backend;
pub mod conversation;
pub mod handlers;
pub mod render;
pub mod repl;
pub mod scroll;

use crate::config::Config;
use crate::errors::AppError;

/// Permission the backend requires for sending chat messages.
pub const CHAT_PERMISSION: &str = "POST /chat-message";

/// Chat needs a token, and the chat permission when the permission list is known.
pub fn ensure_allowed(config: &Config) -> Result<(), AppError> {
    if config.access_token.is_none() || !config.allows(CHAT_PERMISSION) {
        return Err(AppError::Validation(
            "Vui lòng đăng nhập để sử dụng tính năng Chat AI".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(token: Option<&str>, permissions: &[&str]) -> Config {
        Config {
            api_url: "http://localhost/api".to_string(),
            access_token: token.map(String::from),
            permissions: permissions.iter().map(|p| p.to_string()).collect(),
            request_timeout: std::time::Duration::from_secs(1),
            notification_poll_interval: std::time::Duration::from_secs(30),
            payment_callback_port: 3000,
            payment_callback_timeout: std::time::Duration::from_secs(600),
            rust_log: "warn".to_string(),
        }
    }

    #[test]
    fn test_chat_requires_token() {
        assert!(ensure_allowed(&config(None, &[])).is_err());
        assert!(ensure_allowed(&config(Some("t"), &[])).is_ok());
    }

    #[test]
    fn test_chat_requires_permission_when_list_is_known() {
        assert!(ensure_allowed(&config(Some("t"), &["GET /jobs"])).is_err());
        assert!(ensure_allowed(&config(Some("t"), &["GET /jobs", CHAT_PERMISSION])).is_ok());
    }
}
