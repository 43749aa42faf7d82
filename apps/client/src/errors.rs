use thiserror::Error;

/// Application-level error type.
/// Every command catches these at its boundary and turns them into a notice
/// via [`AppError::user_message`].
#[derive(Debug, Error)]
pub enum AppError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {}", message.as_deref().unwrap_or("<no message>"))]
    Api {
        status: u16,
        code: Option<String>,
        message: Option<String>,
    },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Response decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF error: {0}")]
    Pdf(String),

    #[error("Payment callback error: {0}")]
    Callback(String),

    #[error("Busy: {0}")]
    Busy(&'static str),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Message shown to the user: the server-provided message when there is
    /// one, the text of local checks and payment outcomes, `fallback` otherwise.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            AppError::Api {
                message: Some(msg), ..
            } if !msg.trim().is_empty() => msg.clone(),
            AppError::Validation(msg) | AppError::Callback(msg) => msg.clone(),
            _ => fallback.to_string(),
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            AppError::Api { status, .. } => Some(*status),
            AppError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401) | Some(403))
    }

    /// Stable machine-readable code, for logs.
    pub fn code(&self) -> &str {
        match self {
            AppError::Http(_) => "HTTP_ERROR",
            AppError::Api { code: Some(c), .. } => c.as_str(),
            AppError::Api { .. } => "API_ERROR",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Decode(_) => "DECODE_ERROR",
            AppError::Io(_) => "IO_ERROR",
            AppError::Pdf(_) => "PDF_ERROR",
            AppError::Callback(_) => "CALLBACK_ERROR",
            AppError::Busy(_) => "BUSY",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}
