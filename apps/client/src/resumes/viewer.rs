use tracing::debug;

use crate::api_client::ApiClient;
use crate::errors::AppError;

/// Downloads the stored PDF of `resume_id` and returns its text.
pub async fn fetch_text(api: &ApiClient, resume_id: i64) -> Result<String, AppError> {
    let link = api.resume_file_url(resume_id).await?;
    let bytes = api.download(&link).await?;
    debug!(resume_id, bytes = bytes.len(), "resume PDF downloaded");
    let text = tokio::task::spawn_blocking(move || extract_text(&bytes))
        .await
        .map_err(|e| AppError::Pdf(format!("extraction task failed: {e}")))??;
    Ok(text)
}

/// Extracts text from PDF bytes, collapsing runs of blank lines.
pub fn extract_text(bytes: &[u8]) -> Result<String, AppError> {
    let raw = pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| AppError::Pdf(format!("failed to parse PDF: {e}")))?;
    Ok(tidy(&raw))
}

fn tidy(raw: &str) -> String {
    let mut out: Vec<&str> = Vec::new();
    for line in raw.lines().map(str::trim_end) {
        if line.trim().is_empty() && out.last().map_or(true, |l| l.is_empty()) {
            continue;
        }
        out.push(if line.trim().is_empty() { "" } else { line });
    }
    while out.last().is_some_and(|l| l.is_empty()) {
        out.pop();
    }
    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tidy_collapses_blank_runs() {
        let raw = "\n\nNguyễn Văn A   \n\n\n\nKỹ năng\n  \nRust\n\n";
        assert_eq!(tidy(raw), "Nguyễn Văn A\n\nKỹ năng\n\nRust");
    }

    #[test]
    fn test_garbage_bytes_are_a_pdf_error() {
        let err = extract_text(b"not a pdf").unwrap_err();
        assert_eq!(err.code(), "PDF_ERROR");
    }
}
