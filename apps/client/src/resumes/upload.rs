use std::path::Path;

use thiserror::Error;

use crate::api_client::UploadFile;
use crate::errors::AppError;

pub const MAX_PDF_BYTES: usize = 5 * 1024 * 1024;
pub const PDF_MIME: &str = "application/pdf";

/// Local checks on a CV file before any request is made.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UploadError {
    #[error("File không hợp lệ: dung lượng {size} byte vượt quá giới hạn {max} byte")]
    TooLarge { size: usize, max: usize },

    #[error("File không hợp lệ: chỉ chấp nhận PDF (nhận được {0})")]
    NotPdf(String),

    #[error("File không hợp lệ: file rỗng")]
    Empty,
}

impl From<UploadError> for AppError {
    fn from(err: UploadError) -> Self {
        AppError::Validation(err.to_string())
    }
}

pub fn check_pdf(file: &UploadFile) -> Result<(), UploadError> {
    if file.mime != PDF_MIME {
        return Err(UploadError::NotPdf(file.mime.clone()));
    }
    if file.size() == 0 {
        return Err(UploadError::Empty);
    }
    if file.size() > MAX_PDF_BYTES {
        return Err(UploadError::TooLarge {
            size: file.size(),
            max: MAX_PDF_BYTES,
        });
    }
    Ok(())
}

/// Reads `path` and validates it as a CV upload. Oversized files are
/// rejected from their metadata without being read.
pub async fn load_pdf(path: &Path) -> Result<UploadFile, AppError> {
    let size = tokio::fs::metadata(path).await?.len();
    if size > MAX_PDF_BYTES as u64 {
        return Err(UploadError::TooLarge {
            size: usize::try_from(size).unwrap_or(usize::MAX),
            max: MAX_PDF_BYTES,
        }
        .into());
    }
    let file = UploadFile::from_path(path).await?;
    check_pdf(&file)?;
    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_pdf() {
        let file = UploadFile::new("cv.docx", "PK");
        assert!(matches!(check_pdf(&file), Err(UploadError::NotPdf(_))));
    }

    #[test]
    fn test_rejects_oversized_pdf() {
        let file = UploadFile::new("cv.pdf", vec![0u8; MAX_PDF_BYTES + 1]);
        assert_eq!(
            check_pdf(&file),
            Err(UploadError::TooLarge {
                size: MAX_PDF_BYTES + 1,
                max: MAX_PDF_BYTES
            })
        );
    }

    #[test]
    fn test_accepts_pdf_at_limit() {
        let file = UploadFile::new("CV.PDF", vec![0u8; MAX_PDF_BYTES]);
        assert_eq!(check_pdf(&file), Ok(()));
    }

    #[tokio::test]
    async fn test_load_pdf_maps_to_validation_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.pdf");
        std::fs::write(&path, b"").unwrap();
        let err = load_pdf(&path).await.unwrap_err();
        assert_eq!(err.code(), "VALIDATION_ERROR");
        assert_eq!(err.user_message("x"), "File không hợp lệ: file rỗng");
    }

    #[tokio::test]
    async fn test_load_pdf_rejects_oversized_file_from_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("big.pdf");
        let file = std::fs::File::create(&path).unwrap();
        file.set_len(MAX_PDF_BYTES as u64 + 1).unwrap();
        let err = load_pdf(&path).await.unwrap_err();
        assert_eq!(err.code(), "VALIDATION_ERROR");
        assert!(err.user_message("x").contains("vượt quá giới hạn"));
    }
}
