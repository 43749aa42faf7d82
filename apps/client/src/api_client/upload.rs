use std::path::Path;

use bytes::Bytes;
use reqwest::multipart::Part;

use crate::errors::AppError;

/// A file staged for a multipart upload.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadFile {
    pub file_name: String,
    pub mime: String,
    pub bytes: Bytes,
}

impl UploadFile {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        let file_name = file_name.into();
        let mime = guess_mime(&file_name).to_string();
        Self {
            file_name,
            mime,
            bytes: bytes.into(),
        }
    }

    pub async fn from_path(path: &Path) -> Result<Self, AppError> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        Ok(Self::new(file_name, bytes))
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    pub fn to_part(&self) -> Result<Part, AppError> {
        Ok(Part::bytes(self.bytes.to_vec())
            .file_name(self.file_name.clone())
            .mime_str(&self.mime)?)
    }
}

/// Best-effort MIME type from the file extension.
pub fn guess_mime(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "pdf" => "application/pdf",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "txt" => "text/plain",
        "md" => "text/markdown",
        "csv" => "text/csv",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_guess_mime_is_case_insensitive() {
        assert_eq!(guess_mime("CV_Final.PDF"), "application/pdf");
        assert_eq!(guess_mime("photo.JPeG"), "image/jpeg");
        assert_eq!(guess_mime("Makefile"), "application/octet-stream");
    }

    #[tokio::test]
    async fn test_from_path_reads_name_and_bytes() {
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        file.write_all(b"hello").unwrap();
        let upload = UploadFile::from_path(file.path()).await.unwrap();
        assert_eq!(upload.mime, "text/plain");
        assert_eq!(upload.size(), 5);
        assert!(upload.file_name.ends_with(".txt"));
    }
}
