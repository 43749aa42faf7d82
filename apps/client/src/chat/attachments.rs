//! Files staged for the next chat message.

use std::path::PathBuf;

use crate::api_client::UploadFile;
use crate::errors::AppError;

pub const MAX_ATTACHMENTS: usize = 5;

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Attachments {
    files: Vec<PathBuf>,
}

/// Result of adding files: how many were dropped to respect the limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddOutcome {
    pub added: usize,
    pub dropped: usize,
}

impl AddOutcome {
    pub fn warning(&self) -> Option<String> {
        (self.dropped > 0).then(|| {
            format!("Chỉ được đính kèm tối đa {MAX_ATTACHMENTS} file, đã bỏ qua {} file", self.dropped)
        })
    }
}

impl Attachments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `paths`, keeping only the first `MAX_ATTACHMENTS` overall.
    pub fn add<I>(&mut self, paths: I) -> AddOutcome
    where
        I: IntoIterator<Item = PathBuf>,
    {
        let mut added = 0;
        let mut dropped = 0;
        for path in paths {
            if self.files.len() < MAX_ATTACHMENTS {
                self.files.push(path);
                added += 1;
            } else {
                dropped += 1;
            }
        }
        AddOutcome { added, dropped }
    }

    /// Removes the file at `index`; out-of-range indices are ignored.
    pub fn remove(&mut self, index: usize) -> Option<PathBuf> {
        (index < self.files.len()).then(|| self.files.remove(index))
    }

    pub fn take(&mut self) -> Vec<PathBuf> {
        std::mem::take(&mut self.files)
    }

    pub fn restore(&mut self, files: Vec<PathBuf>) {
        self.files = files;
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Reads the staged files from disk, in order.
pub async fn load_all(paths: &[PathBuf]) -> Result<Vec<UploadFile>, AppError> {
    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        files.push(UploadFile::from_path(path).await?);
    }
    Ok(files)
}

pub fn display_name(path: &std::path::Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
