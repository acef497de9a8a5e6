//! Startup embedding batch
//!
//! Snapshots the non-directory entries of a directory, then embeds them one
//! at a time. Every file yields exactly one [`FileOutcome`], in enumeration
//! order, whether the read or the request failed.

use super::embeddings::{Embedding, EmbeddingClient, EmbeddingError};
use std::fmt;
use std::path::{Path, PathBuf};

/// Why a single file has no embedding
#[derive(Debug, Clone, PartialEq)]
pub enum FileOutcomeError {
    /// The file could not be read
    Read(String),
    /// The embedding request failed
    Embed(EmbeddingError),
}

impl fmt::Display for FileOutcomeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read(msg) => write!(f, "read error: {}", msg),
            Self::Embed(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for FileOutcomeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Read(_) => None,
            Self::Embed(e) => Some(e),
        }
    }
}

/// Result of embedding one file
#[derive(Debug, Clone, PartialEq)]
pub struct FileOutcome {
    pub file_name: String,
    pub result: Result<Embedding, FileOutcomeError>,
}

impl FileOutcome {
    /// One history line describing this outcome
    pub fn summary(&self) -> String {
        match &self.result {
            Ok(embedding) => format!("{}: embedded ({} dims)", self.file_name, embedding.len()),
            Err(e) => format!("{}: failed: {}", self.file_name, e),
        }
    }
}

/// Whether `entry` is a directory, following symlinks
///
/// A dangling link falls back to the entry's own type, so it counts as a file.
pub async fn is_directory(entry: &tokio::fs::DirEntry) -> bool {
    if let Ok(meta) = tokio::fs::metadata(entry.path()).await {
        return meta.is_dir();
    }
    match entry.file_type().await {
        Ok(ft) => ft.is_dir(),
        Err(e) => {
            tracing::warn!(path = %entry.path().display(), "Cannot stat entry: {}", e);
            false
        }
    }
}

/// Non-directory entries of `dir`, sorted by file name
pub async fn enumerate_files(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut reader = tokio::fs::read_dir(dir).await?;
    let mut files = Vec::new();

    while let Some(entry) = reader.next_entry().await? {
        if !is_directory(&entry).await {
            files.push(entry.path());
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// An embedding batch in flight: the directory snapshot plus results so far
#[derive(Debug)]
pub struct EmbeddingJob {
    files: Vec<PathBuf>,
    outcomes: Vec<FileOutcome>,
}

impl EmbeddingJob {
    /// Snapshot the files of `dir`
    ///
    /// Files created after this call are not part of the batch.
    pub async fn snapshot(dir: &Path) -> std::io::Result<Self> {
        let files = enumerate_files(dir).await?;
        Ok(Self {
            outcomes: Vec::with_capacity(files.len()),
            files,
        })
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Embed every file in order, one request at a time
    pub async fn run(mut self, client: &EmbeddingClient) -> Vec<FileOutcome> {
        tracing::info!(files = self.files.len(), url = client.url(), "Embedding batch started");

        for path in std::mem::take(&mut self.files) {
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());

            let result = match tokio::fs::read(&path).await {
                Ok(bytes) => {
                    let text = String::from_utf8_lossy(&bytes);
                    client.embed(&text).await.map_err(FileOutcomeError::Embed)
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), "Failed to read file: {}", e);
                    Err(FileOutcomeError::Read(e.to_string()))
                }
            };

            match &result {
                Ok(embedding) => {
                    tracing::debug!(file = %file_name, dims = embedding.len(), "Embedded file")
                }
                Err(FileOutcomeError::Embed(e)) => {
                    tracing::warn!(file = %file_name, "Embedding failed: {}", e)
                }
                Err(FileOutcomeError::Read(_)) => {}
            }

            self.outcomes.push(FileOutcome { file_name, result });
        }

        let failed = self.outcomes.iter().filter(|o| o.result.is_err()).count();
        tracing::info!(
            files = self.outcomes.len(),
            failed,
            "Embedding batch finished"
        );

        self.outcomes
    }
}
