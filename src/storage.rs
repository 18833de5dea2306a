use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WriteError {
    #[error("failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {path}: {source}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Destination for generated documents.
#[async_trait]
pub trait DocumentSink: Send + Sync {
    /// Write `data` under `filename`, replacing any existing file of that name.
    /// Returns where the document ended up.
    async fn write_document(&self, filename: &str, data: &[u8]) -> Result<PathBuf, WriteError>;
}

/// Writes documents into a directory on the local filesystem.
#[derive(Debug, Clone)]
pub struct FileSystemSink {
    output_dir: PathBuf,
}

impl FileSystemSink {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn document_path(&self, filename: &str) -> PathBuf {
        self.output_dir.join(filename)
    }
}

#[async_trait]
impl DocumentSink for FileSystemSink {
    async fn write_document(&self, filename: &str, data: &[u8]) -> Result<PathBuf, WriteError> {
        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|source| WriteError::CreateDir {
                path: self.output_dir.clone(),
                source,
            })?;

        let file_path = self.document_path(filename);
        tokio::fs::write(&file_path, data)
            .await
            .map_err(|source| WriteError::WriteFile {
                path: file_path.clone(),
                source,
            })?;

        Ok(file_path)
    }
}
