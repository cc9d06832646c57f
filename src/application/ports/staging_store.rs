use std::io;

use bytes::Bytes;
use futures::stream::BoxStream;

use crate::domain::{TaskId, WorkingDirectory};

/// Owns task working directories on disk.
#[async_trait::async_trait]
pub trait StagingStore: Send + Sync {
    /// Working directory for `task_id`, whether or not it exists yet.
    fn workspace(&self, task_id: TaskId) -> WorkingDirectory;

    async fn create_workspace(&self, task_id: TaskId)
    -> Result<WorkingDirectory, StagingStoreError>;

    /// Streams `stream` into `filename`. A failing stream is reported as
    /// [`StagingStoreError::SourceRead`] and leaves no partial object.
    async fn store(
        &self,
        workspace: &WorkingDirectory,
        filename: &str,
        stream: BoxStream<'_, Result<Bytes, io::Error>>,
    ) -> Result<u64, StagingStoreError>;

    /// Packs every output file into a single ZIP archive.
    async fn archive_output(&self, workspace: &WorkingDirectory)
    -> Result<Vec<u8>, StagingStoreError>;

    async fn discard(&self, workspace: &WorkingDirectory) -> Result<(), StagingStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StagingStoreError {
    #[error("upload failed: {0}")]
    UploadFailed(String),
    /// The incoming byte stream broke off or was malformed.
    #[error("reading upload stream: {0}")]
    SourceRead(io::Error),
    #[error("object not found: {0}")]
    NotFound(String),
    #[error("download failed: {0}")]
    DownloadFailed(String),
    #[error("archive failed: {0}")]
    ArchiveFailed(String),
    #[error("delete failed: {0}")]
    DeleteFailed(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}
