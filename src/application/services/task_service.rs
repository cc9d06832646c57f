use std::io;
use std::sync::Arc;

use bytes::Bytes;
use futures::stream::BoxStream;
use tokio::sync::mpsc;

use super::ChapterizeMessage;
use crate::application::ports::{
    Chapterizer, StagingStore, StagingStoreError, TaskStore, TaskStoreError,
};
use crate::domain::{
    FailureKind, InvalidOptions, ModelCatalog, ProcessingOptions, TaskFailure, TaskId, TaskRecord,
    TaskStatus, WorkingDirectory, sanitize_filename,
};

/// Entry point for the HTTP layer: accepts uploads, answers status queries
/// and packages finished output.
pub struct TaskService {
    task_store: Arc<dyn TaskStore>,
    staging_store: Arc<dyn StagingStore>,
    chapterizer: Arc<dyn Chapterizer>,
    sender: mpsc::Sender<ChapterizeMessage>,
}

impl TaskService {
    pub fn new(
        task_store: Arc<dyn TaskStore>,
        staging_store: Arc<dyn StagingStore>,
        chapterizer: Arc<dyn Chapterizer>,
        sender: mpsc::Sender<ChapterizeMessage>,
    ) -> Self {
        Self {
            task_store,
            staging_store,
            chapterizer,
            sender,
        }
    }

    pub fn catalog(&self) -> ModelCatalog {
        self.chapterizer.catalog()
    }

    pub fn processing_options(
        &self,
        language: &str,
        model_type: &str,
    ) -> Result<ProcessingOptions, InvalidOptions> {
        ProcessingOptions::parse(language, model_type, &self.catalog())
    }

    /// Stages the upload, records the task and hands it to the worker.
    /// Returns as soon as the work is queued.
    pub async fn submit(
        &self,
        filename: &str,
        stream: BoxStream<'_, Result<Bytes, io::Error>>,
        options: ProcessingOptions,
    ) -> Result<TaskId, SubmitError> {
        let task_id = TaskId::new();
        let workspace = self.staging_store.workspace(task_id);
        let filename = sanitize_filename(filename);

        let size = match self.stage_upload(&workspace, &filename, stream).await {
            Ok(size) => size,
            Err(e) => {
                self.discard(&workspace).await;
                return Err(e);
            }
        };
        tracing::debug!(task_id = %task_id, bytes = size, filename = %filename, "Upload staged");

        if let Err(e) = self.task_store.set(task_id, TaskRecord::started()).await {
            self.discard(&workspace).await;
            return Err(SubmitError::Store(e));
        }

        let msg = ChapterizeMessage {
            task_id,
            source_file: workspace.file_path(&filename),
            workspace: workspace.clone(),
            options,
        };

        if self.sender.send(msg).await.is_err() {
            tracing::error!(task_id = %task_id, "Worker channel closed, task not scheduled");
            let mut record = TaskRecord::started();
            if record
                .fail(TaskFailure::new(FailureKind::Scheduling, "worker unavailable"))
                .is_ok()
            {
                if let Err(e) = self.task_store.set(task_id, record).await {
                    tracing::error!(error = %e, "Failed to record scheduling failure");
                }
            }
            self.discard(&workspace).await;
            return Err(SubmitError::QueueUnavailable);
        }

        Ok(task_id)
    }

    /// Record for `task_id`. Identifiers that are not valid task ids are
    /// reported as unknown.
    pub async fn status(&self, task_id: &str) -> Result<Option<TaskRecord>, TaskStoreError> {
        match task_id.parse::<TaskId>() {
            Ok(id) => self.task_store.get(id).await,
            Err(_) => Ok(None),
        }
    }

    /// Every known task, newest first.
    pub async fn list(&self) -> Result<Vec<(TaskId, TaskRecord)>, TaskStoreError> {
        let mut tasks = self.task_store.list().await?;
        tasks.sort_by(|a, b| b.1.created_at.cmp(&a.1.created_at));
        Ok(tasks)
    }

    /// ZIP archive of a completed task's output directory.
    pub async fn download(&self, task_id: &str) -> Result<(TaskId, Vec<u8>), DownloadError> {
        let id = task_id
            .parse::<TaskId>()
            .map_err(|_| DownloadError::NotFound(task_id.to_string()))?;

        let record = self
            .task_store
            .get(id)
            .await
            .map_err(DownloadError::Store)?
            .ok_or_else(|| DownloadError::NotFound(task_id.to_string()))?;

        if record.status != TaskStatus::Completed {
            return Err(DownloadError::NotCompleted(record.status));
        }

        let workspace = self.staging_store.workspace(id);
        let archive = self
            .staging_store
            .archive_output(&workspace)
            .await
            .map_err(DownloadError::Staging)?;
        Ok((id, archive))
    }

    async fn stage_upload(
        &self,
        workspace: &WorkingDirectory,
        filename: &str,
        stream: BoxStream<'_, Result<Bytes, io::Error>>,
    ) -> Result<u64, SubmitError> {
        let created = self
            .staging_store
            .create_workspace(workspace.task_id())
            .await
            .map_err(SubmitError::Staging)?;
        let size = self
            .staging_store
            .store(&created, filename, stream)
            .await
            .map_err(|e| match e {
                StagingStoreError::SourceRead(e) => SubmitError::UploadRead(e.to_string()),
                other => SubmitError::Staging(other),
            })?;
        if size == 0 {
            return Err(SubmitError::EmptyUpload);
        }
        Ok(size)
    }

    async fn discard(&self, workspace: &WorkingDirectory) {
        if let Err(e) = self.staging_store.discard(workspace).await {
            tracing::warn!(
                error = %e,
                path = %workspace.root().display(),
                "Failed to remove working directory"
            );
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("uploaded file is empty")]
    EmptyUpload,
    #[error("could not read upload: {0}")]
    UploadRead(String),
    #[error("staging: {0}")]
    Staging(StagingStoreError),
    #[error("task store: {0}")]
    Store(TaskStoreError),
    #[error("worker queue unavailable")]
    QueueUnavailable,
}

#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    #[error("task not found: {0}")]
    NotFound(String),
    #[error("task is {0}, output not available")]
    NotCompleted(TaskStatus),
    #[error("task store: {0}")]
    Store(TaskStoreError),
    #[error("staging: {0}")]
    Staging(StagingStoreError),
}
