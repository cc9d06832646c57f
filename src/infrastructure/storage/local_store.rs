use std::io::{self, Cursor, Write};
use std::path::PathBuf;
use std::sync::Arc;

use bytes::Bytes;
use futures::stream::BoxStream;
use futures::{StreamExt, TryStreamExt};
use object_store::local::LocalFileSystem;
use object_store::path::Path as StorePath;
use object_store::{MultipartUpload, ObjectMeta, ObjectStore, PutPayload};
use zip::write::SimpleFileOptions;

use crate::application::ports::{StagingStore, StagingStoreError};
use crate::domain::{TaskId, WorkingDirectory};

/// Working directories under a local base path, one subdirectory per task.
pub struct LocalStagingStore {
    base_path: PathBuf,
    inner: Arc<LocalFileSystem>,
}

impl LocalStagingStore {
    pub fn new(base_path: PathBuf) -> Result<Self, StagingStoreError> {
        std::fs::create_dir_all(&base_path).map_err(StagingStoreError::Io)?;
        let base_path = std::fs::canonicalize(&base_path).map_err(StagingStoreError::Io)?;
        let fs = LocalFileSystem::new_with_prefix(&base_path)
            .map_err(|e| StagingStoreError::UploadFailed(e.to_string()))?;
        Ok(Self {
            base_path,
            inner: Arc::new(fs),
        })
    }

    async fn output_objects(
        &self,
        workspace: &WorkingDirectory,
    ) -> Result<Vec<ObjectMeta>, StagingStoreError> {
        let prefix = StorePath::from(workspace.output_prefix());
        let mut objects: Vec<ObjectMeta> = self
            .inner
            .list(Some(&prefix))
            .try_collect()
            .await
            .map_err(|e| StagingStoreError::DownloadFailed(e.to_string()))?;
        objects.sort_by(|a, b| a.location.cmp(&b.location));
        Ok(objects)
    }
}

#[async_trait::async_trait]
impl StagingStore for LocalStagingStore {
    fn workspace(&self, task_id: TaskId) -> WorkingDirectory {
        WorkingDirectory::new(task_id, &self.base_path)
    }

    async fn create_workspace(
        &self,
        task_id: TaskId,
    ) -> Result<WorkingDirectory, StagingStoreError> {
        let workspace = self.workspace(task_id);
        tokio::fs::create_dir_all(workspace.output_dir()).await?;
        Ok(workspace)
    }

    async fn store(
        &self,
        workspace: &WorkingDirectory,
        filename: &str,
        mut stream: BoxStream<'_, Result<Bytes, io::Error>>,
    ) -> Result<u64, StagingStoreError> {
        let store_path = StorePath::from(workspace.object_key(filename));
        let mut upload = self
            .inner
            .put_multipart(&store_path)
            .await
            .map_err(|e| StagingStoreError::UploadFailed(e.to_string()))?;

        let mut total_bytes: u64 = 0;

        while let Some(chunk) = stream.next().await {
            let bytes = match chunk {
                Ok(b) => b,
                Err(e) => {
                    let _ = upload.abort().await;
                    return Err(StagingStoreError::SourceRead(e));
                }
            };
            if bytes.is_empty() {
                continue;
            }
            total_bytes += bytes.len() as u64;
            if let Err(e) = upload.put_part(PutPayload::from(bytes)).await {
                let _ = upload.abort().await;
                return Err(StagingStoreError::UploadFailed(e.to_string()));
            }
        }

        upload
            .complete()
            .await
            .map_err(|e| StagingStoreError::UploadFailed(e.to_string()))?;

        Ok(total_bytes)
    }

    async fn archive_output(
        &self,
        workspace: &WorkingDirectory,
    ) -> Result<Vec<u8>, StagingStoreError> {
        let mut entries = Vec::new();
        for meta in self.output_objects(workspace).await? {
            let Some(name) = meta.location.filename().map(str::to_string) else {
                continue;
            };
            let data = self
                .inner
                .get(&meta.location)
                .await
                .map_err(|e| StagingStoreError::NotFound(e.to_string()))?
                .bytes()
                .await
                .map_err(|e| StagingStoreError::DownloadFailed(e.to_string()))?;
            entries.push((name, data));
        }

        tokio::task::spawn_blocking(move || build_zip(entries))
            .await
            .map_err(|e| StagingStoreError::ArchiveFailed(e.to_string()))?
    }

    async fn discard(&self, workspace: &WorkingDirectory) -> Result<(), StagingStoreError> {
        match tokio::fs::remove_dir_all(workspace.root()).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StagingStoreError::DeleteFailed(e.to_string())),
        }
    }
}

fn build_zip(entries: Vec<(String, Bytes)>) -> Result<Vec<u8>, StagingStoreError> {
    // chapter audio is already compressed
    let options =
        SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));

    for (name, data) in entries {
        writer
            .start_file(name, options)
            .map_err(|e| StagingStoreError::ArchiveFailed(e.to_string()))?;
        writer.write_all(&data)?;
    }

    let cursor = writer
        .finish()
        .map_err(|e| StagingStoreError::ArchiveFailed(e.to_string()))?;
    Ok(cursor.into_inner())
}
