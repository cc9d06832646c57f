use async_trait::async_trait;

use crate::domain::{TaskId, TaskRecord};

/// Keyed storage for task status records.
#[async_trait]
pub trait TaskStore: Send + Sync {
    async fn get(&self, id: TaskId) -> Result<Option<TaskRecord>, TaskStoreError>;

    async fn set(&self, id: TaskId, record: TaskRecord) -> Result<(), TaskStoreError>;

    async fn list(&self) -> Result<Vec<(TaskId, TaskRecord)>, TaskStoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TaskStoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("write rejected: {0}")]
    WriteRejected(String),
}
