use async_trait::async_trait;
use dashmap::DashMap;
use tracing::instrument;

use crate::application::ports::{TaskStore, TaskStoreError};
use crate::domain::{TaskId, TaskRecord};

/// Process-local task store. Entries live until the process exits.
#[derive(Default)]
pub struct InMemoryTaskStore {
    tasks: DashMap<TaskId, TaskRecord>,
}

impl InMemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskStore for InMemoryTaskStore {
    #[instrument(skip(self), fields(task_id = %id))]
    async fn get(&self, id: TaskId) -> Result<Option<TaskRecord>, TaskStoreError> {
        Ok(self.tasks.get(&id).map(|entry| entry.value().clone()))
    }

    #[instrument(skip(self, record), fields(task_id = %id, status = %record.status))]
    async fn set(&self, id: TaskId, record: TaskRecord) -> Result<(), TaskStoreError> {
        self.tasks.insert(id, record);
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<(TaskId, TaskRecord)>, TaskStoreError> {
        Ok(self
            .tasks
            .iter()
            .map(|entry| (*entry.key(), entry.value().clone()))
            .collect())
    }
}
