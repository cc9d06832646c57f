use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ChapterBoundary, PipelineStage, TaskFailure, TaskStatus};

pub const COMPLETED_MESSAGE: &str = "Processing completed";

/// Current state of one chapterization task, as reported to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub status: TaskStatus,
    pub progress: f32,
    pub message: String,
    pub stage: Option<PipelineStage>,
    pub chapters: Option<Vec<ChapterBoundary>>,
    pub failure: Option<TaskFailure>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TaskTransitionError {
    #[error("task already {0}")]
    AlreadyFinished(TaskStatus),
    #[error("cannot move from stage {from} back to {to}")]
    Backwards {
        from: PipelineStage,
        to: PipelineStage,
    },
}

impl TaskRecord {
    pub fn started() -> Self {
        let now = Utc::now();
        let stage = PipelineStage::Starting;
        Self {
            status: TaskStatus::Processing,
            progress: stage.progress(),
            message: stage.message().to_string(),
            stage: Some(stage),
            chapters: None,
            failure: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_terminal()
    }

    pub fn advance(&mut self, stage: PipelineStage) -> Result<(), TaskTransitionError> {
        self.ensure_processing()?;
        if let Some(current) = self.stage {
            if stage < current {
                return Err(TaskTransitionError::Backwards {
                    from: current,
                    to: stage,
                });
            }
        }

        self.stage = Some(stage);
        self.progress = self.progress.max(stage.progress());
        self.message = stage.message().to_string();
        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn complete(&mut self, chapters: Vec<ChapterBoundary>) -> Result<(), TaskTransitionError> {
        self.ensure_processing()?;
        self.status = TaskStatus::Completed;
        self.progress = 1.0;
        self.message = COMPLETED_MESSAGE.to_string();
        self.chapters = Some(chapters);
        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn fail(&mut self, failure: TaskFailure) -> Result<(), TaskTransitionError> {
        self.ensure_processing()?;
        self.status = TaskStatus::Failed;
        self.progress = 0.0;
        self.message = if failure.detail.trim().is_empty() {
            format!("{} failed", failure.kind)
        } else {
            failure.detail.clone()
        };
        self.failure = Some(failure);
        self.updated_at = Utc::now();
        Ok(())
    }

    fn ensure_processing(&self) -> Result<(), TaskTransitionError> {
        if self.is_finished() {
            return Err(TaskTransitionError::AlreadyFinished(self.status));
        }
        Ok(())
    }
}
