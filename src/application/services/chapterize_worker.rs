use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::Instrument;

use crate::application::ports::{Chapterizer, ChapterizerError, TaskStore, TaskStoreError};
use crate::domain::{
    ChapterBoundary, FailureKind, PipelineStage, ProcessingOptions, TaskFailure, TaskId,
    TaskRecord, TaskTransitionError, WorkingDirectory,
};

pub struct ChapterizeMessage {
    pub task_id: TaskId,
    pub workspace: WorkingDirectory,
    pub source_file: PathBuf,
    pub options: ProcessingOptions,
}

/// Runs the four chapterization stages for one task and keeps its record current.
#[derive(Clone)]
pub struct ChapterizePipeline {
    chapterizer: Arc<dyn Chapterizer>,
    task_store: Arc<dyn TaskStore>,
}

impl ChapterizePipeline {
    pub fn new(chapterizer: Arc<dyn Chapterizer>, task_store: Arc<dyn TaskStore>) -> Self {
        Self {
            chapterizer,
            task_store,
        }
    }

    /// Processes one task to a terminal state. Failures are recorded on the
    /// task before being returned.
    pub async fn execute(&self, msg: ChapterizeMessage) -> Result<TaskRecord, PipelineError> {
        let task_id = msg.task_id;
        let mut record = match self.task_store.get(task_id).await {
            Ok(Some(record)) => record,
            Ok(None) => TaskRecord::started(),
            Err(e) => {
                tracing::warn!(error = %e, "Could not load task record, starting fresh");
                TaskRecord::started()
            }
        };

        match self.run_stages(&msg, &mut record).await {
            Ok(chapters) => {
                record.complete(chapters)?;
                self.task_store
                    .set(task_id, record.clone())
                    .await
                    .map_err(PipelineError::Store)?;
                Ok(record)
            }
            Err(e) => {
                self.record_failure(task_id, &mut record, e.failure()).await;
                Err(e)
            }
        }
    }

    async fn run_stages(
        &self,
        msg: &ChapterizeMessage,
        record: &mut TaskRecord,
    ) -> Result<Vec<ChapterBoundary>, PipelineError> {
        let source = msg.source_file.as_path();
        let language = msg.options.language.as_str();

        self.enter(msg.task_id, record, PipelineStage::GeneratingTimecodes)
            .await?;
        let transcript = self
            .chapterizer
            .generate_timecodes(source, language, msg.options.model_size)
            .await
            .map_err(PipelineError::TimecodeGeneration)?;
        tracing::debug!(cues = transcript.cues.len(), "Timecodes generated");

        self.enter(msg.task_id, record, PipelineStage::ParsingChapters)
            .await?;
        let chapters = self
            .chapterizer
            .parse_timecodes(&transcript, language)
            .await
            .map_err(PipelineError::ChapterParsing)?;
        tracing::debug!(chapters = chapters.len(), "Chapters parsed");

        self.enter(msg.task_id, record, PipelineStage::SplittingAudiobook)
            .await?;
        let metadata = self
            .chapterizer
            .extract_metadata(source)
            .await
            .map_err(PipelineError::MetadataExtraction)?;
        let cover_art = self
            .chapterizer
            .extract_coverart(source)
            .await
            .map_err(PipelineError::CoverartExtraction)?;
        let outputs = self
            .chapterizer
            .split_file(
                source,
                &chapters,
                &metadata,
                cover_art.as_ref(),
                &msg.workspace.output_dir(),
            )
            .await
            .map_err(PipelineError::Splitting)?;
        tracing::debug!(files = outputs.len(), "Audiobook split");

        Ok(chapters)
    }

    async fn enter(
        &self,
        task_id: TaskId,
        record: &mut TaskRecord,
        stage: PipelineStage,
    ) -> Result<(), PipelineError> {
        record.advance(stage)?;
        tracing::debug!(stage = %stage, progress = record.progress, "Task stage transition");
        self.task_store
            .set(task_id, record.clone())
            .await
            .map_err(PipelineError::Store)
    }

    async fn record_failure(&self, task_id: TaskId, record: &mut TaskRecord, failure: TaskFailure) {
        if let Err(e) = record.fail(failure) {
            tracing::warn!(error = %e, "Failure arrived for a finished task");
            return;
        }
        if let Err(e) = self.task_store.set(task_id, record.clone()).await {
            tracing::error!(error = %e, "Failed to record task failure");
        }
    }
}

/// Receives submitted tasks and runs each one as its own tokio task.
pub struct ChapterizeWorker {
    receiver: mpsc::Receiver<ChapterizeMessage>,
    pipeline: ChapterizePipeline,
}

impl ChapterizeWorker {
    pub fn new(
        receiver: mpsc::Receiver<ChapterizeMessage>,
        chapterizer: Arc<dyn Chapterizer>,
        task_store: Arc<dyn TaskStore>,
    ) -> Self {
        Self {
            receiver,
            pipeline: ChapterizePipeline::new(chapterizer, task_store),
        }
    }

    pub async fn run(mut self) {
        tracing::info!("Chapterize worker started");
        while let Some(msg) = self.receiver.recv().await {
            let span = tracing::info_span!(
                "chapterize_task",
                task_id = %msg.task_id,
                language = %msg.options.language,
                model_size = %msg.options.model_size,
            );
            let pipeline = self.pipeline.clone();

            tokio::spawn(
                async move {
                    match pipeline.execute(msg).await {
                        Ok(record) => tracing::info!(
                            chapters = record.chapters.as_ref().map_or(0, Vec::len),
                            "Chapterization completed"
                        ),
                        Err(e) => tracing::error!(error = %e, "Chapterization failed"),
                    }
                }
                .instrument(span),
            );
        }
        tracing::info!("Chapterize worker stopped: channel closed");
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("timecode generation: {0}")]
    TimecodeGeneration(ChapterizerError),
    #[error("chapter parsing: {0}")]
    ChapterParsing(ChapterizerError),
    #[error("metadata extraction: {0}")]
    MetadataExtraction(ChapterizerError),
    #[error("cover art extraction: {0}")]
    CoverartExtraction(ChapterizerError),
    #[error("splitting: {0}")]
    Splitting(ChapterizerError),
    #[error("task store: {0}")]
    Store(TaskStoreError),
    #[error("task transition: {0}")]
    Transition(#[from] TaskTransitionError),
}

impl PipelineError {
    /// Tagged failure recorded on the task. The detail is the underlying
    /// error text without the stage prefix.
    pub fn failure(&self) -> TaskFailure {
        match self {
            PipelineError::TimecodeGeneration(e) => {
                TaskFailure::new(FailureKind::TimecodeGeneration, e.to_string())
            }
            PipelineError::ChapterParsing(e) => {
                TaskFailure::new(FailureKind::ChapterParsing, e.to_string())
            }
            PipelineError::MetadataExtraction(e) => {
                TaskFailure::new(FailureKind::MetadataExtraction, e.to_string())
            }
            PipelineError::CoverartExtraction(e) => {
                TaskFailure::new(FailureKind::CoverartExtraction, e.to_string())
            }
            PipelineError::Splitting(e) => TaskFailure::new(FailureKind::Splitting, e.to_string()),
            PipelineError::Store(e) => TaskFailure::new(FailureKind::Internal, e.to_string()),
            PipelineError::Transition(e) => TaskFailure::new(FailureKind::Internal, e.to_string()),
        }
    }
}
