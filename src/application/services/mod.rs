mod chapterize_worker;
mod task_service;

pub use chapterize_worker::{
    ChapterizeMessage, ChapterizePipeline, ChapterizeWorker, PipelineError,
};
pub use task_service::{DownloadError, SubmitError, TaskService};
