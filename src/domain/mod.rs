mod chapter;
mod media;
mod model_catalog;
mod pipeline_stage;
mod task;
mod task_failure;
mod task_id;
mod task_status;
mod timecode;
mod working_directory;

pub use chapter::{ChapterBoundary, Transcript, TranscriptCue};
pub use media::{AudioMetadata, CoverArt};
pub use model_catalog::{InvalidOptions, ModelCatalog, ModelSize, ProcessingOptions};
pub use pipeline_stage::PipelineStage;
pub use task::{COMPLETED_MESSAGE, TaskRecord, TaskTransitionError};
pub use task_failure::{FailureKind, TaskFailure};
pub use task_id::TaskId;
pub use task_status::TaskStatus;
pub use timecode::{Timecode, TimecodeParseError};
pub use working_directory::{WorkingDirectory, sanitize_filename};
