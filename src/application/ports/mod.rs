mod chapterizer;
mod staging_store;
mod task_store;

pub use chapterizer::{Chapterizer, ChapterizerError};
pub use staging_store::{StagingStore, StagingStoreError};
pub use task_store::{TaskStore, TaskStoreError};
