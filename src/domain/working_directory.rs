use std::path::{Path, PathBuf};

use super::TaskId;

const OUTPUT_DIR: &str = "output";
const FALLBACK_FILENAME: &str = "upload.bin";

/// Scratch directory owned by a single task: the uploaded source file plus
/// an `output/` directory for the split chapters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkingDirectory {
    task_id: TaskId,
    root: PathBuf,
}

impl WorkingDirectory {
    pub fn new(task_id: TaskId, base: &Path) -> Self {
        Self {
            task_id,
            root: base.join(task_id.to_string()),
        }
    }

    pub fn task_id(&self) -> TaskId {
        self.task_id
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn output_dir(&self) -> PathBuf {
        self.root.join(OUTPUT_DIR)
    }

    pub fn file_path(&self, filename: &str) -> PathBuf {
        self.root.join(filename)
    }

    /// Object key prefix of this directory relative to the staging base.
    pub fn prefix(&self) -> String {
        self.task_id.to_string()
    }

    pub fn object_key(&self, filename: &str) -> String {
        format!("{}/{}", self.prefix(), filename)
    }

    pub fn output_prefix(&self) -> String {
        format!("{}/{}", self.prefix(), OUTPUT_DIR)
    }
}

/// Reduces a client supplied filename to a safe single path component.
pub fn sanitize_filename(raw: &str) -> String {
    let base = raw.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let trimmed = cleaned.trim_matches('.');

    if trimmed.is_empty() || trimmed.chars().all(|c| c == '_') {
        FALLBACK_FILENAME.to_string()
    } else {
        trimmed.to_string()
    }
}
