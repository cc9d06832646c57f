use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::domain::{
    AudioMetadata, ChapterBoundary, CoverArt, ModelCatalog, ModelSize, TimecodeParseError,
    Transcript,
};

/// Audio analysis backend: speech recognition, chapter detection,
/// tag/cover extraction and splitting.
#[async_trait]
pub trait Chapterizer: Send + Sync {
    async fn generate_timecodes(
        &self,
        audio_file: &Path,
        language: &str,
        model_size: ModelSize,
    ) -> Result<Transcript, ChapterizerError>;

    async fn parse_timecodes(
        &self,
        transcript: &Transcript,
        language: &str,
    ) -> Result<Vec<ChapterBoundary>, ChapterizerError>;

    async fn extract_metadata(&self, audio_file: &Path) -> Result<AudioMetadata, ChapterizerError>;

    async fn extract_coverart(&self, audio_file: &Path)
    -> Result<Option<CoverArt>, ChapterizerError>;

    /// Writes one file per chapter into `output_dir` and returns their paths.
    async fn split_file(
        &self,
        audio_file: &Path,
        chapters: &[ChapterBoundary],
        metadata: &AudioMetadata,
        cover_art: Option<&CoverArt>,
        output_dir: &Path,
    ) -> Result<Vec<PathBuf>, ChapterizerError>;

    fn catalog(&self) -> ModelCatalog;
}

#[derive(Debug, thiserror::Error)]
pub enum ChapterizerError {
    #[error("no {size} model available for language {language}")]
    ModelUnavailable { language: String, size: ModelSize },
    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),
    #[error("{tool} failed: {detail}")]
    ToolFailed { tool: String, detail: String },
    #[error("invalid tool output: {0}")]
    InvalidOutput(String),
    #[error("invalid timecode: {0}")]
    Timecode(#[from] TimecodeParseError),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}
