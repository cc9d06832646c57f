use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::catalog::default_catalog;
use super::chapter_parser;
use super::external_chapterizer::chapter_labels;
use crate::application::ports::{Chapterizer, ChapterizerError};
use crate::domain::{
    AudioMetadata, ChapterBoundary, CoverArt, ModelCatalog, ModelSize, Timecode, Transcript,
    TranscriptCue,
};

const PLACEHOLDER_EXTENSION: &str = "mp3";

/// Offline backend that fakes recognition with a fixed transcript.
///
/// Chapter detection runs the real keyword parser over that transcript, and
/// splitting writes one small placeholder file per chapter.
pub struct MockChapterizer {
    catalog: ModelCatalog,
}

impl MockChapterizer {
    pub fn new() -> Self {
        Self {
            catalog: default_catalog(),
        }
    }

    pub fn transcript() -> Transcript {
        let cue = |start: u64, end: u64, text: &str| TranscriptCue {
            start: Timecode::from_secs(start),
            end: Timecode::from_secs(end),
            text: text.to_string(),
        };
        Transcript::new(vec![
            cue(0, 4, "this audiobook is read for you"),
            cue(5, 8, "chapter one"),
            cue(9, 60, "it was a bright cold day in april"),
            cue(61, 64, "chapter two"),
            cue(65, 120, "and the clocks were striking thirteen"),
        ])
    }
}

impl Default for MockChapterizer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Chapterizer for MockChapterizer {
    async fn generate_timecodes(
        &self,
        audio_file: &Path,
        language: &str,
        model_size: ModelSize,
    ) -> Result<Transcript, ChapterizerError> {
        if self.catalog.model_for(language, model_size).is_none() {
            return Err(ChapterizerError::ModelUnavailable {
                language: language.to_string(),
                size: model_size,
            });
        }
        tokio::fs::metadata(audio_file).await?;
        Ok(Self::transcript())
    }

    async fn parse_timecodes(
        &self,
        transcript: &Transcript,
        language: &str,
    ) -> Result<Vec<ChapterBoundary>, ChapterizerError> {
        chapter_parser::detect_chapters(transcript, language)
    }

    async fn extract_metadata(&self, audio_file: &Path) -> Result<AudioMetadata, ChapterizerError> {
        let title = audio_file
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let mut tags = BTreeMap::new();
        tags.insert("title".to_string(), title);
        tags.insert("artist".to_string(), "Unknown".to_string());
        Ok(AudioMetadata::new(tags))
    }

    async fn extract_coverart(
        &self,
        _audio_file: &Path,
    ) -> Result<Option<CoverArt>, ChapterizerError> {
        Ok(None)
    }

    async fn split_file(
        &self,
        _audio_file: &Path,
        chapters: &[ChapterBoundary],
        _metadata: &AudioMetadata,
        _cover_art: Option<&CoverArt>,
        output_dir: &Path,
    ) -> Result<Vec<PathBuf>, ChapterizerError> {
        tokio::fs::create_dir_all(output_dir).await?;

        let mut written = Vec::with_capacity(chapters.len());
        for (idx, (chapter, label)) in chapters.iter().zip(chapter_labels(chapters)).enumerate() {
            let path = output_dir.join(format!(
                "{:02} - {}.{}",
                idx + 1,
                label,
                PLACEHOLDER_EXTENSION
            ));
            let body = format!("{} {}-{}\n", label, chapter.start, chapter.end);
            tokio::fs::write(&path, body).await?;
            written.push(path);
        }
        Ok(written)
    }

    fn catalog(&self) -> ModelCatalog {
        self.catalog.clone()
    }
}
