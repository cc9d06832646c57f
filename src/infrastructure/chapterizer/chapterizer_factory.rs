use std::sync::Arc;

use crate::application::ports::Chapterizer;
use crate::presentation::config::{ChapterizerProvider, ChapterizerSettings};

use super::catalog::default_catalog;
use super::{ExternalChapterizer, MockChapterizer};

pub struct ChapterizerFactory;

#[derive(Debug, thiserror::Error)]
pub enum ChapterizerFactoryError {
    #[error("missing program path for {0}")]
    MissingProgram(&'static str),
}

impl ChapterizerFactory {
    pub fn create(
        settings: &ChapterizerSettings,
    ) -> Result<Arc<dyn Chapterizer>, ChapterizerFactoryError> {
        match settings.provider {
            ChapterizerProvider::External => {
                let transcriber = required(&settings.transcriber_program, "transcriber")?;
                let ffmpeg = required(&settings.ffmpeg_program, "ffmpeg")?;
                let ffprobe = required(&settings.ffprobe_program, "ffprobe")?;
                tracing::info!(transcriber, ffmpeg, ffprobe, "Using external chapterizer");
                Ok(Arc::new(ExternalChapterizer::new(
                    transcriber,
                    ffmpeg,
                    ffprobe,
                    default_catalog(),
                )))
            }
            ChapterizerProvider::Mock => {
                tracing::warn!("Using mock chapterizer, output files are placeholders");
                Ok(Arc::new(MockChapterizer::new()))
            }
        }
    }
}

fn required<'a>(value: &'a str, name: &'static str) -> Result<&'a str, ChapterizerFactoryError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ChapterizerFactoryError::MissingProgram(name));
    }
    Ok(value)
}
