use std::fmt;

use serde::{Deserialize, Serialize};

/// Stages of the chapterization pipeline, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    Starting,
    GeneratingTimecodes,
    ParsingChapters,
    SplittingAudiobook,
}

impl PipelineStage {
    /// Progress reported while the stage is running.
    pub fn progress(&self) -> f32 {
        match self {
            PipelineStage::Starting => 0.0,
            PipelineStage::GeneratingTimecodes => 0.3,
            PipelineStage::ParsingChapters => 0.6,
            PipelineStage::SplittingAudiobook => 0.8,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            PipelineStage::Starting => "Starting processing",
            PipelineStage::GeneratingTimecodes => "Generating timecodes",
            PipelineStage::ParsingChapters => "Parsing chapters",
            PipelineStage::SplittingAudiobook => "Splitting audiobook",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineStage::Starting => "starting",
            PipelineStage::GeneratingTimecodes => "generating_timecodes",
            PipelineStage::ParsingChapters => "parsing_chapters",
            PipelineStage::SplittingAudiobook => "splitting_audiobook",
        }
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
