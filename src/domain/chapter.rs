use serde::{Deserialize, Serialize};

use super::Timecode;

/// One output segment of the audiobook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterBoundary {
    pub start: Timecode,
    pub end: Timecode,
    pub chapter_type: Option<String>,
}

impl ChapterBoundary {
    pub fn new(start: Timecode, end: Timecode, chapter_type: Option<String>) -> Self {
        Self {
            start,
            end,
            chapter_type,
        }
    }
}

/// A single recognized speech segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptCue {
    pub start: Timecode,
    pub end: Timecode,
    pub text: String,
}

/// Raw timecode data produced by speech recognition, before chapter parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    pub cues: Vec<TranscriptCue>,
}

impl Transcript {
    pub fn new(cues: Vec<TranscriptCue>) -> Self {
        Self { cues }
    }

    /// End of the last recognized cue.
    pub fn end(&self) -> Timecode {
        self.cues
            .iter()
            .map(|c| c.end)
            .max()
            .unwrap_or(Timecode::ZERO)
    }
}
