//! Keyword based chapter detection over a speech transcript.
//!
//! A cue opens a new chapter when one of the language's chapter words
//! ("chapter", "prologue", "epilogue" and their translations) appears within
//! its first few words. Each chapter runs until the next one starts; the last
//! one runs to the end of the transcript.

use crate::application::ports::ChapterizerError;
use crate::domain::{ChapterBoundary, Timecode, Transcript};

/// Markers closer than this to the previous one are treated as the same heading.
const MIN_CHAPTER_GAP_MS: u64 = 10_000;
/// Audio before the first marker longer than this becomes an untyped intro.
const INTRO_THRESHOLD_MS: u64 = 1_000;
const HEADING_WORDS: usize = 3;

pub const CHAPTER: &str = "chapter";
pub const PROLOGUE: &str = "prologue";
pub const EPILOGUE: &str = "epilogue";

struct Keywords {
    chapter: &'static [&'static str],
    prologue: &'static [&'static str],
    epilogue: &'static [&'static str],
}

impl Keywords {
    fn for_language(language: &str) -> Option<Self> {
        let base = language.split(['-', '_']).next().unwrap_or_default();
        let keywords = match base.to_lowercase().as_str() {
            "en" => Keywords {
                chapter: &["chapter"],
                prologue: &["prologue"],
                epilogue: &["epilogue"],
            },
            "de" => Keywords {
                chapter: &["kapitel"],
                prologue: &["prolog"],
                epilogue: &["epilog"],
            },
            "fr" => Keywords {
                chapter: &["chapitre"],
                prologue: &["prologue"],
                epilogue: &["épilogue", "epilogue"],
            },
            "es" | "pt" => Keywords {
                chapter: &["capítulo", "capitulo"],
                prologue: &["prólogo", "prologo"],
                epilogue: &["epílogo", "epilogo"],
            },
            "it" => Keywords {
                chapter: &["capitolo"],
                prologue: &["prologo"],
                epilogue: &["epilogo"],
            },
            "nl" => Keywords {
                chapter: &["hoofdstuk"],
                prologue: &["proloog"],
                epilogue: &["epiloog"],
            },
            "ru" => Keywords {
                chapter: &["глава"],
                prologue: &["пролог"],
                epilogue: &["эпилог"],
            },
            _ => return None,
        };
        Some(keywords)
    }

    fn classify(&self, text: &str) -> Option<&'static str> {
        let lowered = text.to_lowercase();
        lowered
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .take(HEADING_WORDS)
            .find_map(|word| {
                if self.chapter.contains(&word) {
                    Some(CHAPTER)
                } else if self.prologue.contains(&word) {
                    Some(PROLOGUE)
                } else if self.epilogue.contains(&word) {
                    Some(EPILOGUE)
                } else {
                    None
                }
            })
    }
}

pub fn supports_language(language: &str) -> bool {
    Keywords::for_language(language).is_some()
}

pub fn detect_chapters(
    transcript: &Transcript,
    language: &str,
) -> Result<Vec<ChapterBoundary>, ChapterizerError> {
    let keywords = Keywords::for_language(language)
        .ok_or_else(|| ChapterizerError::UnsupportedLanguage(language.to_string()))?;

    let mut markers: Vec<(Timecode, &'static str)> = Vec::new();
    for cue in &transcript.cues {
        let Some(kind) = keywords.classify(&cue.text) else {
            continue;
        };
        if let Some((previous, _)) = markers.last() {
            if cue.start.millis_since(*previous) < MIN_CHAPTER_GAP_MS {
                continue;
            }
        }
        markers.push((cue.start, kind));
    }

    let Some((first_start, _)) = markers.first().copied() else {
        return Ok(Vec::new());
    };

    let transcript_end = transcript.end();
    let mut chapters = Vec::with_capacity(markers.len() + 1);
    if first_start.as_millis() > INTRO_THRESHOLD_MS {
        chapters.push(ChapterBoundary::new(Timecode::ZERO, first_start, None));
    }

    for (idx, (start, kind)) in markers.iter().enumerate() {
        let end = markers
            .get(idx + 1)
            .map(|(next, _)| *next)
            .unwrap_or(transcript_end)
            .max(*start);
        chapters.push(ChapterBoundary::new(*start, end, Some(kind.to_string())));
    }

    Ok(chapters)
}
