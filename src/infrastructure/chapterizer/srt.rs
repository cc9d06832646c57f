//! SubRip (`.srt`) reader for transcriber output.

use crate::domain::{Timecode, TimecodeParseError, Transcript, TranscriptCue};

const ARROW: &str = "-->";

/// Parses SRT text into cues. Blocks without a timing line are skipped;
/// a timing line with an unreadable timestamp is an error.
pub fn parse_srt(input: &str) -> Result<Transcript, TimecodeParseError> {
    let normalized = input.trim_start_matches('\u{feff}').replace("\r\n", "\n");
    let mut cues = Vec::new();

    for block in normalized.split("\n\n") {
        let mut lines = block.lines().map(str::trim).filter(|l| !l.is_empty());

        let Some(timing) = lines.by_ref().find(|l| l.contains(ARROW)) else {
            continue;
        };
        let (start, end) = parse_timing(timing)?;
        let text = lines.collect::<Vec<_>>().join(" ");

        cues.push(TranscriptCue { start, end, text });
    }

    Ok(Transcript::new(cues))
}

fn parse_timing(line: &str) -> Result<(Timecode, Timecode), TimecodeParseError> {
    let (start, rest) = line
        .split_once(ARROW)
        .ok_or_else(|| TimecodeParseError::Malformed(line.to_string()))?;
    // positional hints ("X1:...") may follow the end timestamp
    let end = rest.split_whitespace().next().unwrap_or_default();
    Ok((start.trim().parse()?, end.parse()?))
}
