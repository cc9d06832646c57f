use chapterize_api::domain::{Timecode, TimecodeParseError};
use chapterize_api::infrastructure::chapterizer::srt::parse_srt;

const SAMPLE: &str = "1
00:00:00,000 --> 00:00:02,500
hello there

2
00:00:05,000 --> 00:00:07,250
chapter one
the beginning
";

#[test]
fn given_srt_text_when_parsing_then_cues_in_order() {
    let transcript = parse_srt(SAMPLE).unwrap();

    assert_eq!(transcript.cues.len(), 2);
    assert_eq!(transcript.cues[0].start, Timecode::ZERO);
    assert_eq!(transcript.cues[0].end, Timecode::from_millis(2_500));
    assert_eq!(transcript.cues[0].text, "hello there");
    assert_eq!(transcript.end(), Timecode::from_millis(7_250));
}

#[test]
fn given_multi_line_cue_when_parsing_then_lines_joined_with_space() {
    let transcript = parse_srt(SAMPLE).unwrap();

    assert_eq!(transcript.cues[1].text, "chapter one the beginning");
}

#[test]
fn given_crlf_and_bom_when_parsing_then_same_result() {
    let windows = format!("\u{feff}{}", SAMPLE.replace('\n', "\r\n"));

    assert_eq!(parse_srt(&windows).unwrap(), parse_srt(SAMPLE).unwrap());
}

#[test]
fn given_block_without_timing_when_parsing_then_skipped() {
    let input = "garbage\n\n1\n00:00:01,000 --> 00:00:02,000\nok\n";

    let transcript = parse_srt(input).unwrap();

    assert_eq!(transcript.cues.len(), 1);
    assert_eq!(transcript.cues[0].text, "ok");
}

#[test]
fn given_bad_timestamp_when_parsing_then_error() {
    let input = "1\n00:00:xx,000 --> 00:00:02,000\noops\n";

    assert!(matches!(
        parse_srt(input),
        Err(TimecodeParseError::Malformed(_))
    ));
}

#[test]
fn given_empty_input_when_parsing_then_empty_transcript() {
    assert!(parse_srt("").unwrap().cues.is_empty());
}
