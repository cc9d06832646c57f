use std::path::Path;

use chapterize_api::application::ports::{Chapterizer, ChapterizerError};
use chapterize_api::domain::{ChapterBoundary, ModelSize, Timecode};
use chapterize_api::infrastructure::chapterizer::{
    ExternalChapterizer, chapter_labels, default_catalog,
};

fn chapterizer(transcriber: &str) -> ExternalChapterizer {
    ExternalChapterizer::new(transcriber, "ffmpeg", "ffprobe", default_catalog())
}

#[test]
fn given_typed_boundaries_when_labelling_then_only_chapters_are_numbered() {
    let at = Timecode::from_secs;
    let chapters = vec![
        ChapterBoundary::new(at(0), at(5), None),
        ChapterBoundary::new(at(5), at(60), Some("prologue".into())),
        ChapterBoundary::new(at(60), at(120), Some("chapter".into())),
        ChapterBoundary::new(at(120), at(180), Some("chapter".into())),
        ChapterBoundary::new(at(180), at(200), Some("epilogue".into())),
    ];

    assert_eq!(
        chapter_labels(&chapters),
        vec!["Intro", "Prologue", "Chapter 1", "Chapter 2", "Epilogue"]
    );
}

#[tokio::test]
async fn given_language_without_large_model_when_generating_then_model_unavailable() {
    let result = chapterizer("vosk-transcriber")
        .generate_timecodes(Path::new("/tmp/book.mp3"), "pl", ModelSize::Large)
        .await;

    assert!(matches!(
        result,
        Err(ChapterizerError::ModelUnavailable { size: ModelSize::Large, .. })
    ));
}

#[tokio::test]
async fn given_missing_program_when_generating_then_tool_failed() {
    let dir = tempfile::TempDir::new().unwrap();
    let audio = dir.path().join("book.mp3");
    std::fs::write(&audio, b"ID3").unwrap();

    let result = chapterizer("chapterize-test-no-such-transcriber")
        .generate_timecodes(&audio, "en-us", ModelSize::Small)
        .await;

    match result {
        Err(ChapterizerError::ToolFailed { tool, .. }) => {
            assert_eq!(tool, "chapterize-test-no-such-transcriber")
        }
        other => panic!("expected ToolFailed, got {:?}", other),
    }
}

#[tokio::test]
async fn given_no_chapters_when_splitting_then_nothing_is_run() {
    let dir = tempfile::TempDir::new().unwrap();
    let output = dir.path().join("output");

    let written = chapterizer("vosk-transcriber")
        .split_file(
            &dir.path().join("book.mp3"),
            &[],
            &Default::default(),
            None,
            &output,
        )
        .await
        .unwrap();

    assert!(written.is_empty());
    assert!(output.is_dir());
}

#[test]
fn given_external_chapterizer_when_asking_catalog_then_returns_configured_catalog() {
    assert_eq!(chapterizer("x").catalog(), default_catalog());
}

#[cfg(unix)]
#[tokio::test]
async fn given_tagged_source_when_splitting_then_only_title_and_track_are_overridden() {
    use std::collections::BTreeMap;
    use std::os::unix::fs::PermissionsExt;

    use chapterize_api::domain::AudioMetadata;

    let dir = tempfile::TempDir::new().unwrap();
    let log = dir.path().join("ffmpeg-args.log");
    let ffmpeg = dir.path().join("fake-ffmpeg");
    std::fs::write(
        &ffmpeg,
        format!("#!/bin/sh\necho \"$@\" >> '{}'\n", log.display()),
    )
    .unwrap();
    std::fs::set_permissions(&ffmpeg, std::fs::Permissions::from_mode(0o755)).unwrap();

    let chapterizer = ExternalChapterizer::new(
        "vosk-transcriber",
        ffmpeg.to_string_lossy(),
        "ffprobe",
        default_catalog(),
    );
    let metadata = AudioMetadata::new(BTreeMap::from([
        ("artist".to_string(), "Frank Herbert".to_string()),
        ("title".to_string(), "Dune".to_string()),
    ]));
    let chapters = vec![ChapterBoundary::new(
        Timecode::ZERO,
        Timecode::from_secs(30),
        Some("chapter".into()),
    )];

    chapterizer
        .split_file(
            &dir.path().join("book.mp3"),
            &chapters,
            &metadata,
            None,
            &dir.path().join("output"),
        )
        .await
        .unwrap();

    let args = std::fs::read_to_string(&log).unwrap();
    assert!(args.contains("-map_metadata 0"));
    assert!(args.contains("title=Chapter 1"));
    assert!(args.contains("track=1/1"));
    assert!(!args.contains("artist="));
    assert!(!args.contains("title=Dune"));
}
