use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::process::Command;
use tracing::{debug, info, instrument};

use super::chapter_parser::{self, CHAPTER, EPILOGUE, PROLOGUE};
use super::srt::parse_srt;
use crate::application::ports::{Chapterizer, ChapterizerError};
use crate::domain::{
    AudioMetadata, ChapterBoundary, CoverArt, ModelCatalog, ModelSize, Transcript,
};

const TRANSCRIPT_FILE: &str = "timecodes.srt";
const DEFAULT_EXTENSION: &str = "mp3";

/// Production backend driving a Vosk-style transcriber, `ffprobe` and `ffmpeg`
/// as child processes.
pub struct ExternalChapterizer {
    transcriber_program: String,
    ffmpeg_program: String,
    ffprobe_program: String,
    catalog: ModelCatalog,
}

#[derive(Debug, Deserialize)]
struct ProbeFormat {
    #[serde(default)]
    format: Option<ProbeFormatSection>,
}

#[derive(Debug, Deserialize)]
struct ProbeFormatSection {
    #[serde(default)]
    tags: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct ProbeStreams {
    #[serde(default)]
    streams: Vec<serde_json::Value>,
}

impl ExternalChapterizer {
    pub fn new(
        transcriber_program: impl Into<String>,
        ffmpeg_program: impl Into<String>,
        ffprobe_program: impl Into<String>,
        catalog: ModelCatalog,
    ) -> Self {
        Self {
            transcriber_program: transcriber_program.into(),
            ffmpeg_program: ffmpeg_program.into(),
            ffprobe_program: ffprobe_program.into(),
            catalog,
        }
    }

    /// Runs `program` to completion and returns its stdout.
    async fn run(&self, program: &str, args: Vec<OsString>) -> Result<Vec<u8>, ChapterizerError> {
        debug!(program, ?args, "Running external tool");

        let output = Command::new(program)
            .args(&args)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| ChapterizerError::ToolFailed {
                tool: program.to_string(),
                detail: e.to_string(),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let detail = if stderr.is_empty() {
                format!("exited with {}", output.status)
            } else {
                stderr
            };
            return Err(ChapterizerError::ToolFailed {
                tool: program.to_string(),
                detail,
            });
        }

        Ok(output.stdout)
    }
}

fn args<I, S>(items: I) -> Vec<OsString>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    items.into_iter().map(Into::into).collect()
}

/// Human label for each boundary: "Intro", "Prologue", "Chapter 3", ...
pub fn chapter_labels(chapters: &[ChapterBoundary]) -> Vec<String> {
    let mut chapter_no = 0;
    chapters
        .iter()
        .map(|c| match c.chapter_type.as_deref() {
            Some(CHAPTER) => {
                chapter_no += 1;
                format!("Chapter {}", chapter_no)
            }
            Some(PROLOGUE) => "Prologue".to_string(),
            Some(EPILOGUE) => "Epilogue".to_string(),
            Some(other) => other.to_string(),
            None => "Intro".to_string(),
        })
        .collect()
}

fn tag_to_string(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    }
}

#[async_trait]
impl Chapterizer for ExternalChapterizer {
    #[instrument(skip(self), fields(program = %self.transcriber_program))]
    async fn generate_timecodes(
        &self,
        audio_file: &Path,
        language: &str,
        model_size: ModelSize,
    ) -> Result<Transcript, ChapterizerError> {
        let model = self.catalog.model_for(language, model_size).ok_or_else(|| {
            ChapterizerError::ModelUnavailable {
                language: language.to_string(),
                size: model_size,
            }
        })?;

        let output_path = audio_file
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join(TRANSCRIPT_FILE);

        let mut argv = args(["--lang", language, "--model-name", model, "--input"]);
        argv.push(audio_file.as_os_str().to_owned());
        argv.extend(args(["--output-type", "srt", "--output"]));
        argv.push(output_path.as_os_str().to_owned());

        self.run(&self.transcriber_program, argv).await?;

        let raw = tokio::fs::read_to_string(&output_path).await?;
        let transcript = parse_srt(&raw)?;
        info!(cues = transcript.cues.len(), model, "Timecodes generated");
        Ok(transcript)
    }

    async fn parse_timecodes(
        &self,
        transcript: &Transcript,
        language: &str,
    ) -> Result<Vec<ChapterBoundary>, ChapterizerError> {
        chapter_parser::detect_chapters(transcript, language)
    }

    #[instrument(skip(self))]
    async fn extract_metadata(&self, audio_file: &Path) -> Result<AudioMetadata, ChapterizerError> {
        let mut argv = args(["-v", "quiet", "-print_format", "json", "-show_format"]);
        argv.push(audio_file.as_os_str().to_owned());

        let stdout = self.run(&self.ffprobe_program, argv).await?;
        let probe: ProbeFormat = serde_json::from_slice(&stdout)
            .map_err(|e| ChapterizerError::InvalidOutput(format!("ffprobe format: {}", e)))?;

        let tags = probe
            .format
            .map(|f| {
                f.tags
                    .into_iter()
                    .map(|(k, v)| (k, tag_to_string(v)))
                    .collect()
            })
            .unwrap_or_default();
        Ok(AudioMetadata::new(tags))
    }

    #[instrument(skip(self))]
    async fn extract_coverart(
        &self,
        audio_file: &Path,
    ) -> Result<Option<CoverArt>, ChapterizerError> {
        let mut probe_args = args([
            "-v",
            "quiet",
            "-print_format",
            "json",
            "-select_streams",
            "v",
            "-show_streams",
        ]);
        probe_args.push(audio_file.as_os_str().to_owned());

        let stdout = self.run(&self.ffprobe_program, probe_args).await?;
        let probe: ProbeStreams = serde_json::from_slice(&stdout)
            .map_err(|e| ChapterizerError::InvalidOutput(format!("ffprobe streams: {}", e)))?;
        if probe.streams.is_empty() {
            debug!("No embedded picture");
            return Ok(None);
        }

        let mut extract_args = args(["-v", "error", "-i"]);
        extract_args.push(audio_file.as_os_str().to_owned());
        extract_args.extend(args([
            "-an", "-map", "0:v:0", "-c:v", "copy", "-f", "image2pipe", "-",
        ]));

        let data = self.run(&self.ffmpeg_program, extract_args).await?;
        if data.is_empty() {
            return Ok(None);
        }
        Ok(Some(CoverArt::from_bytes(data)))
    }

    #[instrument(
        skip(self, chapters, metadata, cover_art),
        fields(chapters = chapters.len(), source_tags = metadata.tags.len())
    )]
    async fn split_file(
        &self,
        audio_file: &Path,
        chapters: &[ChapterBoundary],
        metadata: &AudioMetadata,
        cover_art: Option<&CoverArt>,
        output_dir: &Path,
    ) -> Result<Vec<PathBuf>, ChapterizerError> {
        tokio::fs::create_dir_all(output_dir).await?;

        let extension = audio_file
            .extension()
            .and_then(|e| e.to_str())
            .filter(|e| !e.is_empty())
            .unwrap_or(DEFAULT_EXTENSION)
            .to_lowercase();

        // Kept beside the output directory so it never lands in the archive.
        let cover_path = match cover_art {
            Some(cover) => {
                let path = output_dir.with_file_name(format!("cover.{}", cover.extension));
                tokio::fs::write(&path, &cover.data).await?;
                Some(path)
            }
            None => None,
        };

        let labels = chapter_labels(chapters);
        let total = chapters.len();
        let mut written = Vec::with_capacity(total);

        for (idx, (chapter, label)) in chapters.iter().zip(&labels).enumerate() {
            let track = idx + 1;
            let target = output_dir.join(format!("{:02} - {}.{}", track, label, extension));

            let mut argv = args(["-y", "-v", "error", "-ss"]);
            argv.push(chapter.start.to_string().into());
            argv.push("-to".into());
            argv.push(chapter.end.to_string().into());
            argv.push("-i".into());
            argv.push(audio_file.as_os_str().to_owned());
            if let Some(cover) = &cover_path {
                argv.push("-i".into());
                argv.push(cover.as_os_str().to_owned());
            }
            argv.extend(args(["-map", "0:a", "-c:a", "copy"]));
            if cover_path.is_some() {
                argv.extend(args([
                    "-map",
                    "1:v",
                    "-c:v",
                    "copy",
                    "-disposition:v:0",
                    "attached_pic",
                ]));
            }
            // source tags come through -map_metadata; only title and track differ
            argv.extend(args(["-map_metadata", "0"]));
            argv.push("-metadata".into());
            argv.push(format!("title={}", label).into());
            argv.push("-metadata".into());
            argv.push(format!("track={}/{}", track, total).into());
            argv.push(target.as_os_str().to_owned());

            self.run(&self.ffmpeg_program, argv).await?;
            debug!(track, file = %target.display(), "Chapter written");
            written.push(target);
        }

        info!(files = written.len(), "Audiobook split");
        Ok(written)
    }

    fn catalog(&self) -> ModelCatalog {
        self.catalog.clone()
    }
}
