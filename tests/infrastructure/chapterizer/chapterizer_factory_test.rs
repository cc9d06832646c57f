use chapterize_api::infrastructure::chapterizer::{ChapterizerFactory, ChapterizerFactoryError};
use chapterize_api::presentation::config::{ChapterizerProvider, ChapterizerSettings};

fn settings(provider: ChapterizerProvider) -> ChapterizerSettings {
    ChapterizerSettings {
        provider,
        transcriber_program: "vosk-transcriber".to_string(),
        ffmpeg_program: "ffmpeg".to_string(),
        ffprobe_program: "ffprobe".to_string(),
    }
}

#[test]
fn given_mock_provider_when_creating_then_catalog_is_available() {
    let chapterizer = ChapterizerFactory::create(&settings(ChapterizerProvider::Mock)).unwrap();

    assert!(chapterizer.catalog().supports_language("en-us"));
}

#[test]
fn given_external_provider_when_creating_then_succeeds() {
    assert!(ChapterizerFactory::create(&settings(ChapterizerProvider::External)).is_ok());
}

#[test]
fn given_external_provider_without_ffmpeg_when_creating_then_missing_program() {
    let mut config = settings(ChapterizerProvider::External);
    config.ffmpeg_program = "  ".to_string();

    let result = ChapterizerFactory::create(&config);

    assert!(matches!(
        result,
        Err(ChapterizerFactoryError::MissingProgram("ffmpeg"))
    ));
}
