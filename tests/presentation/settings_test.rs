use std::path::PathBuf;

use chapterize_api::infrastructure::observability::DEFAULT_FILTER;
use chapterize_api::presentation::config::{
    ChapterizerProvider, ChapterizerSettings, Environment, Settings,
};

#[test]
fn given_environment_names_when_parsing_then_case_insensitive() {
    assert_eq!(Environment::try_from("LOCAL".to_string()), Ok(Environment::Local));
    assert_eq!(Environment::try_from("test".to_string()), Ok(Environment::Test));
    assert_eq!(
        Environment::try_from("production".to_string()),
        Ok(Environment::Prod)
    );
    assert!(Environment::try_from("staging".to_string()).is_err());
}

#[test]
fn given_environment_when_displayed_then_matches_settings_file_suffix() {
    assert_eq!(Environment::Local.to_string(), "local");
    assert_eq!(Environment::Prod.as_str(), "prod");
}

#[test]
fn given_default_settings_when_created_then_production_defaults() {
    let settings = Settings::default();

    assert_eq!(settings.server.port, 8000);
    assert_eq!(settings.bind_address(), "0.0.0.0:8000");
    assert_eq!(settings.storage.work_dir, PathBuf::from("./data/tasks"));
    assert_eq!(settings.chapterizer.provider, ChapterizerProvider::External);
    assert!(settings.worker.queue_capacity > 0);
    assert_eq!(settings.logging.level, DEFAULT_FILTER);
    assert!(!settings.logging.enable_json);
}

#[test]
fn given_lowercase_provider_when_deserializing_then_parsed() {
    let raw = r#"{
        "provider": "mock",
        "transcriber_program": "vosk-transcriber",
        "ffmpeg_program": "ffmpeg",
        "ffprobe_program": "ffprobe"
    }"#;

    let settings: ChapterizerSettings = serde_json::from_str(raw).unwrap();

    assert_eq!(settings.provider, ChapterizerProvider::Mock);
}
