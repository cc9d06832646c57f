use super::chapter_parser;
use crate::domain::ModelCatalog;

const LANGUAGES: &[&str] = &[
    "en-us", "en-in", "cn", "ru", "fr", "de", "es", "pt", "it", "nl", "ja", "hi", "uk", "tr",
    "vn", "ko", "pl", "ca",
];

const SMALL_MODELS: &[&str] = &[
    "vosk-model-small-en-us-0.15",
    "vosk-model-small-en-in-0.4",
    "vosk-model-small-cn-0.22",
    "vosk-model-small-ru-0.22",
    "vosk-model-small-fr-0.22",
    "vosk-model-small-de-0.15",
    "vosk-model-small-es-0.42",
    "vosk-model-small-pt-0.3",
    "vosk-model-small-it-0.22",
    "vosk-model-small-nl-0.22",
    "vosk-model-small-ja-0.22",
    "vosk-model-small-hi-0.22",
    "vosk-model-small-uk-v3-small",
    "vosk-model-small-tr-0.3",
    "vosk-model-small-vn-0.4",
    "vosk-model-small-ko-0.22",
    "vosk-model-small-pl-0.22",
    "vosk-model-small-ca-0.4",
];

const LARGE_MODELS: &[&str] = &[
    "vosk-model-en-us-0.22",
    "vosk-model-en-in-0.5",
    "vosk-model-cn-0.22",
    "vosk-model-ru-0.42",
    "vosk-model-fr-0.22",
    "vosk-model-de-0.21",
    "vosk-model-es-0.42",
    "vosk-model-pt-fb-v0.1.1-20220516_2113",
    "vosk-model-it-0.22",
    "vosk-model-ja-0.22",
    "vosk-model-hi-0.22",
    "vosk-model-uk-v3",
    "vosk-model-vn-0.4",
];

/// Vosk languages and models known to the external transcriber, limited to
/// languages the chapter parser has heading keywords for.
pub fn default_catalog() -> ModelCatalog {
    let languages: Vec<String> = LANGUAGES
        .iter()
        .filter(|l| chapter_parser::supports_language(l))
        .map(|l| l.to_string())
        .collect();

    ModelCatalog {
        small_models: models_for(SMALL_MODELS, "vosk-model-small-", &languages),
        large_models: models_for(LARGE_MODELS, "vosk-model-", &languages),
        languages,
    }
}

fn models_for(models: &[&str], prefix: &str, languages: &[String]) -> Vec<String> {
    models
        .iter()
        .filter(|m| {
            languages
                .iter()
                .any(|l| m.starts_with(&format!("{}{}-", prefix, l)))
        })
        .map(|m| m.to_string())
        .collect()
}
