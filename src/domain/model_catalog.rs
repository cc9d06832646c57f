use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelSize {
    Small,
    Large,
}

impl ModelSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelSize::Small => "small",
            ModelSize::Large => "large",
        }
    }
}

impl FromStr for ModelSize {
    type Err = InvalidOptions;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "small" => Ok(ModelSize::Small),
            "large" => Ok(ModelSize::Large),
            other => Err(InvalidOptions::UnknownModelSize(other.to_string())),
        }
    }
}

impl fmt::Display for ModelSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Languages and speech models the processing backend can use.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelCatalog {
    pub languages: Vec<String>,
    pub small_models: Vec<String>,
    pub large_models: Vec<String>,
}

impl ModelCatalog {
    pub fn supports_language(&self, language: &str) -> bool {
        self.languages.iter().any(|l| l.eq_ignore_ascii_case(language))
    }

    /// Picks the model id for `language` from the list matching `size`.
    ///
    /// Small models are named `vosk-model-small-<lang>-<version>`, large ones
    /// `vosk-model-<lang>-<version>`.
    pub fn model_for(&self, language: &str, size: ModelSize) -> Option<&str> {
        let language = language.to_lowercase();
        let (models, prefix) = match size {
            ModelSize::Small => (&self.small_models, format!("vosk-model-small-{}-", language)),
            ModelSize::Large => (&self.large_models, format!("vosk-model-{}-", language)),
        };
        models
            .iter()
            .find(|m| m.to_lowercase().starts_with(&prefix))
            .map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidOptions {
    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),
    #[error("unknown model size: {0} (expected small or large)")]
    UnknownModelSize(String),
}

/// Per-upload processing parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessingOptions {
    pub language: String,
    pub model_size: ModelSize,
}

impl ProcessingOptions {
    pub const DEFAULT_LANGUAGE: &'static str = "en-us";
    pub const DEFAULT_MODEL_SIZE: &'static str = "small";

    pub fn parse(
        language: &str,
        model_type: &str,
        catalog: &ModelCatalog,
    ) -> Result<Self, InvalidOptions> {
        let model_size = model_type.parse::<ModelSize>()?;
        let language = language.trim().to_lowercase();
        if !catalog.supports_language(&language) {
            return Err(InvalidOptions::UnsupportedLanguage(language));
        }
        Ok(Self {
            language,
            model_size,
        })
    }
}
