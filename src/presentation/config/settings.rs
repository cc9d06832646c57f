use std::path::PathBuf;

use ::config::{Config, ConfigError, File};
use serde::{Deserialize, Serialize};

use super::Environment;
use crate::infrastructure::observability::DEFAULT_FILTER;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub storage: StorageSettings,
    pub chapterizer: ChapterizerSettings,
    pub worker: WorkerSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub max_upload_size_bytes: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageSettings {
    /// Parent of every per-task working directory.
    pub work_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChapterizerSettings {
    pub provider: ChapterizerProvider,
    pub transcriber_program: String,
    pub ffmpeg_program: String,
    pub ffprobe_program: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChapterizerProvider {
    External,
    Mock,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerSettings {
    pub queue_capacity: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub enable_json: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("{0}")]
    Environment(String),
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerSettings {
                host: "0.0.0.0".to_string(),
                port: 8000,
                max_upload_size_bytes: 2 * 1024 * 1024 * 1024,
            },
            storage: StorageSettings {
                work_dir: PathBuf::from("./data/tasks"),
            },
            chapterizer: ChapterizerSettings {
                provider: ChapterizerProvider::External,
                transcriber_program: "vosk-transcriber".to_string(),
                ffmpeg_program: "ffmpeg".to_string(),
                ffprobe_program: "ffprobe".to_string(),
            },
            worker: WorkerSettings { queue_capacity: 64 },
            logging: LoggingSettings {
                level: DEFAULT_FILTER.to_string(),
                enable_json: false,
            },
        }
    }
}

impl Settings {
    /// Layers built-in defaults, `appsettings.<env>.toml` and `APP__SECTION__KEY`
    /// environment variables, in that order.
    pub fn load() -> Result<(Environment, Self), SettingsError> {
        dotenvy::dotenv().ok();

        let environment = Environment::from_env().map_err(SettingsError::Environment)?;

        let settings = Config::builder()
            .add_source(Config::try_from(&Settings::default())?)
            .add_source(
                File::with_name(&format!("appsettings.{}", environment.as_str())).required(false),
            )
            .add_source(
                ::config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        Ok((environment, settings))
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
