mod environment;
mod settings;

pub use environment::{ENVIRONMENT_VAR, Environment};
pub use settings::{
    ChapterizerProvider, ChapterizerSettings, LoggingSettings, ServerSettings, Settings,
    SettingsError, StorageSettings, WorkerSettings,
};
