use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Settings parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid settings: {0}")]
    Invalid(String),
}

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("High-score file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Error, Debug)]
pub enum AudioError {
    #[error("Music file not found: {0}")]
    Missing(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Audio output unavailable: {0}")]
    Output(String),

    #[error("Could not decode music: {0}")]
    Decode(String),

    #[error("Built without the `audio` feature")]
    Unsupported,
}

#[derive(Error, Debug)]
pub enum GamepadError {
    #[error("Gamepad backend failed: {0}")]
    Backend(String),

    #[error("Built without the `gamepad` feature")]
    Unsupported,
}
