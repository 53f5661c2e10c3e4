use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, KanaFreqError>;

#[derive(Debug, Error)]
pub enum KanaFreqError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing input file: {}", path.display())]
    MissingInput { path: PathBuf },

    #[error("Failed to write file {path}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<toml::de::Error> for KanaFreqError {
    fn from(err: toml::de::Error) -> Self {
        KanaFreqError::Config(format!("TOML parse error: {}", err))
    }
}

impl From<serde_json::Error> for KanaFreqError {
    fn from(err: serde_json::Error) -> Self {
        KanaFreqError::Config(format!("JSON error: {}", err))
    }
}
