use thiserror::Error;

#[derive(Error, Debug)]
pub enum EcoError {
    #[error("Save slot '{0}' is empty or incomplete")]
    EmptySlot(String),

    #[error("Invalid save slot name '{0}'")]
    InvalidSlot(String),

    #[error("Incompatible snapshot version (simulator: {expected}, snapshot: {found})")]
    VersionMismatch { expected: String, found: String },

    #[error("Unrecognized snapshot format: {0}")]
    UnrecognizedFormat(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, EcoError>;
