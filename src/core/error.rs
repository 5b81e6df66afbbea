use thiserror::Error;

#[derive(Error, Debug)]
pub enum DrillError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

impl DrillError {
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        DrillError::NotFound { kind, id: id.into() }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, DrillError::NotFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, DrillError>;
