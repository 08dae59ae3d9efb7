use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VideoprofError {
    /// The attribute could not produce a value for this file. Recoverable:
    /// analysis skips the attribute instead of failing.
    #[error("Missing value for {attribute}: {reason}")]
    MissingAttribute { attribute: String, reason: String },

    #[error("Failed to extract metadata from '{}': {message}", path.display())]
    Extraction { path: PathBuf, message: String },

    #[error("Config error: {0}")]
    Config(String),

    #[error("Unknown level: {0}")]
    UnknownLevel(String),

    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Cache error: {0}")]
    Cache(#[from] rusqlite::Error),

    #[error("Scan error: {0}")]
    Scan(#[from] walkdir::Error),
}

impl VideoprofError {
    pub fn missing(attribute: impl Into<String>, reason: impl Into<String>) -> Self {
        VideoprofError::MissingAttribute {
            attribute: attribute.into(),
            reason: reason.into(),
        }
    }

    pub fn is_missing_attribute(&self) -> bool {
        matches!(self, VideoprofError::MissingAttribute { .. })
    }
}

pub type Result<T> = std::result::Result<T, VideoprofError>;
