use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("GITHUB_TOKEN is not set")]
    MissingCredential,

    #[error("no contribution years recorded for {login}")]
    NoData { login: String },

    #[error("fetch failed: {0}")]
    Fetch(String),

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("{path} is missing the streak card markers")]
    MissingMarkers { path: String },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    pub fn fetch(message: impl Into<String>) -> Self {
        Self::Fetch(message.into())
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse(message.into())
    }

    pub fn missing_markers(path: &Path) -> Self {
        Self::MissingMarkers {
            path: path.display().to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
