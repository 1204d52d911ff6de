//! Error handling module for the Docker image checker

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CheckerError>;

#[derive(Error, Debug)]
pub enum CheckerError {
    /// Missing credentials, unusable registry address, empty input
    #[error("Configuration error: {0}")]
    Config(String),

    /// Login rejected, login endpoint unreachable, or token missing from the response
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// A single image reference line could not be understood
    #[error("Image parsing error: {0}")]
    ImageParsing(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
