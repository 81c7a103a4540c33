use thiserror::Error;

#[derive(Debug, Error)]
pub enum MjError {
    #[error("Argument error: {0}")]
    Argument(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Reference image error: {0}")]
    ReferenceDownload(String),
    #[error("API error: {0}")]
    Api(String),
    #[error("Transfer error: {0}")]
    Transfer(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Host error: {0}")]
    Host(String),
}

impl MjError {
    /// Message surfaced to the end user when a cycle fails. API errors
    /// already carry the upstream status text, so the raw payload is used.
    pub fn user_message(&self) -> &str {
        match self {
            MjError::Argument(msg)
            | MjError::Config(msg)
            | MjError::ReferenceDownload(msg)
            | MjError::Api(msg)
            | MjError::Transfer(msg)
            | MjError::Storage(msg)
            | MjError::Host(msg) => msg,
        }
    }
}

pub type Result<T> = std::result::Result<T, MjError>;
