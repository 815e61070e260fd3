//! Error types for ThinkWise

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ThinkwiseError>;

#[derive(Error, Debug)]
pub enum ThinkwiseError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    /// A form or builder was submitted with missing or inconsistent fields.
    /// The message is meant to be shown to the user as-is.
    #[error("{0}")]
    Validation(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl ThinkwiseError {
    /// Returns the appropriate exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            ThinkwiseError::Validation(_) | ThinkwiseError::InvalidInput(_) => 3,
            ThinkwiseError::Auth(_) => 2,
            ThinkwiseError::Export(ExportError::NothingToExport(_)) => 4,
            ThinkwiseError::Export(_) => 1,
            ThinkwiseError::Config(_) => 1,
        }
    }

    /// Message suitable for a blocking user-facing alert
    pub fn alert_message(&self) -> String {
        match self {
            ThinkwiseError::Validation(msg) => msg.clone(),
            ThinkwiseError::Export(ExportError::NothingToExport(msg)) => msg.clone(),
            other => other.to_string(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing required field: {0}")]
    MissingField(String),
}

/// Reasons an authentication attempt can end without a signed-in user
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Credentials rejected: {0}")]
    Rejected(String),

    #[error("Authentication cancelled")]
    Cancelled,
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("{0}")]
    NothingToExport(String),

    #[error("Record {index} is not a flat object")]
    NotARecord { index: usize },

    #[error("Serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to write {filename}: {source}")]
    Write {
        filename: String,
        #[source]
        source: std::io::Error,
    },
}
