//! Error types for thinkwise-app

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    /// Error raised by a store, builder or exporter
    #[error(transparent)]
    Core(#[from] libthinkwise::ThinkwiseError),

    /// The command needs a signed-in user
    #[error("Please sign in first.")]
    NotSignedIn,

    /// The command needs an open lesson
    #[error("No lesson is open.")]
    NoLesson,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<libthinkwise::AuthError> for AppError {
    fn from(e: libthinkwise::AuthError) -> Self {
        AppError::Core(e.into())
    }
}

impl AppError {
    /// Message for the alert overlay
    pub fn alert_message(&self) -> String {
        match self {
            AppError::Core(e) => e.alert_message(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
