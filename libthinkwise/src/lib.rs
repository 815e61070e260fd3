//! ThinkWise - state core for a single-page learning platform
//!
//! This library holds the in-memory stores behind the platform's screens
//! (authentication, user progress, admin content), the reviewer builder,
//! the lesson runner and the export formatters.

pub mod config;
pub mod error;
pub mod export;
pub mod forms;
pub mod lesson;
pub mod logging;
pub mod reviewer;
pub mod seed;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use config::Config;
pub use error::{AuthError, ConfigError, ExportError, Result, ThinkwiseError};
pub use export::{DownloadCenter, ExportKind, FileSink};
pub use forms::{ModuleForm, QuestionForm};
pub use lesson::{Lesson, LessonOutcome, LessonRun};
pub use reviewer::{Filter, ReviewerBuilder};
pub use store::{AdminStore, AuthStore, ProgressStore};
pub use types::{
    Answer, Difficulty, Module, Question, QuestionKind, ReviewSession, ReviewSettings, User,
    UserProfile, UserProgress,
};
