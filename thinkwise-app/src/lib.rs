//! thinkwise-app library
//!
//! The application shell: which screen is showing, and the context that
//! wires the auth, progress and admin stores to it.

pub mod app;
pub mod context;
pub mod error;

// Re-export commonly used types
pub use app::{reduce, Action, AppState, AuthScreen, Screen, View, ViewToken};
pub use context::AppContext;
pub use error::{AppError, Result};
