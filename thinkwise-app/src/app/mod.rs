//! Application module
//!
//! - Actions: what can happen
//! - State: which screen is showing and what it remembers
//! - Reducer: pure function (State, Action) -> State

pub mod actions;
pub mod reducer;
pub mod state;

// Re-export commonly used types
pub use actions::{Action, AuthScreen, View, ViewToken};
pub use reducer::reduce;
pub use state::{AppState, Screen};
