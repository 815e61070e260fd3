//! In-memory stores
//!
//! Each store follows the same shape:
//!
//! - an immutable state value,
//! - an action enum describing every mutation,
//! - a pure `reduce(state, action) -> state` function with no side effects,
//! - a container struct that owns the state, applies actions through
//!   `dispatch`, and exposes one narrow method per command.
//!
//! Containers are plain values handed to whoever needs them; there is no
//! global store.

pub mod admin;
pub mod auth;
pub mod collection;
pub mod progress;

// Re-export commonly used types
pub use admin::{AdminAction, AdminState, AdminStore};
pub use auth::{AuthAction, AuthPhase, AuthRequest, AuthState, AuthStore, Authenticator, SimulatedAuthenticator};
pub use collection::Collection;
pub use progress::{ProgressAction, ProgressStore};
