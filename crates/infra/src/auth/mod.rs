//! Session token lifecycle
//!
//! - [`TokenStore`]: in-memory snapshot of the session over a durable
//!   `SessionStore`, with single-writer updates
//! - [`RefreshCoordinator`]: exchanges the refresh token for a new access
//!   token, coalescing concurrent refreshes

pub mod refresh;
pub mod token_store;

pub use refresh::{RefreshCoordinator, RefreshState};
pub use token_store::TokenStore;
