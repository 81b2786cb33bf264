//! Port interfaces for session persistence
//!
//! `SessionStore` is the raw durable backend (file, keychain, memory).
//! `PhoneMemory` is the narrow view the login flow needs.

use async_trait::async_trait;
use partnerdesk_domain::{Result, StoredSession};

/// Durable key-value storage for the client session
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Load the persisted session; an absent session loads as the default.
    async fn load(&self) -> Result<StoredSession>;

    /// Replace the persisted session.
    async fn save(&self, session: &StoredSession) -> Result<()>;

    /// Remove everything persisted.
    async fn clear(&self) -> Result<()>;
}

/// Remembered phone number for the hotel-partner login
#[async_trait]
pub trait PhoneMemory: Send + Sync {
    async fn remembered_phone(&self) -> Result<Option<String>>;

    async fn remember_phone(&self, phone: &str) -> Result<()>;

    /// The only operation that clears a remembered phone.
    async fn forget_phone(&self) -> Result<()>;
}
