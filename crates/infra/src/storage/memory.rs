//! Process-local session store

use async_trait::async_trait;
use parking_lot::Mutex;
use partnerdesk_core::SessionStore;
use partnerdesk_domain::{Result, StoredSession};

/// Session held in memory only; lost when the process exits.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    session: Mutex<StoredSession>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing session.
    pub fn with_session(session: StoredSession) -> Self {
        Self { session: Mutex::new(session) }
    }

    /// Copy of what is currently stored.
    pub fn snapshot(&self) -> StoredSession {
        self.session.lock().clone()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self) -> Result<StoredSession> {
        Ok(self.snapshot())
    }

    async fn save(&self, session: &StoredSession) -> Result<()> {
        *self.session.lock() = session.clone();
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        *self.session.lock() = StoredSession::default();
        Ok(())
    }
}
