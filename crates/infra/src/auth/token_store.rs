//! Session token store
//!
//! Holds the current [`StoredSession`] in memory and mirrors every change to
//! the configured [`SessionStore`] backend.
//!
//! Reads take a short `parking_lot` read lock and clone, so request code
//! never waits on storage I/O. Writes are serialised behind one async mutex:
//! each write computes the next session from the latest snapshot, publishes it
//! in memory and then persists it.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use partnerdesk_core::{PhoneMemory, SessionStore};
use partnerdesk_domain::{Result, StoredSession, TokenPair};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::storage::MemorySessionStore;

pub struct TokenStore {
    backend: Arc<dyn SessionStore>,
    current: RwLock<StoredSession>,
    writer: Mutex<()>,
}

impl TokenStore {
    /// Create an empty store over `backend` without reading it.
    ///
    /// Call [`TokenStore::initialize`] to pick up a persisted session.
    pub fn new(backend: Arc<dyn SessionStore>) -> Self {
        Self { backend, current: RwLock::new(StoredSession::default()), writer: Mutex::new(()) }
    }

    /// Store backed by a fresh [`MemorySessionStore`].
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemorySessionStore::new()))
    }

    /// Create a store and load whatever the backend holds.
    ///
    /// # Errors
    /// Returns the backend's error if the persisted session cannot be read.
    pub async fn open(backend: Arc<dyn SessionStore>) -> Result<Self> {
        let store = Self::new(backend);
        store.initialize().await?;
        Ok(store)
    }

    /// Load the persisted session into memory.
    ///
    /// Returns whether the loaded session carries an access token.
    pub async fn initialize(&self) -> Result<bool> {
        let _guard = self.writer.lock().await;
        let session = self.backend.load().await?;
        let authenticated = session.is_authenticated();
        *self.current.write() = session;

        if authenticated {
            info!("Token store initialized with existing session");
        } else {
            debug!("No existing session found");
        }
        Ok(authenticated)
    }

    /// Copy of the current session.
    pub fn snapshot(&self) -> StoredSession {
        self.current.read().clone()
    }

    pub fn access_token(&self) -> Option<String> {
        self.current.read().access_token().map(str::to_owned)
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.current.read().refresh_token().map(str::to_owned)
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.read().is_authenticated()
    }

    /// Replace the token pair (after a successful login).
    pub async fn store_tokens(&self, tokens: TokenPair) -> Result<()> {
        self.update(|session| session.tokens = Some(tokens)).await?;
        info!("Tokens stored");
        Ok(())
    }

    /// Swap in a refreshed access token.
    ///
    /// The refresh token is replaced only when the backend rotated it.
    pub async fn update_access_token(
        &self,
        access_token: String,
        rotated_refresh_token: Option<String>,
    ) -> Result<()> {
        self.update(|session| {
            let refresh_token = rotated_refresh_token
                .or_else(|| session.tokens.as_ref().and_then(|t| t.refresh_token.clone()));
            session.tokens = Some(TokenPair::new(access_token, refresh_token));
        })
        .await?;
        debug!("Access token refreshed");
        Ok(())
    }

    /// Drop both tokens. The remembered phone survives.
    pub async fn clear_tokens(&self) -> Result<()> {
        self.update(|session| session.tokens = None).await?;
        info!("Tokens cleared");
        Ok(())
    }

    async fn update(&self, mutate: impl FnOnce(&mut StoredSession)) -> Result<()> {
        let _guard = self.writer.lock().await;

        let mut next = self.current.read().clone();
        mutate(&mut next);
        *self.current.write() = next.clone();

        if next == StoredSession::default() {
            self.backend.clear().await
        } else {
            self.backend.save(&next).await
        }
    }
}

#[async_trait]
impl PhoneMemory for TokenStore {
    async fn remembered_phone(&self) -> Result<Option<String>> {
        Ok(self.current.read().remembered_phone.clone())
    }

    async fn remember_phone(&self, phone: &str) -> Result<()> {
        let phone = phone.to_string();
        self.update(|session| session.remembered_phone = Some(phone)).await
    }

    async fn forget_phone(&self) -> Result<()> {
        self.update(|session| session.remembered_phone = None).await
    }
}
