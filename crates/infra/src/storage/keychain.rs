//! Platform keychain session store
//!
//! Stores the whole session as one JSON secret under a fixed
//! service/account pair (macOS Keychain, Windows Credential Manager, Linux
//! Secret Service). Keychain calls block, so they run on the blocking pool.

use async_trait::async_trait;
use keyring::Entry;
use partnerdesk_core::SessionStore;
use partnerdesk_domain::{PartnerDeskError, Result, StoredSession};
use tracing::debug;

use crate::errors::InfraError;

#[derive(Debug, Clone)]
pub struct KeychainSessionStore {
    service: String,
    account: String,
}

impl KeychainSessionStore {
    pub fn new(service: impl Into<String>, account: impl Into<String>) -> Self {
        Self { service: service.into(), account: account.into() }
    }

    fn entry(service: &str, account: &str) -> Result<Entry> {
        Entry::new(service, account).map_err(|err| InfraError::from(err).into())
    }

    async fn blocking<T, F>(&self, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(Entry) -> Result<T> + Send + 'static,
    {
        let service = self.service.clone();
        let account = self.account.clone();

        tokio::task::spawn_blocking(move || op(Self::entry(&service, &account)?))
            .await
            .map_err(|err| PartnerDeskError::Internal(format!("keychain task failed: {err}")))?
    }
}

#[async_trait]
impl SessionStore for KeychainSessionStore {
    async fn load(&self) -> Result<StoredSession> {
        debug!(service = %self.service, account = %self.account, "Loading session from keychain");

        let secret = self
            .blocking(|entry| match entry.get_password() {
                Ok(secret) => Ok(Some(secret)),
                Err(keyring::Error::NoEntry) => Ok(None),
                Err(err) => Err(InfraError::from(err).into()),
            })
            .await?;

        match secret {
            Some(secret) => serde_json::from_str(&secret).map_err(|err| {
                PartnerDeskError::Storage(format!("keychain session is corrupt: {err}"))
            }),
            None => Ok(StoredSession::default()),
        }
    }

    async fn save(&self, session: &StoredSession) -> Result<()> {
        let secret = serde_json::to_string(session)
            .map_err(|err| PartnerDeskError::Internal(format!("session encode: {err}")))?;

        self.blocking(move |entry| {
            entry.set_password(&secret).map_err(|err| InfraError::from(err).into())
        })
        .await?;

        debug!(service = %self.service, "Session stored in keychain");
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.blocking(|entry| match entry.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(err) => Err(InfraError::from(err).into()),
        })
        .await?;

        debug!(service = %self.service, "Session removed from keychain");
        Ok(())
    }
}
