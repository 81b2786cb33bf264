//! Application context - dependency injection container

use std::sync::Arc;

use partnerdesk_core::{PartnerApi, PhoneMemory};
use partnerdesk_domain::{Config, Result};
use partnerdesk_infra::{open_session_store, HotelApiClient, TokenStore};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Application context - holds the session and the backend client
pub struct AppContext {
    pub config: Config,
    pub tokens: Arc<TokenStore>,
    pub api: Arc<HotelApiClient>,
    cancel: CancellationToken,
}

impl AppContext {
    /// Open the configured session store and build the backend client.
    ///
    /// # Errors
    /// Returns an error if the stored session cannot be read or the base URL
    /// is invalid.
    pub async fn new(config: Config) -> Result<Self> {
        let backend = open_session_store(&config.storage);
        let tokens = Arc::new(TokenStore::open(backend).await?);
        debug!(
            backend = %config.storage.backend,
            authenticated = tokens.is_authenticated(),
            "session loaded"
        );
        Self::with_tokens(config, tokens)
    }

    /// Build a context around an already opened token store.
    pub fn with_tokens(config: Config, tokens: Arc<TokenStore>) -> Result<Self> {
        let cancel = CancellationToken::new();
        let api = HotelApiClient::from_config(&config.api, tokens.clone())?.scoped(cancel.clone());

        info!(base_url = %config.api.base_url, "application context ready");
        Ok(Self { config, tokens, api: Arc::new(api), cancel })
    }

    /// The backend client as the core port.
    pub fn partner_api(&self) -> Arc<dyn PartnerApi> {
        self.api.clone()
    }

    /// Remembered-phone storage as the core port.
    pub fn phone_memory(&self) -> Arc<dyn PhoneMemory> {
        self.tokens.clone()
    }

    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Abort every in-flight request and pending retry.
    pub fn shutdown(&self) {
        info!("cancelling outstanding requests");
        self.cancel.cancel();
    }
}
