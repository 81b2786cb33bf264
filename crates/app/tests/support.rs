//! Shared fixtures for app integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use partnerdesk_app::AppContext;
use partnerdesk_domain::{ApiConfig, Config, StorageBackend, StorageConfig, TokenPair};
use partnerdesk_infra::TokenStore;
use wiremock::MockServer;

pub const PHONE: &str = "9876543210";
pub const PASSWORD: &str = "s3cretpass";

/// Config pointing at `server` with millisecond retries and an in-memory
/// session.
pub fn test_config(server: &MockServer) -> Config {
    Config {
        api: ApiConfig {
            base_url: server.uri(),
            timeout: Duration::from_millis(500),
            retry_attempts: 3,
            retry_delay: Duration::from_millis(10),
            upload_timeout: Duration::from_secs(5),
        },
        storage: StorageConfig { backend: StorageBackend::Memory, path: None },
    }
}

pub fn context(server: &MockServer, tokens: Arc<TokenStore>) -> AppContext {
    AppContext::with_tokens(test_config(server), tokens).expect("context should build")
}

pub fn signed_out_context(server: &MockServer) -> AppContext {
    context(server, Arc::new(TokenStore::in_memory()))
}

pub async fn signed_in_context(server: &MockServer) -> AppContext {
    let tokens = Arc::new(TokenStore::in_memory());
    tokens
        .store_tokens(TokenPair::new("access-1", Some("refresh-1".to_string())))
        .await
        .expect("memory store accepts tokens");
    context(server, tokens)
}
