//! Shared fixtures for infra integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use partnerdesk_core::ProgressCallback;
use partnerdesk_domain::{ApiConfig, TokenPair};
use partnerdesk_infra::{HotelApiClient, RequestClient, TokenStore};
use wiremock::{MockServer, Request};

/// API settings scaled down so retry tests finish in milliseconds.
pub fn fast_config(base_url: &str) -> ApiConfig {
    ApiConfig {
        base_url: base_url.to_string(),
        timeout: Duration::from_millis(500),
        retry_attempts: 3,
        retry_delay: Duration::from_millis(10),
        upload_timeout: Duration::from_secs(5),
    }
}

/// Token store holding `access` (and optionally `refresh`).
pub async fn signed_in(access: &str, refresh: Option<&str>) -> Arc<TokenStore> {
    let tokens = Arc::new(TokenStore::in_memory());
    tokens
        .store_tokens(TokenPair::new(access, refresh.map(str::to_string)))
        .await
        .expect("memory store accepts tokens");
    tokens
}

pub fn signed_out() -> Arc<TokenStore> {
    Arc::new(TokenStore::in_memory())
}

pub fn request_client(config: &ApiConfig, tokens: Arc<TokenStore>) -> RequestClient {
    RequestClient::from_config(config, tokens).expect("request client should build")
}

pub fn api_client(server: &MockServer, tokens: Arc<TokenStore>) -> HotelApiClient {
    HotelApiClient::from_config(&fast_config(&server.uri()), tokens)
        .expect("api client should build")
}

/// Progress callback that records every percentage it receives.
pub fn recorded_progress() -> (ProgressCallback, Arc<Mutex<Vec<u8>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    let callback: ProgressCallback = Arc::new(move |percent| {
        sink.lock().expect("progress mutex poisoned").push(percent);
    });
    (callback, seen)
}

pub fn authorization(request: &Request) -> Option<String> {
    request
        .headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

/// Address nothing is listening on.
pub fn refused_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{addr}")
}
