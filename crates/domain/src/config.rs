//! Configuration types

use std::path::PathBuf;
use std::time::Duration;

use partnerdesk_common::utils::serde::duration_millis;
use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_API_BASE_URL, DEFAULT_RETRY_ATTEMPTS, DEFAULT_RETRY_DELAY_MS, DEFAULT_TIMEOUT_MS,
    DEFAULT_UPLOAD_TIMEOUT_MS,
};

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub storage: StorageConfig,
}

/// Backend API configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    /// Per-attempt deadline for JSON requests.
    #[serde(with = "duration_millis", rename = "timeout_ms")]
    pub timeout: Duration,
    /// Retries available after the initial attempt.
    pub retry_attempts: u32,
    /// Base of the linear backoff: the n-th retry waits `retry_delay * (n + 1)`.
    #[serde(with = "duration_millis", rename = "retry_delay_ms")]
    pub retry_delay: Duration,
    /// Deadline for a whole multipart upload.
    #[serde(with = "duration_millis", rename = "upload_timeout_ms")]
    pub upload_timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            retry_attempts: DEFAULT_RETRY_ATTEMPTS,
            retry_delay: Duration::from_millis(DEFAULT_RETRY_DELAY_MS),
            upload_timeout: Duration::from_millis(DEFAULT_UPLOAD_TIMEOUT_MS),
        }
    }
}

impl ApiConfig {
    /// Config pointing at `base_url` with every other value defaulted.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), ..Self::default() }
    }
}

/// Where the session (tokens and remembered phone) is persisted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// JSON file on disk
    #[default]
    File,
    /// OS keychain entry
    Keychain,
    /// Process memory only; nothing survives a restart
    Memory,
}

crate::impl_domain_status_conversions!(StorageBackend {
    File => "file",
    Keychain => "keychain",
    Memory => "memory",
});

/// Session storage configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// Session file for the `file` backend. `None` resolves to
    /// `~/.partnerdesk/session.json`.
    pub path: Option<PathBuf>,
}
