//! Integration tests for configuration loader
//!
//! Tests the end-to-end layering of defaults, files and environment.

use std::io::Write;
use std::sync::Mutex;
use std::time::Duration;

use once_cell::sync::Lazy;
use partnerdesk_domain::constants::API_URL_ENV;
use partnerdesk_domain::{PartnerDeskError, StorageBackend};
use partnerdesk_infra::config;
use tempfile::NamedTempFile;

static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

fn config_file(contents: &str, extension: &str) -> (NamedTempFile, std::path::PathBuf) {
    let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
    temp_file.write_all(contents.as_bytes()).expect("Failed to write to temp file");

    let path = temp_file.path().with_extension(extension);
    std::fs::copy(temp_file.path(), &path).expect("Failed to copy file");
    (temp_file, path)
}

#[test]
fn test_environment_overrides_file_base_url() {
    let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
    let (_temp, path) = config_file(
        r#"
[api]
base_url = "https://staging.sshhotels.in/api"
timeout_ms = 10000

[storage]
backend = "file"
path = "/tmp/partnerdesk-integration/session.json"
"#,
        "toml",
    );
    std::env::set_var(API_URL_ENV, "http://localhost:5050/api");

    let config = config::load(Some(path.clone())).expect("config should load");

    assert_eq!(config.api.base_url, "http://localhost:5050/api");
    assert_eq!(config.api.timeout, Duration::from_secs(10));
    assert_eq!(config.storage.backend, StorageBackend::File);
    assert_eq!(
        config.storage.path.as_deref(),
        Some(std::path::Path::new("/tmp/partnerdesk-integration/session.json"))
    );

    std::env::remove_var(API_URL_ENV);
    std::fs::remove_file(path).ok();
}

#[test]
fn test_file_with_invalid_url_fails_validation() {
    let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
    std::env::remove_var(API_URL_ENV);
    let (_temp, path) = config_file(r#"{"api":{"base_url":"ftp://sshhotels.in"}}"#, "json");

    let result = config::load(Some(path.clone()));

    assert!(matches!(result, Err(PartnerDeskError::Config(ref msg)) if msg.contains("ftp")));
    std::fs::remove_file(path).ok();
}

#[test]
fn test_malformed_toml_is_a_config_error() {
    let (_temp, path) = config_file("[api\nbase_url = ", "toml");

    let result = config::load_from_file(&path);

    assert!(matches!(result, Err(PartnerDeskError::Config(_))));
    std::fs::remove_file(path).ok();
}
