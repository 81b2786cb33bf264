//! Configuration loader
//!
//! Builds the client configuration in layers.
//!
//! ## Loading Strategy
//! 1. Start from [`Config::default`]
//! 2. Replace it with a config file when one is given or found
//! 3. Apply environment overrides
//! 4. Validate the result
//!
//! ## Environment Variables
//! - `PARTNERDESK_API_URL`: Backend base URL
//!
//! ## File Locations
//! When no explicit path is given the loader probes, in order:
//! 1. `./partnerdesk.toml`
//! 2. `./partnerdesk.json`
//!
//! Fields missing from a file keep their defaults.

use std::path::{Path, PathBuf};

use partnerdesk_domain::constants::API_URL_ENV;
use partnerdesk_domain::{Config, PartnerDeskError, Result};
use url::Url;

use crate::errors::InfraError;

const CONFIG_FILE_CANDIDATES: [&str; 2] = ["partnerdesk.toml", "partnerdesk.json"];

/// Load configuration: defaults, then an optional file, then the environment
///
/// An explicit `path` must exist. Without one, a probed file is used when
/// present and the defaults otherwise.
///
/// # Errors
/// Returns `PartnerDeskError::Config` if:
/// - The explicit file does not exist
/// - The file format is invalid
/// - The resulting configuration fails [`validate`]
pub fn load(path: Option<PathBuf>) -> Result<Config> {
    let mut config = match path {
        Some(path) => load_from_file(&path)?,
        None => match probe_config_paths() {
            Some(found) => load_from_file(&found)?,
            None => {
                tracing::debug!("No config file found, using defaults");
                Config::default()
            }
        },
    };

    apply_env_overrides(&mut config);
    validate(&config)?;

    tracing::debug!(
        base_url = %config.api.base_url,
        timeout_ms = config.api.timeout.as_millis() as u64,
        retry_attempts = config.api.retry_attempts,
        storage = %config.storage.backend,
        "Configuration loaded"
    );

    Ok(config)
}

/// Load configuration from a file
///
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `PartnerDeskError::Config` if the file is missing, unreadable or
/// malformed.
pub fn load_from_file(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Err(PartnerDeskError::Config(format!(
            "Config file not found: {}",
            path.display()
        )));
    }

    tracing::info!(path = %path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(path)
        .map_err(|e| PartnerDeskError::Config(format!("Failed to read config file: {}", e)))?;

    parse_config(&contents, path)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents).map_err(|e| InfraError::from(e).into()),
        "json" => serde_json::from_str(contents)
            .map_err(|e| PartnerDeskError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(PartnerDeskError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Probe the working directory for configuration files
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;

    CONFIG_FILE_CANDIDATES.iter().map(|name| cwd.join(name)).find(|path| path.exists())
}

/// Apply environment overrides on top of `config`
///
/// Blank values are ignored.
pub fn apply_env_overrides(config: &mut Config) {
    if let Some(base_url) = env_var(API_URL_ENV) {
        tracing::debug!(%base_url, "Base URL overridden from environment");
        config.api.base_url = base_url;
    }
}

/// Check invariants the loaders cannot express through serde
///
/// # Errors
/// Returns `PartnerDeskError::Config` when the base URL is not an absolute
/// http(s) URL or a timeout is zero.
pub fn validate(config: &Config) -> Result<()> {
    let url = Url::parse(&config.api.base_url).map_err(InfraError::from)?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(PartnerDeskError::Config(format!(
            "Unsupported base URL scheme: {}",
            url.scheme()
        )));
    }

    if config.api.timeout.is_zero() {
        return Err(PartnerDeskError::Config("timeout_ms must be greater than 0".into()));
    }
    if config.api.upload_timeout.is_zero() {
        return Err(PartnerDeskError::Config("upload_timeout_ms must be greater than 0".into()));
    }

    Ok(())
}

/// Read an optional environment variable, treating blank values as unset.
fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok().map(|value| value.trim().to_string()).filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::Mutex;
    use std::time::Duration;

    use once_cell::sync::Lazy;
    use partnerdesk_domain::StorageBackend;
    use tempfile::NamedTempFile;

    use super::*;

    static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

    fn write_config(contents: &str, extension: &str) -> (NamedTempFile, PathBuf) {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        let path = file.path().with_extension(extension);
        std::fs::copy(file.path(), &path).unwrap();
        (file, path)
    }

    #[test]
    fn test_env_override_replaces_base_url() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        std::env::set_var(API_URL_ENV, "http://localhost:4000/api");

        let mut config = Config::default();
        apply_env_overrides(&mut config);

        assert_eq!(config.api.base_url, "http://localhost:4000/api");
        std::env::remove_var(API_URL_ENV);
    }

    #[test]
    fn test_blank_env_override_is_ignored() {
        let _guard = ENV_LOCK.lock().expect("env mutex poisoned");
        std::env::set_var(API_URL_ENV, "   ");

        let mut config = Config::default();
        apply_env_overrides(&mut config);

        assert_eq!(config.api.base_url, "https://sshhotels.in/api");
        std::env::remove_var(API_URL_ENV);
    }

    #[test]
    fn test_load_from_file_toml() {
        let (_file, path) = write_config(
            r#"
            [api]
            base_url = "http://127.0.0.1:9000"
            timeout_ms = 5000
            retry_attempts = 1

            [storage]
            backend = "memory"
            "#,
            "toml",
        );

        let config = load_from_file(&path).unwrap();

        assert_eq!(config.api.base_url, "http://127.0.0.1:9000");
        assert_eq!(config.api.timeout, Duration::from_secs(5));
        assert_eq!(config.api.retry_attempts, 1);
        assert_eq!(config.api.retry_delay, Duration::from_secs(1));
        assert_eq!(config.storage.backend, StorageBackend::Memory);

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_from_file_json() {
        let (_file, path) =
            write_config(r#"{"api":{"retry_delay_ms":250},"storage":{"backend":"keychain"}}"#, "json");

        let config = load_from_file(&path).unwrap();

        assert_eq!(config.api.retry_delay, Duration::from_millis(250));
        assert_eq!(config.storage.backend, StorageBackend::Keychain);

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_unsupported_extension_is_rejected() {
        let (_file, path) = write_config("api: {}", "yaml");

        let err = load_from_file(&path).unwrap_err();
        assert!(matches!(err, PartnerDeskError::Config(ref msg) if msg.contains("yaml")));

        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let err = load_from_file(Path::new("/definitely/not/here/partnerdesk.toml")).unwrap_err();
        assert!(matches!(err, PartnerDeskError::Config(_)));
    }

    #[test]
    fn test_validate_rejects_relative_url() {
        let mut config = Config::default();
        config.api.base_url = "sshhotels.in/api".into();

        assert!(matches!(validate(&config), Err(PartnerDeskError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = Config::default();
        config.api.timeout = Duration::ZERO;

        assert!(matches!(validate(&config), Err(PartnerDeskError::Config(_))));
    }
}
