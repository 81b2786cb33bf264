//! Session storage backends
//!
//! Implementations of the core `SessionStore` port:
//! - [`FileSessionStore`]: JSON file under the user's home directory
//! - [`KeychainSessionStore`]: platform keychain via `keyring`
//! - [`MemorySessionStore`]: process-local, for tests and `--storage memory`

pub mod file;
pub mod keychain;
pub mod memory;

use std::path::PathBuf;
use std::sync::Arc;

use partnerdesk_core::SessionStore;
use partnerdesk_domain::constants::{
    KEYCHAIN_ACCOUNT, KEYCHAIN_SERVICE, SESSION_DIR_NAME, SESSION_FILE_NAME,
};
use partnerdesk_domain::{StorageBackend, StorageConfig};

pub use file::FileSessionStore;
pub use keychain::KeychainSessionStore;
pub use memory::MemorySessionStore;

/// Build the session store selected by `config`.
pub fn open_session_store(config: &StorageConfig) -> Arc<dyn SessionStore> {
    match config.backend {
        StorageBackend::File => {
            let path = config.path.clone().unwrap_or_else(default_session_path);
            tracing::debug!(path = %path.display(), "Using file session store");
            Arc::new(FileSessionStore::new(path))
        }
        StorageBackend::Keychain => {
            tracing::debug!(service = KEYCHAIN_SERVICE, "Using keychain session store");
            Arc::new(KeychainSessionStore::new(KEYCHAIN_SERVICE, KEYCHAIN_ACCOUNT))
        }
        StorageBackend::Memory => Arc::new(MemorySessionStore::new()),
    }
}

/// `$HOME/.partnerdesk/session.json`, or `./.partnerdesk/session.json` when no
/// home directory is known.
pub fn default_session_path() -> PathBuf {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .filter(|home| !home.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(SESSION_DIR_NAME)
        .join(SESSION_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_path_ends_with_session_file() {
        let path = default_session_path();

        assert!(path.ends_with(".partnerdesk/session.json"));
    }

    #[tokio::test]
    async fn memory_backend_is_selected_from_config() {
        let config = StorageConfig { backend: StorageBackend::Memory, path: None };
        let store = open_session_store(&config);

        assert!(store.load().await.unwrap().tokens.is_none());
    }
}
