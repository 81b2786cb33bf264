//! JSON file session store

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use partnerdesk_core::SessionStore;
use partnerdesk_domain::{PartnerDeskError, Result, StoredSession};
use tracing::debug;

use crate::errors::InfraError;

/// Session persisted as a single JSON document.
///
/// Writes go to a sibling temp file first and are renamed into place, so a
/// crash never leaves a half-written session behind.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn staging_path(&self) -> PathBuf {
        self.path.with_extension("json.tmp")
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn load(&self) -> Result<StoredSession> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No session file yet");
                return Ok(StoredSession::default());
            }
            Err(err) => return Err(InfraError::from(err).into()),
        };

        if contents.trim().is_empty() {
            return Ok(StoredSession::default());
        }

        serde_json::from_str(&contents).map_err(|err| {
            PartnerDeskError::Storage(format!(
                "session file {} is corrupt: {err}",
                self.path.display()
            ))
        })
    }

    async fn save(&self, session: &StoredSession) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(InfraError::from)?;
        }

        let json = serde_json::to_vec_pretty(session)
            .map_err(|err| PartnerDeskError::Internal(format!("session encode: {err}")))?;
        let staging = self.staging_path();

        tokio::fs::write(&staging, json).await.map_err(InfraError::from)?;
        restrict_permissions(&staging).await?;
        tokio::fs::rename(&staging, &self.path).await.map_err(InfraError::from)?;

        debug!(path = %self.path.display(), "Session saved");
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {
                debug!(path = %self.path.display(), "Session file removed");
                Ok(())
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(InfraError::from(err).into()),
        }
    }
}

#[cfg(unix)]
async fn restrict_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    tokio::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
        .await
        .map_err(|err| InfraError::from(err).into())
}

#[cfg(not(unix))]
async fn restrict_permissions(_path: &Path) -> Result<()> {
    Ok(())
}
