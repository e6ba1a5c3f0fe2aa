//! Session snapshot store
//!
//! Keeps the last saved session in a single JSON file. Writes replace the
//! whole document through a temporary file and a rename; reads are
//! best-effort and treat a missing or unreadable file as "nothing saved".

use std::path::{Path, PathBuf};

use shared::error::{AppError, AppResult, ErrorCode};
use shared::session::SessionSnapshot;

#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the snapshot, replacing any previous one
    pub async fn save(&self, snapshot: &SessionSnapshot) -> AppResult<()> {
        let json = serde_json::to_vec_pretty(snapshot)?;
        let tmp = self.path.with_extension("json.tmp");

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| write_failed(&self.path, e))?;
        }
        tokio::fs::write(&tmp, &json)
            .await
            .map_err(|e| write_failed(&tmp, e))?;
        if let Err(e) = tokio::fs::rename(&tmp, &self.path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(write_failed(&self.path, e));
        }

        tracing::info!(
            path = %self.path.display(),
            restaurant = %snapshot.restaurant,
            participants = snapshot.participants.len(),
            "Session saved"
        );
        Ok(())
    }

    /// Read the stored snapshot, if there is a usable one
    pub async fn load(&self) -> Option<SessionSnapshot> {
        match self.try_load().await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Ignoring stored session");
                None
            }
        }
    }

    /// Like [`load`](Self::load) but reports why a stored file was unusable
    pub async fn try_load(&self) -> AppResult<Option<SessionSnapshot>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        serde_json::from_slice(&bytes).map(Some).map_err(|e| {
            AppError::with_message(ErrorCode::SnapshotCorrupted, e.to_string())
                .with_detail("path", self.path.display().to_string())
        })
    }

    /// Remove the stored snapshot; a missing file is not an error
    pub async fn clear(&self) -> AppResult<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {
                tracing::info!(path = %self.path.display(), "Session cleared");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

fn write_failed(path: &Path, e: std::io::Error) -> AppError {
    AppError::with_message(ErrorCode::SnapshotWriteFailed, e.to_string())
        .with_detail("path", path.display().to_string())
}
