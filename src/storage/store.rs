use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

use crate::models::RosterDocument;

/// Errors from a roster store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("roster storage unavailable: {0}")]
    Unavailable(#[from] std::io::Error),

    #[error("roster data is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Durable access to the single roster document
#[async_trait]
pub trait RosterStore: Send + Sync {
    /// Read and parse the full document
    async fn load(&self) -> Result<RosterDocument, StoreError>;

    /// Replace the stored document with `document`
    async fn save(&self, document: &RosterDocument) -> Result<(), StoreError>;
}

/// Roster persisted as one pretty-printed JSON file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling file in the same directory so the final rename stays on one filesystem
    fn temp_path(&self) -> PathBuf {
        let file_name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "roster.json".to_string());
        let temp_name = format!(".{}.{}.tmp", file_name, uuid::Uuid::new_v4().simple());
        self.path.with_file_name(temp_name)
    }

    async fn write_temp(temp_path: &Path, bytes: &[u8]) -> std::io::Result<()> {
        let mut file = tokio::fs::File::create(temp_path).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        file.sync_all().await?;
        Ok(())
    }
}

#[async_trait]
impl RosterStore for JsonFileStore {
    async fn load(&self) -> Result<RosterDocument, StoreError> {
        let bytes = tokio::fs::read(&self.path).await?;
        let document: RosterDocument = serde_json::from_slice(&bytes)?;
        debug!(path = %self.path.display(), students = document.len(), "loaded roster");
        Ok(document)
    }

    async fn save(&self, document: &RosterDocument) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(document).map_err(std::io::Error::from)?;
        let temp_path = self.temp_path();

        // Readers see either the old file or the new one, never a partial write
        let written = match Self::write_temp(&temp_path, &bytes).await {
            Ok(()) => tokio::fs::rename(&temp_path, &self.path).await,
            Err(e) => Err(e),
        };

        if let Err(e) = written {
            if let Err(cleanup) = tokio::fs::remove_file(&temp_path).await {
                if cleanup.kind() != std::io::ErrorKind::NotFound {
                    warn!(path = %temp_path.display(), error = %cleanup, "failed to remove temp roster file");
                }
            }
            return Err(StoreError::Unavailable(e));
        }

        debug!(path = %self.path.display(), students = document.len(), "saved roster");
        Ok(())
    }
}
