//! Flat per-category storage for ingested artifacts.

use std::path::{Path, PathBuf};

use tokio::io::AsyncWriteExt;

use super::{SanitizedFilename, UploadCategory};
use crate::config::StorageConfig;
use crate::error::UploadError;

/// Two flat directories of arbitrarily named files, one per upload category.
#[derive(Debug, Clone)]
pub struct UploadStore {
    mission_dir: PathBuf,
    preset_dir: PathBuf,
}

impl UploadStore {
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            mission_dir: config.mission_dir.clone(),
            preset_dir: config.preset_dir.clone(),
        }
    }

    /// Create both destination directories if missing. Called once at
    /// startup.
    pub async fn ensure_dirs(&self) -> Result<(), UploadError> {
        for dir in [&self.mission_dir, &self.preset_dir] {
            tokio::fs::create_dir_all(dir)
                .await
                .map_err(|e| UploadError::Io {
                    path: dir.clone(),
                    source: e,
                })?;
        }
        Ok(())
    }

    pub fn dir_for(&self, category: UploadCategory) -> &Path {
        match category {
            UploadCategory::Mission => &self.mission_dir,
            UploadCategory::Preset => &self.preset_dir,
        }
    }

    /// Persist a blob under its sanitized name.
    ///
    /// Create-new semantics: an existing file with the same name rejects the
    /// upload instead of being overwritten. This also settles the race
    /// between two concurrent uploads of the same name: the first writer
    /// wins and the second is rejected.
    pub async fn persist(
        &self,
        category: UploadCategory,
        name: &SanitizedFilename,
        bytes: &[u8],
    ) -> Result<PathBuf, UploadError> {
        let path = self.dir_for(category).join(name.as_str());

        let mut file = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::AlreadyExists => UploadError::AlreadyExists {
                    name: name.as_str().to_string(),
                },
                _ => UploadError::Io {
                    path: path.clone(),
                    source: e,
                },
            })?;

        file.write_all(bytes).await.map_err(|e| UploadError::Io {
            path: path.clone(),
            source: e,
        })?;
        file.flush().await.map_err(|e| UploadError::Io {
            path: path.clone(),
            source: e,
        })?;

        Ok(path)
    }
}
