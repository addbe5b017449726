//! Logo file storage.
//!
//! Uploaded clinic logos live outside the database; rows only keep the
//! stored filename. The trait keeps handlers independent of where the bytes
//! actually land, and lets tests point storage at a temp directory.

use std::path::PathBuf;

use async_trait::async_trait;
use uuid::Uuid;

/// Sub-path under the media root where logos are kept. Also part of the
/// public media URL.
pub const LOGO_SUBDIR: &str = "clinic_logos";

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("failed to write logo file: {0}")]
    Write(#[source] std::io::Error),
    #[error("failed to create storage directory: {0}")]
    CreateDir(#[source] std::io::Error),
    #[error("failed to delete logo file: {0}")]
    Delete(#[source] std::io::Error),
}

#[async_trait]
pub trait LogoStorage {
    /// Persist an uploaded logo and return the stored filename.
    async fn save_logo(&self, original_filename: &str, data: &[u8])
        -> Result<String, StorageError>;

    /// Absolute path of a stored logo on disk.
    fn logo_path(&self, stored_filename: &str) -> PathBuf;

    async fn delete_logo(&self, stored_filename: &str) -> Result<(), StorageError>;
}

/// Filesystem-backed storage under `{media_root}/clinic_logos/`.
pub struct LocalLogoStorage {
    media_root: PathBuf,
}

impl LocalLogoStorage {
    pub fn new(media_root: impl Into<PathBuf>) -> Self {
        Self {
            media_root: media_root.into(),
        }
    }

    fn logo_dir(&self) -> PathBuf {
        self.media_root.join(LOGO_SUBDIR)
    }
}

#[async_trait]
impl LogoStorage for LocalLogoStorage {
    async fn save_logo(
        &self,
        original_filename: &str,
        data: &[u8],
    ) -> Result<String, StorageError> {
        let dir = self.logo_dir();
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(StorageError::CreateDir)?;

        // Prefix with a fresh UUID so two uploads of "logo.png" never collide.
        let sanitized = sanitize_filename::sanitize(original_filename);
        let stored_filename = format!("{}_{}", Uuid::new_v4(), sanitized);

        let path = dir.join(&stored_filename);
        tokio::fs::write(&path, data)
            .await
            .map_err(StorageError::Write)?;

        Ok(stored_filename)
    }

    fn logo_path(&self, stored_filename: &str) -> PathBuf {
        // Stored names can come back from the database; re-sanitizing keeps
        // them from escaping the logo directory.
        self.logo_dir()
            .join(sanitize_filename::sanitize(stored_filename))
    }

    async fn delete_logo(&self, stored_filename: &str) -> Result<(), StorageError> {
        let path = self.logo_path(stored_filename);
        tokio::fs::remove_file(&path)
            .await
            .map_err(StorageError::Delete)
    }
}
