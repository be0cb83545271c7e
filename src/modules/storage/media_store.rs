//! Local-disk media storage
//!
//! Uploaded pictures land in a single flat directory and are served
//! statically under /images.

use std::path::{Path, PathBuf};

use tokio::fs;
use uuid::Uuid;

use crate::core::config::MediaConfig;
use crate::core::error::{AppError, Result};

/// An uploaded picture pulled out of a multipart form, not yet on disk
#[derive(Debug)]
pub struct UploadedPicture {
    pub original_name: String,
    pub data: Vec<u8>,
}

/// Local-disk store for uploaded pictures
pub struct MediaStore {
    root: PathBuf,
}

impl MediaStore {
    pub fn new(config: &MediaConfig) -> Self {
        Self {
            root: PathBuf::from(&config.dir),
        }
    }

    /// Directory the store writes to, for wiring up static file serving
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the media directory if it does not exist yet
    pub async fn ensure_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.root).await.map_err(|e| {
            tracing::error!("Failed to create media directory {:?}: {}", self.root, e);
            AppError::Internal("Failed to prepare media directory".to_string())
        })
    }

    /// Persist an uploaded picture and return the stored file name. The
    /// original extension is kept so the static file server can guess the
    /// content type.
    pub async fn save(&self, original_name: &str, data: &[u8]) -> Result<String> {
        let extension = Path::new(original_name)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("bin");
        let file_name = format!("{}.{}", Uuid::new_v4(), extension);

        let path = self.root.join(&file_name);
        fs::write(&path, data).await.map_err(|e| {
            tracing::error!("Failed to write media file {:?}: {}", path, e);
            AppError::Internal("Failed to store uploaded picture".to_string())
        })?;

        Ok(file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> MediaStore {
        let dir = std::env::temp_dir().join(format!("media-test-{}", Uuid::new_v4()));
        MediaStore::new(&MediaConfig {
            dir: dir.to_string_lossy().into_owned(),
        })
    }

    #[tokio::test]
    async fn save_writes_file_and_keeps_extension() {
        let store = temp_store();
        store.ensure_dir().await.unwrap();

        let name = store.save("portrait.jpg", b"not really a jpeg").await.unwrap();

        assert!(name.ends_with(".jpg"));
        let stored = tokio::fs::read(store.root().join(&name)).await.unwrap();
        assert_eq!(stored, b"not really a jpeg");
    }

    #[tokio::test]
    async fn save_falls_back_to_bin_extension() {
        let store = temp_store();
        store.ensure_dir().await.unwrap();

        let name = store.save("no-extension", b"data").await.unwrap();

        assert!(name.ends_with(".bin"));
    }
}
