//! Image storage for product photos.
//!
//! Uploaded files land in a flat directory served under `/uploads`.
//! Remote images referenced by URL can be localized so the catalog never
//! depends on third-party hosting.

use std::path::PathBuf;

use thiserror::Error;
use uuid::Uuid;

const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;
const ALLOWED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "gif"];

/// Errors from asset storage.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("download failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unsupported image type: {0}")]
    UnsupportedType(String),

    #[error("image exceeds the {MAX_IMAGE_BYTES} byte limit")]
    TooLarge,
}

/// Stores images on the local filesystem.
pub struct AssetStore {
    upload_dir: PathBuf,
    http: reqwest::Client,
}

impl AssetStore {
    #[must_use]
    pub fn new(upload_dir: PathBuf) -> Self {
        Self {
            upload_dir,
            http: reqwest::Client::new(),
        }
    }

    /// Create the upload directory if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns `AssetError::Io` if the directory cannot be created.
    pub async fn ensure_dir(&self) -> Result<(), AssetError> {
        tokio::fs::create_dir_all(&self.upload_dir).await?;
        Ok(())
    }

    /// Store an uploaded image and return its public `/uploads` path.
    ///
    /// The stored filename is a fresh UUID; only the extension is taken
    /// from the client, and only from an allow list.
    ///
    /// # Errors
    ///
    /// Returns `AssetError::UnsupportedType` for disallowed extensions,
    /// `AssetError::TooLarge` past the size limit, `AssetError::Io` if the
    /// write fails.
    pub async fn save_upload(
        &self,
        original_name: &str,
        bytes: &[u8],
    ) -> Result<String, AssetError> {
        if bytes.len() > MAX_IMAGE_BYTES {
            return Err(AssetError::TooLarge);
        }
        let extension = original_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_lowercase())
            .filter(|ext| ALLOWED_EXTENSIONS.contains(&ext.as_str()))
            .ok_or_else(|| AssetError::UnsupportedType(original_name.to_string()))?;

        self.write(&extension, bytes).await
    }

    /// Download a remote image and store a local copy.
    ///
    /// # Errors
    ///
    /// Returns `AssetError::Transport` if the download fails,
    /// `AssetError::UnsupportedType` when the response is not an image,
    /// `AssetError::TooLarge` past the size limit.
    pub async fn fetch_remote(&self, url: &str) -> Result<String, AssetError> {
        let response = self.http.get(url).send().await?.error_for_status()?;

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();
        let extension = match content_type.split(';').next().unwrap_or("").trim() {
            "image/jpeg" => "jpg",
            "image/png" => "png",
            "image/webp" => "webp",
            "image/gif" => "gif",
            other => return Err(AssetError::UnsupportedType(other.to_string())),
        };

        let bytes = response.bytes().await?;
        if bytes.len() > MAX_IMAGE_BYTES {
            return Err(AssetError::TooLarge);
        }
        self.write(extension, &bytes).await
    }

    async fn write(&self, extension: &str, bytes: &[u8]) -> Result<String, AssetError> {
        let filename = format!("{}.{extension}", Uuid::new_v4());
        tokio::fs::write(self.upload_dir.join(&filename), bytes).await?;
        Ok(format!("/uploads/{filename}"))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn save_upload_rejects_unknown_extension() {
        let store = AssetStore::new(std::env::temp_dir());
        let result = store.save_upload("malware.exe", b"MZ").await;
        assert!(matches!(result, Err(AssetError::UnsupportedType(_))));
    }

    #[tokio::test]
    async fn save_upload_rejects_oversized_payload() {
        let store = AssetStore::new(std::env::temp_dir());
        let blob = vec![0u8; MAX_IMAGE_BYTES + 1];
        let result = store.save_upload("big.png", &blob).await;
        assert!(matches!(result, Err(AssetError::TooLarge)));
    }

    #[tokio::test]
    async fn save_upload_returns_public_path() {
        let dir = std::env::temp_dir();
        let store = AssetStore::new(dir.clone());
        let path = store.save_upload("photo.JPG", b"fake image").await.unwrap();
        assert!(path.starts_with("/uploads/"));
        assert!(path.ends_with(".jpg"));
        let filename = path.trim_start_matches("/uploads/");
        tokio::fs::remove_file(dir.join(filename)).await.unwrap();
    }
}
