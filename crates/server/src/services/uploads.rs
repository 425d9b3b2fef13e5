//! Uploaded image storage.
//!
//! Images are an external collaborator from the core's point of view: the
//! store writes bytes to disk and hands back an opaque `/uploads/<name>`
//! path string. The core never inspects image content.

use std::path::{Path, PathBuf};

use thiserror::Error;
use uuid::Uuid;

/// Longest file extension carried over from an uploaded filename.
const MAX_EXTENSION_LEN: usize = 10;

/// Errors that can occur while storing an upload.
#[derive(Debug, Error)]
pub enum UploadError {
    /// Filesystem error.
    #[error("upload i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Disk-backed store for uploaded item images.
#[derive(Debug, Clone)]
pub struct ImageStore {
    dir: PathBuf,
}

impl ImageStore {
    /// Create a store rooted at `dir`.
    #[must_use]
    pub const fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// The directory uploads are written to.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the upload directory if it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns `UploadError::Io` if the directory cannot be created.
    pub async fn ensure_dir(&self) -> Result<(), UploadError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        Ok(())
    }

    /// Store uploaded bytes under a collision-free generated name.
    ///
    /// The original filename contributes only its (sanitized) extension;
    /// everything else about the name is discarded.
    ///
    /// # Errors
    ///
    /// Returns `UploadError::Io` if the file cannot be written.
    pub async fn save(&self, original_name: &str, bytes: &[u8]) -> Result<String, UploadError> {
        let name = match sanitized_extension(original_name) {
            Some(ext) => format!("{}.{ext}", Uuid::new_v4()),
            None => Uuid::new_v4().to_string(),
        };

        tokio::fs::write(self.dir.join(&name), bytes).await?;

        Ok(format!("/uploads/{name}"))
    }
}

/// Extract a safe lowercase extension from a client-supplied filename.
fn sanitized_extension(name: &str) -> Option<String> {
    let ext = Path::new(name).extension()?.to_str()?;
    if ext.is_empty()
        || ext.len() > MAX_EXTENSION_LEN
        || !ext.chars().all(|c| c.is_ascii_alphanumeric())
    {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitized_extension() {
        assert_eq!(sanitized_extension("photo.JPG").as_deref(), Some("jpg"));
        assert_eq!(sanitized_extension("archive.tar.gz").as_deref(), Some("gz"));
        assert_eq!(sanitized_extension("no-extension"), None);
        assert_eq!(sanitized_extension("weird.ex!t"), None);
        assert_eq!(sanitized_extension("dots."), None);
    }

    #[tokio::test]
    async fn test_save_writes_file_and_returns_reference() {
        let tmp = tempfile::tempdir().unwrap();
        let store = ImageStore::new(tmp.path().to_path_buf());

        let reference = store.save("wallet.png", b"not-really-a-png").await.unwrap();

        assert!(reference.starts_with("/uploads/"));
        assert!(reference.ends_with(".png"));

        let on_disk = tmp
            .path()
            .join(reference.strip_prefix("/uploads/").unwrap());
        assert_eq!(tokio::fs::read(on_disk).await.unwrap(), b"not-really-a-png");
    }

    #[tokio::test]
    async fn test_saved_names_are_unique() {
        let tmp = tempfile::tempdir().unwrap();
        let store = ImageStore::new(tmp.path().to_path_buf());

        let a = store.save("x.png", b"a").await.unwrap();
        let b = store.save("x.png", b"b").await.unwrap();
        assert_ne!(a, b);
    }
}
