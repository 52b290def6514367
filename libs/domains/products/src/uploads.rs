//! Image upload store - the file-filtering collaborator
//!
//! Validates uploaded file types, assigns collision-free stored names, and
//! writes bytes under the configured upload directory. Attaching the
//! returned path to a Product record is the caller's responsibility.

use std::path::PathBuf;
use uuid::Uuid;

use crate::error::{ProductError, ProductResult};

/// Accepted image file extensions (lowercase)
const ALLOWED_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Accepted content types, when the client provides one
const ALLOWED_CONTENT_TYPES: [&str; 2] = ["image/jpeg", "image/png"];

/// Disk-backed store for uploaded product images
pub struct ImageStore {
    root: PathBuf,
}

impl ImageStore {
    /// Create a store rooted at the given directory.
    ///
    /// The directory doubles as the public path prefix of stored files:
    /// a store rooted at `uploads` serves paths like `/uploads/<name>.png`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The accepted extension of a file name, lowercased, if allowed.
    fn accepted_extension(file_name: &str) -> Option<&'static str> {
        let ext = file_name.rsplit_once('.')?.1.to_ascii_lowercase();
        ALLOWED_EXTENSIONS.iter().copied().find(|e| *e == ext)
    }

    /// Whether a file with this name and content type may be stored.
    pub fn is_allowed(file_name: &str, content_type: Option<&str>) -> bool {
        if Self::accepted_extension(file_name).is_none() {
            return false;
        }
        match content_type {
            Some(ct) => ALLOWED_CONTENT_TYPES.contains(&ct),
            None => true,
        }
    }

    /// Validate and persist an uploaded file, returning its public path.
    ///
    /// The stored name is server-assigned; the original name only
    /// contributes its extension.
    pub async fn save(
        &self,
        file_name: &str,
        content_type: Option<&str>,
        bytes: &[u8],
    ) -> ProductResult<String> {
        if !Self::is_allowed(file_name, content_type) {
            return Err(ProductError::InvalidImage);
        }
        let ext = Self::accepted_extension(file_name).ok_or(ProductError::InvalidImage)?;

        tokio::fs::create_dir_all(&self.root).await?;

        let stored_name = format!("{}.{}", Uuid::new_v4(), ext);
        let path = self.root.join(&stored_name);
        tokio::fs::write(&path, bytes).await?;

        let prefix = self.root.to_string_lossy();
        let prefix = prefix.trim_matches('/');
        let public_path = format!("/{}/{}", prefix, stored_name);

        tracing::info!(path = %public_path, "Image stored");
        Ok(public_path)
    }
}
