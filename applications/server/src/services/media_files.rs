/// Media file resolution - maps stored `music_file` references to files on disk
use crate::error::{Result, ServerError};
use std::path::{Path, PathBuf};
use tokio::fs;

#[derive(Debug, Clone, Default)]
pub struct MediaFiles {
    root: Option<PathBuf>,
}

impl MediaFiles {
    pub fn new(root: Option<PathBuf>) -> Self {
        Self { root }
    }

    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    /// Resolve a stored reference to an existing regular file
    ///
    /// Relative references are joined onto the media root when one is
    /// configured; absolute references are used as-is. A missing file
    /// surfaces as an IO error.
    pub async fn resolve(&self, reference: &str) -> Result<PathBuf> {
        let reference = Path::new(reference);
        let candidate = match &self.root {
            Some(root) if reference.is_relative() => root.join(reference),
            _ => reference.to_path_buf(),
        };

        let canonical = fs::canonicalize(&candidate).await?;

        if let Some(root) = &self.root {
            self.validate_path(root, &canonical).await?;
        }

        let metadata = fs::metadata(&canonical).await?;
        if !metadata.is_file() {
            return Err(ServerError::Internal(format!(
                "Media reference is not a regular file: {:?}",
                canonical
            )));
        }

        Ok(canonical)
    }

    /// Validate that a canonical path is within the media root (prevent directory traversal)
    async fn validate_path(&self, root: &Path, canonical_path: &Path) -> Result<()> {
        let canonical_root = fs::canonicalize(root)
            .await
            .map_err(|e| ServerError::Internal(format!("Invalid media root {:?}: {}", root, e)))?;

        if !canonical_path.starts_with(&canonical_root) {
            tracing::warn!("Media reference outside root: {:?}", canonical_path);
            return Err(ServerError::Forbidden(
                "Path traversal attempt detected".to_string(),
            ));
        }

        Ok(())
    }
}
