use crate::ports::outbound::DocumentReader;
use crate::shared::error::SbomGraphError;
use crate::shared::Result;
use async_trait::async_trait;
use std::path::Path;

/// Maximum document size (100 MB)
const MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// FileSystemReader adapter for reading SBOM documents from disk
///
/// Rejects symbolic links and oversized files before reading.
pub struct FileSystemReader;

impl FileSystemReader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FileSystemReader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentReader for FileSystemReader {
    async fn read_document(&self, path: &Path) -> Result<String> {
        if !path.exists() {
            return Err(SbomGraphError::DocumentNotFound {
                path: path.to_path_buf(),
                suggestion: "Check the path, or list the SBOM JSON files you want to load as arguments.".to_string(),
            }
            .into());
        }

        let metadata = tokio::fs::symlink_metadata(path)
            .await
            .map_err(|e| SbomGraphError::FileReadError {
                path: path.to_path_buf(),
                details: e.to_string(),
            })?;

        if metadata.is_symlink() {
            anyhow::bail!(
                "Security: {} is a symbolic link. For security reasons, symbolic links are not allowed.",
                path.display()
            );
        }

        if !metadata.is_file() {
            anyhow::bail!("{} is not a regular file", path.display());
        }

        if metadata.len() > MAX_FILE_SIZE {
            anyhow::bail!(
                "Security: {} is too large ({} bytes). Maximum allowed size is {} bytes.",
                path.display(),
                metadata.len(),
                MAX_FILE_SIZE
            );
        }

        tokio::fs::read_to_string(path)
            .await
            .map_err(|e| {
                SbomGraphError::FileReadError {
                    path: path.to_path_buf(),
                    details: e.to_string(),
                }
                .into()
            })
    }
}
