//! Blob store that writes uploads under a local directory.

use std::path::{Component, Path, PathBuf};

use log::debug;

use super::BlobStore;
use crate::error::{Result, WrenchError};

/// Writes blobs to `root/<path>` and returns `file://` URLs.
#[derive(Debug, Clone)]
pub struct FsBlobStore {
    root: PathBuf,
}

impl FsBlobStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory all blobs are written under.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves a relative blob path against the root, refusing anything that
    /// would escape it.
    fn resolve(&self, path: &str) -> Result<PathBuf> {
        let relative = Path::new(path);
        let escapes = relative.components().any(|c| {
            matches!(
                c,
                Component::ParentDir | Component::RootDir | Component::Prefix(_)
            )
        });
        if path.trim().is_empty() || escapes {
            return Err(WrenchError::Blob {
                path: path.to_string(),
                message: "blob path must be relative and stay inside the store".to_string(),
            });
        }
        Ok(self.root.join(relative))
    }
}

impl BlobStore for FsBlobStore {
    async fn upload(&self, path: String, bytes: Vec<u8>, content_type: String) -> Result<String> {
        let target = self.resolve(&path)?;

        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| WrenchError::FileSystem {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
        }

        tokio::fs::write(&target, &bytes)
            .await
            .map_err(|e| WrenchError::FileSystem {
                path: target.clone(),
                source: e,
            })?;

        debug!(
            "Stored blob {path} ({content_type}, {} bytes) at {}",
            bytes.len(),
            target.display()
        );
        Ok(format!("file://{}", target.display()))
    }
}
