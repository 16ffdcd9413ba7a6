//! Builder for creating and configuring Desk instances.

use std::path::{Path, PathBuf};

use jiff::SignedDuration;
use log::debug;

use super::Desk;
use crate::{
    error::{Result, WrenchError},
    store::{FsBlobStore, SqliteStore},
    submit::{SubmitConfig, Submitter},
};

/// Builder for creating and configuring Desk instances.
#[derive(Debug, Clone, Default)]
pub struct DeskBuilder {
    database_path: Option<PathBuf>,
    blob_dir: Option<PathBuf>,
    config: SubmitConfig,
}

impl DeskBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses the XDG Base Directory specification:
    /// `$XDG_DATA_HOME/wrench/requests.db` or
    /// `~/.local/share/wrench/requests.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Sets the directory uploaded photos are written to.
    ///
    /// Defaults to `$XDG_DATA_HOME/wrench/blobs`.
    pub fn with_blob_dir<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.blob_dir = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Sets how long a repeated submission returns the earlier request.
    pub fn with_idempotency_window(mut self, window: SignedDuration) -> Self {
        self.config.idempotency_window = window;
        self
    }

    /// Sets the origin tag written on new requests.
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.config.origin = origin.into();
        self
    }

    /// Builds the configured desk.
    ///
    /// # Errors
    ///
    /// Returns `WrenchError::FileSystem` if a directory cannot be created,
    /// `WrenchError::XdgDirectory` if no default location is available, and
    /// `WrenchError::Database` if schema initialization fails.
    pub async fn build(self) -> Result<Desk> {
        if self.config.idempotency_window.is_negative() {
            return Err(WrenchError::Configuration {
                message: "Idempotency window must not be negative".to_string(),
            });
        }

        let db_path = match self.database_path {
            Some(path) => path,
            None => Self::default_database_path()?,
        };
        let blob_dir = match self.blob_dir {
            Some(path) => path,
            None => Self::default_blob_dir()?,
        };

        if let Some(parent) = db_path.parent() {
            create_dir(parent)?;
        }
        create_dir(&blob_dir)?;

        let store = SqliteStore::open(db_path).await?;
        debug!(
            "Desk ready with database {} and blobs in {}",
            store.path().display(),
            blob_dir.display()
        );

        let submitter =
            Submitter::with_config(store.clone(), FsBlobStore::new(blob_dir), self.config);
        Ok(Desk::new(store, submitter))
    }

    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("wrench")
            .place_data_file("requests.db")
            .map_err(|e| WrenchError::XdgDirectory(e.to_string()))
    }

    fn default_blob_dir() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("wrench")
            .create_data_directory("blobs")
            .map_err(|e| WrenchError::XdgDirectory(e.to_string()))
    }
}

fn create_dir(path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() {
        return Ok(());
    }
    std::fs::create_dir_all(path).map_err(|e| WrenchError::FileSystem {
        path: path.to_path_buf(),
        source: e,
    })
}
