//! Error types for the wrench library.
//!
//! [`WrenchError`] covers storage and configuration failures. Field-level
//! problems use [`crate::validation::ValidationError`], refused step
//! transitions use [`crate::workflow::NavigationError`] and submission
//! failures use [`crate::submit::SubmitError`].

use std::path::PathBuf;

use thiserror::Error;

/// Error type for storage, configuration and lookup operations.
///
/// Every fallible function in [`crate::store`] and [`crate::Desk`] returns
/// this through the [`Result`] alias. Variants carry enough context for a
/// log line on their own. Front ends decide what part of it a tenant sees.
///
/// Build the two most common variants through their builders so the call
/// sites read the same everywhere:
///
/// ```rust
/// use wrench_core::WrenchError;
///
/// let err = WrenchError::invalid_input("confirmed")
///     .with_reason("Deletion cannot be undone; pass --confirm");
/// assert!(matches!(err, WrenchError::InvalidInput { .. }));
/// ```
#[derive(Error, Debug)]
pub enum WrenchError {
    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// Maintenance request not found for the given ID
    #[error("Request with ID {id} not found")]
    RequestNotFound { id: u64 },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
    /// Blob storage errors
    #[error("Blob storage error at '{path}': {message}")]
    Blob { path: String, message: String },
    /// Failure raised on purpose by an in-memory store
    #[error("Injected failure: {0}")]
    Injected(String),
}

/// Builder for creating database errors with optional context.
///
/// Obtained from [`WrenchError::database`]. The message names the operation
/// that failed and the rusqlite error is kept as the source, so
/// `std::error::Error::source` still reaches the driver detail.
///
/// Most call sites go through [`DatabaseResultExt::db_context`], which wraps
/// this builder for a whole `rusqlite::Result`.
pub struct DatabaseErrorBuilder {
    message: String,
}

impl DatabaseErrorBuilder {
    /// Create a new database error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: rusqlite::Error) -> WrenchError {
        WrenchError::Database {
            message: self.message,
            source,
        }
    }
}

/// Builder for creating input validation errors.
///
/// Obtained from [`WrenchError::invalid_input`]. The field is the name the
/// caller used for the value (a parameter or a JSON key), and the reason is
/// a full sentence that can be shown to the person who supplied it.
///
/// ```rust
/// use wrench_core::WrenchError;
///
/// let err = WrenchError::invalid_input("status").with_reason("Unknown status 'archived'");
/// assert_eq!(
///     err.to_string(),
///     "Invalid input for field 'status': Unknown status 'archived'"
/// );
/// ```
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> WrenchError {
        WrenchError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl WrenchError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Wraps a `spawn_blocking` join failure.
    pub(crate) fn join(e: tokio::task::JoinError) -> Self {
        Self::Configuration {
            message: format!("Task join error: {e}"),
        }
    }
}

impl From<crate::validation::ValidationError> for WrenchError {
    fn from(e: crate::validation::ValidationError) -> Self {
        Self::InvalidInput {
            field: e.field.to_string(),
            reason: e.reason,
        }
    }
}

/// Specialized extension trait for database-related Results.
///
/// Turns any `rusqlite::Result` into a [`Result`] with one call:
///
/// ```rust,ignore
/// connection
///     .execute_batch(schema_sql)
///     .db_context("Failed to initialize database schema")?;
/// ```
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| WrenchError::database(message).with_source(e))
    }
}

/// Result type alias for wrench operations
pub type Result<T> = std::result::Result<T, WrenchError>;
