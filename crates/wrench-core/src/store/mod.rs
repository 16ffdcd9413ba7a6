//! Storage boundaries used by the submission flow and request history.
//!
//! The workflow never talks to a concrete backend. It depends on three narrow
//! traits:
//!
//! - [`RecordStore`]: create, query, read, update and delete requests
//! - [`BlobStore`]: upload a photo and get back a stable URL
//! - [`InviteLookup`]: resolve an invite code to a property
//!
//! Implementations in this crate:
//!
//! - [`SqliteStore`]: records and invites in a local SQLite file
//! - [`FsBlobStore`]: photos written under a directory, `file://` URLs
//! - [`MemoryRecordStore`] / [`MemoryBlobStore`]: in-process stores with
//!   failure injection, used by tests and dry runs

use std::future::Future;

use crate::{
    error::Result,
    models::{MaintenanceRequest, NewRequest, PropertyInvite, RequestQuery, RequestUpdate},
};

pub mod fs;
pub mod memory;
pub mod sqlite;

pub use fs::FsBlobStore;
pub use memory::{MemoryBlobStore, MemoryRecordStore};
pub use sqlite::{Database, SqliteStore};

/// Persistence for maintenance request records.
pub trait RecordStore: Send + Sync {
    /// Stores a new request and returns it with its generated id.
    fn create(&self, request: NewRequest) -> impl Future<Output = Result<MaintenanceRequest>> + Send;

    /// Returns requests matching `query`, newest first.
    fn query(
        &self,
        query: RequestQuery,
    ) -> impl Future<Output = Result<Vec<MaintenanceRequest>>> + Send;

    /// Reads a single request.
    fn get(&self, id: u64) -> impl Future<Output = Result<Option<MaintenanceRequest>>> + Send;

    /// Applies a partial update and returns the updated request.
    fn update(
        &self,
        id: u64,
        update: RequestUpdate,
    ) -> impl Future<Output = Result<MaintenanceRequest>> + Send;

    /// Permanently removes a request.
    fn delete(&self, id: u64) -> impl Future<Output = Result<()>> + Send;
}

/// Storage for uploaded photos.
pub trait BlobStore: Send + Sync {
    /// Stores `bytes` under `path` and returns a stable reference to it.
    fn upload(
        &self,
        path: String,
        bytes: Vec<u8>,
        content_type: String,
    ) -> impl Future<Output = Result<String>> + Send;
}

/// Read-only resolution of property invite codes.
pub trait InviteLookup: Send + Sync {
    fn resolve(&self, code: String) -> impl Future<Output = Result<Option<PropertyInvite>>> + Send;
}
