//! In-process stores with failure injection.
//!
//! Nothing here survives the process. They back the test suite and the CLI's
//! `--dry-run` mode.

use std::{
    collections::BTreeMap,
    sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Mutex, MutexGuard, PoisonError,
    },
};

use jiff::Timestamp;

use super::{BlobStore, RecordStore};
use crate::{
    error::{Result, WrenchError},
    models::{MaintenanceRequest, NewRequest, RequestQuery, RequestStatus, RequestUpdate},
};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Debug, Default)]
struct Records {
    next_id: u64,
    rows: Vec<MaintenanceRequest>,
}

/// Record store kept in a vector.
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    records: Mutex<Records>,
    fail_create: AtomicBool,
    fail_query: AtomicBool,
    create_calls: AtomicUsize,
    query_calls: AtomicUsize,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent `create` fail until switched off.
    pub fn set_fail_create(&self, fail: bool) {
        self.fail_create.store(fail, Ordering::SeqCst);
    }

    /// Makes every subsequent `query` fail until switched off.
    pub fn set_fail_query(&self, fail: bool) {
        self.fail_query.store(fail, Ordering::SeqCst);
    }

    /// Number of `create` calls made, including failed ones.
    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    /// Number of `query` calls made, including failed ones.
    pub fn query_calls(&self) -> usize {
        self.query_calls.load(Ordering::SeqCst)
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        lock(&self.records).rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Rewrites a record's creation time.
    pub fn backdate(&self, id: u64, created_at: Timestamp) -> Result<()> {
        let mut records = lock(&self.records);
        let row = records
            .rows
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(WrenchError::RequestNotFound { id })?;
        row.created_at = created_at;
        Ok(())
    }
}

impl RecordStore for MemoryRecordStore {
    async fn create(&self, request: NewRequest) -> Result<MaintenanceRequest> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_create.load(Ordering::SeqCst) {
            return Err(WrenchError::Injected("record create refused".to_string()));
        }

        let mut records = lock(&self.records);
        records.next_id += 1;
        let now = Timestamp::now();
        let stored = MaintenanceRequest {
            id: records.next_id,
            details: request,
            status: RequestStatus::Submitted,
            created_at: now,
            updated_at: now,
        };
        records.rows.push(stored.clone());
        Ok(stored)
    }

    async fn query(&self, query: RequestQuery) -> Result<Vec<MaintenanceRequest>> {
        self.query_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_query.load(Ordering::SeqCst) {
            return Err(WrenchError::Injected("record query refused".to_string()));
        }

        let records = lock(&self.records);
        let mut found: Vec<_> = records
            .rows
            .iter()
            .filter(|r| query.matches(r))
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        if let Some(limit) = query.limit {
            found.truncate(limit);
        }
        Ok(found)
    }

    async fn get(&self, id: u64) -> Result<Option<MaintenanceRequest>> {
        Ok(lock(&self.records).rows.iter().find(|r| r.id == id).cloned())
    }

    async fn update(&self, id: u64, update: RequestUpdate) -> Result<MaintenanceRequest> {
        let mut records = lock(&self.records);
        let row = records
            .rows
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(WrenchError::RequestNotFound { id })?;
        update.apply_to(row);
        row.updated_at = Timestamp::now();
        Ok(row.clone())
    }

    async fn delete(&self, id: u64) -> Result<()> {
        let mut records = lock(&self.records);
        let before = records.rows.len();
        records.rows.retain(|r| r.id != id);
        if records.rows.len() == before {
            return Err(WrenchError::RequestNotFound { id });
        }
        Ok(())
    }
}

/// Blob store kept in a map from path to bytes.
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    blobs: Mutex<BTreeMap<String, Vec<u8>>>,
    failing: Mutex<Vec<String>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fails every upload whose path ends with `suffix`.
    pub fn fail_uploads_ending_with(&self, suffix: impl Into<String>) {
        lock(&self.failing).push(suffix.into());
    }

    /// Clears all injected upload failures.
    pub fn clear_failures(&self) {
        lock(&self.failing).clear();
    }

    /// Paths of every stored blob.
    pub fn paths(&self) -> Vec<String> {
        lock(&self.blobs).keys().cloned().collect()
    }

    /// Highest number of uploads observed running at the same time.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

impl BlobStore for MemoryBlobStore {
    async fn upload(&self, path: String, bytes: Vec<u8>, _content_type: String) -> Result<String> {
        let running = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(running, Ordering::SeqCst);

        // Give other uploads of the same batch a chance to start.
        tokio::task::yield_now().await;

        let should_fail = lock(&self.failing)
            .iter()
            .any(|suffix| path.ends_with(suffix.as_str()));

        let result = if should_fail {
            Err(WrenchError::Blob {
                path: path.clone(),
                message: "injected upload failure".to_string(),
            })
        } else {
            lock(&self.blobs).insert(path.clone(), bytes);
            Ok(format!("memory://{path}"))
        };

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }
}
