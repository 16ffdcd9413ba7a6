//! SQLite-backed record store and invite lookup.
//!
//! [`Database`] holds a single connection and exposes synchronous queries.
//! [`SqliteStore`] implements the async storage traits by opening a fresh
//! connection per operation inside `spawn_blocking`.

use std::path::{Path, PathBuf};

use rusqlite::Connection;
use tokio::task;

use super::{InviteLookup, RecordStore};
use crate::{
    error::{DatabaseResultExt, Result, WrenchError},
    models::{MaintenanceRequest, NewRequest, PropertyInvite, RequestQuery, RequestUpdate},
};

pub mod invite_queries;
pub mod migrations;
pub mod request_queries;

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Creates a new database connection and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }
}

/// Record store and invite lookup over a SQLite file.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    db_path: PathBuf,
}

impl SqliteStore {
    /// Opens (and if needed creates) the database at `db_path`.
    pub async fn open(db_path: impl Into<PathBuf>) -> Result<Self> {
        let store = Self {
            db_path: db_path.into(),
        };
        store.with_db(|_db| Ok(())).await?;
        Ok(store)
    }

    /// Path of the underlying database file.
    pub fn path(&self) -> &Path {
        &self.db_path
    }

    /// Stores a new invite code.
    pub async fn add_invite(
        &self,
        code: String,
        property_id: String,
        property_name: String,
    ) -> Result<PropertyInvite> {
        self.with_db(move |db| db.insert_invite(&code, &property_id, &property_name))
            .await
    }

    /// Runs `f` against a fresh connection on the blocking pool.
    async fn with_db<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Database) -> Result<T> + Send + 'static,
    {
        let db_path = self.db_path.clone();
        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            f(&mut db)
        })
        .await
        .map_err(WrenchError::join)?
    }
}

impl RecordStore for SqliteStore {
    async fn create(&self, request: NewRequest) -> Result<MaintenanceRequest> {
        self.with_db(move |db| db.insert_request(&request)).await
    }

    async fn query(&self, query: RequestQuery) -> Result<Vec<MaintenanceRequest>> {
        self.with_db(move |db| db.query_requests(&query)).await
    }

    async fn get(&self, id: u64) -> Result<Option<MaintenanceRequest>> {
        self.with_db(move |db| db.get_request(id)).await
    }

    async fn update(&self, id: u64, update: RequestUpdate) -> Result<MaintenanceRequest> {
        self.with_db(move |db| db.update_request(id, &update)).await
    }

    async fn delete(&self, id: u64) -> Result<()> {
        self.with_db(move |db| db.delete_request(id)).await
    }
}

impl InviteLookup for SqliteStore {
    async fn resolve(&self, code: String) -> Result<Option<PropertyInvite>> {
        self.with_db(move |db| db.find_invite(&code)).await
    }
}
