//! Maintenance request CRUD operations and queries.

use jiff::Timestamp;
use rusqlite::{params, types::Type, OptionalExtension};

use crate::{
    error::{DatabaseResultExt, Result, WrenchError},
    models::{
        ContactPreference, MaintenanceRequest, NewRequest, RequestQuery, RequestStatus,
        RequestUpdate, Urgency,
    },
};

const REQUEST_COLUMNS: &str = "id, user_id, user_name, user_email, property_id, category, subcategory, description, location, urgency, priority, is_emergency, photo_urls, contact_preference, best_time_to_contact, allow_entry, origin, status, created_at, updated_at";
const INSERT_REQUEST_SQL: &str = "INSERT INTO maintenance_requests (user_id, user_name, user_email, property_id, category, subcategory, description, location, urgency, priority, is_emergency, photo_urls, contact_preference, best_time_to_contact, allow_entry, origin, status, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19)";
const UPDATE_REQUEST_SQL: &str = "UPDATE maintenance_requests SET status = ?1, description = ?2, location = ?3, updated_at = ?4 WHERE id = ?5";
const DELETE_REQUEST_SQL: &str = "DELETE FROM maintenance_requests WHERE id = ?1";

/// Converts a parse failure on column `idx` into a rusqlite conversion error.
fn conversion_error(idx: usize, message: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, message.into())
}

fn timestamp_from_millis(idx: usize, millis: i64) -> rusqlite::Result<Timestamp> {
    Timestamp::from_millisecond(millis)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Integer, Box::new(e)))
}

/// Truncates a timestamp to the millisecond precision the database keeps.
pub(crate) fn stored_precision(ts: Timestamp) -> Timestamp {
    Timestamp::from_millisecond(ts.as_millisecond()).unwrap_or(ts)
}

impl super::Database {
    /// Helper function to construct a request from a database row
    fn build_request_from_row(row: &rusqlite::Row) -> rusqlite::Result<MaintenanceRequest> {
        let urgency_str: String = row.get(9)?;
        let urgency = urgency_str
            .parse::<Urgency>()
            .map_err(|e| conversion_error(9, e))?;

        let priority_str: String = row.get(10)?;
        let priority = priority_str
            .parse::<Urgency>()
            .map_err(|e| conversion_error(10, e))?;

        let photo_urls_json: String = row.get(12)?;
        let photo_urls: Vec<String> = serde_json::from_str(&photo_urls_json)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(12, Type::Text, Box::new(e)))?;

        let contact_preference = row
            .get::<_, Option<String>>(13)?
            .map(|s| s.parse::<ContactPreference>())
            .transpose()
            .map_err(|e| conversion_error(13, e))?;

        let status_str: String = row.get(17)?;
        let status = status_str
            .parse::<RequestStatus>()
            .map_err(|e| conversion_error(17, e))?;

        Ok(MaintenanceRequest {
            id: row.get::<_, i64>(0)? as u64,
            details: NewRequest {
                user_id: row.get(1)?,
                user_name: row.get(2)?,
                user_email: row.get(3)?,
                property_id: row.get(4)?,
                category: row.get(5)?,
                subcategory: row.get(6)?,
                description: row.get(7)?,
                location: row.get(8)?,
                urgency,
                priority,
                is_emergency: row.get(11)?,
                photo_urls,
                contact_preference,
                best_time_to_contact: row.get(14)?,
                allow_entry_without_tenant: row.get(15)?,
                origin: row.get(16)?,
            },
            status,
            created_at: timestamp_from_millis(18, row.get(18)?)?,
            updated_at: timestamp_from_millis(19, row.get(19)?)?,
        })
    }

    /// Inserts a new request and returns it with its generated id.
    pub fn insert_request(&mut self, request: &NewRequest) -> Result<MaintenanceRequest> {
        let photo_urls = serde_json::to_string(&request.photo_urls)?;
        let now = stored_precision(Timestamp::now());
        let now_ms = now.as_millisecond();

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        tx.execute(
            INSERT_REQUEST_SQL,
            params![
                request.user_id,
                request.user_name,
                request.user_email,
                request.property_id,
                request.category,
                request.subcategory,
                request.description,
                request.location,
                request.urgency.as_str(),
                request.priority.as_str(),
                request.is_emergency,
                photo_urls,
                request.contact_preference.map(|c| c.as_str()),
                request.best_time_to_contact,
                request.allow_entry_without_tenant,
                request.origin,
                RequestStatus::Submitted.as_str(),
                now_ms,
                now_ms,
            ],
        )
        .db_context("Failed to insert maintenance request")?;

        let id = tx.last_insert_rowid() as u64;
        tx.commit().db_context("Failed to commit transaction")?;

        Ok(MaintenanceRequest {
            id,
            details: request.clone(),
            status: RequestStatus::Submitted,
            created_at: now,
            updated_at: now,
        })
    }

    /// Retrieves a request by its ID.
    pub fn get_request(&self, id: u64) -> Result<Option<MaintenanceRequest>> {
        let sql = format!("SELECT {REQUEST_COLUMNS} FROM maintenance_requests WHERE id = ?1");
        let mut stmt = self
            .connection
            .prepare(&sql)
            .db_context("Failed to prepare query")?;

        stmt.query_row(params![id as i64], Self::build_request_from_row)
            .optional()
            .db_context("Failed to query maintenance request")
    }

    /// Lists requests matching the query, newest first.
    pub fn query_requests(&self, query: &RequestQuery) -> Result<Vec<MaintenanceRequest>> {
        let mut sql = format!("SELECT {REQUEST_COLUMNS} FROM maintenance_requests");

        let mut conditions = Vec::new();
        let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(ref user_id) = query.user_id {
            conditions.push("user_id = ?");
            params_vec.push(Box::new(user_id.clone()));
        }

        if let Some(ref origin) = query.origin {
            conditions.push("origin = ?");
            params_vec.push(Box::new(origin.clone()));
        }

        if let Some(status) = query.status {
            conditions.push("status = ?");
            params_vec.push(Box::new(status.as_str()));
        }

        if let Some(after) = query.created_after {
            conditions.push("created_at >= ?");
            params_vec.push(Box::new(after.as_millisecond()));
        }

        if !conditions.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&conditions.join(" AND "));
        }

        sql.push_str(" ORDER BY created_at DESC, id DESC");

        if let Some(limit) = query.limit {
            sql.push_str(" LIMIT ?");
            params_vec.push(Box::new(limit as i64));
        }

        let mut stmt = self
            .connection
            .prepare(&sql)
            .db_context("Failed to prepare query")?;

        let params_refs: Vec<&dyn rusqlite::ToSql> = params_vec.iter().map(|b| &**b).collect();

        let requests = stmt
            .query_map(&params_refs[..], Self::build_request_from_row)
            .db_context("Failed to query maintenance requests")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read maintenance request row")?;

        Ok(requests)
    }

    /// Applies a partial update to a request.
    pub fn update_request(&mut self, id: u64, update: &RequestUpdate) -> Result<MaintenanceRequest> {
        let mut request = self
            .get_request(id)?
            .ok_or(WrenchError::RequestNotFound { id })?;

        update.apply_to(&mut request);
        request.updated_at = stored_precision(Timestamp::now());

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        tx.execute(
            UPDATE_REQUEST_SQL,
            params![
                request.status.as_str(),
                request.details.description,
                request.details.location,
                request.updated_at.as_millisecond(),
                id as i64,
            ],
        )
        .db_context("Failed to update maintenance request")?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(request)
    }

    /// Permanently deletes a request.
    pub fn delete_request(&mut self, id: u64) -> Result<()> {
        let affected = self
            .connection
            .execute(DELETE_REQUEST_SQL, params![id as i64])
            .db_context("Failed to delete maintenance request")?;

        if affected == 0 {
            return Err(WrenchError::RequestNotFound { id });
        }
        Ok(())
    }
}
