//! Property invite storage and lookup.

use jiff::Timestamp;
use rusqlite::{params, types::Type, OptionalExtension};

use super::request_queries::stored_precision;
use crate::{
    error::{DatabaseResultExt, Result, WrenchError},
    models::PropertyInvite,
};

const INSERT_INVITE_SQL: &str = "INSERT INTO property_invites (code, property_id, property_name, created_at) VALUES (?1, ?2, ?3, ?4)";
const SELECT_INVITE_SQL: &str =
    "SELECT code, property_id, property_name, created_at FROM property_invites WHERE code = ?1";
const CHECK_INVITE_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM property_invites WHERE code = ?1)";

impl super::Database {
    /// Stores a new invite code for a property.
    pub fn insert_invite(
        &mut self,
        code: &str,
        property_id: &str,
        property_name: &str,
    ) -> Result<PropertyInvite> {
        let code = PropertyInvite::normalize_code(code);
        if code.is_empty() {
            return Err(WrenchError::invalid_input("code").with_reason("Invite code cannot be empty"));
        }
        if property_id.trim().is_empty() {
            return Err(
                WrenchError::invalid_input("property_id").with_reason("Property ID cannot be empty")
            );
        }

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let exists: bool = tx
            .query_row(CHECK_INVITE_EXISTS_SQL, params![code], |row| row.get(0))
            .db_context("Failed to check invite existence")?;
        if exists {
            return Err(WrenchError::invalid_input("code")
                .with_reason(format!("Invite code {code} already exists")));
        }

        let now = stored_precision(Timestamp::now());
        tx.execute(
            INSERT_INVITE_SQL,
            params![code, property_id.trim(), property_name.trim(), now.as_millisecond()],
        )
        .db_context("Failed to insert invite")?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(PropertyInvite {
            code,
            property_id: property_id.trim().to_string(),
            property_name: property_name.trim().to_string(),
            created_at: now,
        })
    }

    /// Looks up an invite by code, ignoring case and surrounding whitespace.
    pub fn find_invite(&self, code: &str) -> Result<Option<PropertyInvite>> {
        let code = PropertyInvite::normalize_code(code);
        self.connection
            .query_row(SELECT_INVITE_SQL, params![code], |row| {
                let millis: i64 = row.get(3)?;
                Ok(PropertyInvite {
                    code: row.get(0)?,
                    property_id: row.get(1)?,
                    property_name: row.get(2)?,
                    created_at: Timestamp::from_millisecond(millis).map_err(|e| {
                        rusqlite::Error::FromSqlConversionFailure(3, Type::Integer, Box::new(e))
                    })?,
                })
            })
            .optional()
            .db_context("Failed to query invite")
    }
}
