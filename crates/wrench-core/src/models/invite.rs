//! Property invitations.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// An invite code that links a tenant to a property.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PropertyInvite {
    /// Code handed to the tenant, matched case-insensitively
    pub code: String,

    pub property_id: String,

    /// Human-readable property name
    pub property_name: String,

    pub created_at: Timestamp,
}

impl PropertyInvite {
    /// Normalizes an invite code for storage and lookup.
    ///
    /// ```rust
    /// use wrench_core::models::PropertyInvite;
    ///
    /// assert_eq!(PropertyInvite::normalize_code("  ab-12c "), "AB-12C");
    /// ```
    pub fn normalize_code(code: &str) -> String {
        code.trim().to_uppercase()
    }
}
