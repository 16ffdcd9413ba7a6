//! Persisted maintenance request records.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{ContactPreference, RequestStatus, Urgency};

/// Record payload handed to a [`crate::store::RecordStore`] on submission.
///
/// `priority` and `is_emergency` are derived from the draft's urgency by the
/// submission translator; see [`NewRequest::derive_emergency`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewRequest {
    /// ID of the submitting tenant
    pub user_id: String,

    /// Display name of the submitting tenant
    pub user_name: String,

    /// Contact email of the submitting tenant
    pub user_email: String,

    pub property_id: Option<String>,

    pub category: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,

    pub description: String,

    pub location: String,

    pub urgency: Urgency,

    /// Same value as `urgency`, kept under the name the maintenance side reads
    pub priority: Urgency,

    /// True exactly when urgency is urgent
    pub is_emergency: bool,

    /// Stable references to the uploaded photos
    #[serde(default)]
    pub photo_urls: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_preference: Option<ContactPreference>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub best_time_to_contact: Option<String>,

    #[serde(default)]
    pub allow_entry_without_tenant: bool,

    /// Entry point that produced the request, used by the duplicate guard
    pub origin: String,
}

impl NewRequest {
    /// Whether a request with this urgency is treated as an emergency.
    pub fn derive_emergency(urgency: Urgency) -> bool {
        urgency == Urgency::Urgent
    }
}

/// A maintenance request as stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MaintenanceRequest {
    /// Unique identifier generated by the record store
    pub id: u64,

    /// Fields supplied at creation
    #[serde(flatten)]
    pub details: NewRequest,

    #[serde(default)]
    pub status: RequestStatus,

    /// Timestamp when the request was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the request was last modified (UTC)
    pub updated_at: Timestamp,
}

/// Partial update of a stored request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestUpdate {
    pub status: Option<RequestStatus>,
    pub description: Option<String>,
    pub location: Option<String>,
}

impl RequestUpdate {
    /// Update that only changes the status.
    pub fn status(status: RequestStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    /// Applies the update to a stored request in place.
    pub fn apply_to(&self, request: &mut MaintenanceRequest) {
        if let Some(status) = self.status {
            request.status = status;
        }
        if let Some(description) = &self.description {
            request.details.description.clone_from(description);
        }
        if let Some(location) = &self.location {
            request.details.location.clone_from(location);
        }
    }
}
