//! The in-memory request draft and the patches that update it.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{ContactPreference, Urgency};

/// Category ids offered by default. Categories are open strings, so other ids
/// are accepted as long as they are non-empty.
pub const KNOWN_CATEGORIES: [&str; 8] = [
    "plumbing",
    "electrical",
    "hvac",
    "appliances",
    "structural",
    "pest_control",
    "locks_security",
    "other",
];

/// Identifies a locally created preview for one attached file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PreviewHandle(pub u64);

impl fmt::Display for PreviewHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "preview-{}", self.0)
    }
}

/// A photo attached to the draft, held in memory until submission.
#[derive(Clone, PartialEq)]
pub struct Attachment {
    /// Preview owned by the form that accepted this file
    pub preview: PreviewHandle,

    /// Original file name as supplied by the tenant
    pub file_name: String,

    /// MIME type, e.g. `image/jpeg`
    pub content_type: String,

    /// Raw file contents
    pub bytes: Vec<u8>,
}

impl Attachment {
    /// Size of the file in bytes.
    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

impl fmt::Debug for Attachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attachment")
            .field("preview", &self.preview)
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("size", &self.bytes.len())
            .finish()
    }
}

/// The request being composed across the workflow steps.
///
/// A draft only lives in memory. It is updated through [`RequestDraft::merge`]
/// and the attachment operations of [`crate::form::FormState`], and is never
/// written to storage until the final submission.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestDraft {
    /// Property the request is about, usually seeded from an accepted invite
    pub property_id: Option<String>,

    /// Category id (see [`KNOWN_CATEGORIES`])
    pub category: Option<String>,

    /// Optional finer-grained category, free text
    pub subcategory: Option<String>,

    /// What is wrong, in the tenant's words
    pub description: String,

    pub urgency: Option<Urgency>,

    /// Where in the unit the problem is
    pub location: String,

    /// Attached photos in the order they were added
    pub attachments: Vec<Attachment>,

    pub contact_preference: Option<ContactPreference>,

    /// Free-form availability, e.g. "weekday mornings"
    pub best_time_to_contact: Option<String>,

    /// Whether staff may enter while the tenant is away
    pub allow_entry_without_tenant: bool,
}

impl RequestDraft {
    /// Creates an empty draft, optionally tied to a property.
    pub fn new(property_id: Option<String>) -> Self {
        Self {
            property_id,
            ..Default::default()
        }
    }

    /// Shallow-merges `patch` into the draft.
    ///
    /// Fields present in the patch overwrite the draft; every other field is
    /// left untouched. Blank values for the optional text fields clear them.
    pub fn merge(&mut self, patch: DraftPatch) {
        if let Some(property_id) = patch.property_id {
            self.property_id = non_blank(property_id);
        }
        if let Some(category) = patch.category {
            self.category = non_blank(category);
        }
        if let Some(subcategory) = patch.subcategory {
            self.subcategory = non_blank(subcategory);
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(urgency) = patch.urgency {
            self.urgency = Some(urgency);
        }
        if let Some(location) = patch.location {
            self.location = location;
        }
        if let Some(contact_preference) = patch.contact_preference {
            self.contact_preference = Some(contact_preference);
        }
        if let Some(best_time) = patch.best_time_to_contact {
            self.best_time_to_contact = non_blank(best_time);
        }
        if let Some(allow_entry) = patch.allow_entry_without_tenant {
            self.allow_entry_without_tenant = allow_entry;
        }
    }

    /// Total size of all attached files in bytes.
    pub fn attachment_bytes(&self) -> usize {
        self.attachments.iter().map(Attachment::size).sum()
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// A partial update to a [`RequestDraft`].
///
/// Attachments are not part of a patch; they go through the form's
/// attach/remove operations so that preview handles stay owned.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DraftPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub urgency: Option<Urgency>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_preference: Option<ContactPreference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub best_time_to_contact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_entry_without_tenant: Option<bool>,
}

impl DraftPatch {
    /// Patch that only sets the category.
    pub fn category(category: impl Into<String>) -> Self {
        Self {
            category: Some(category.into()),
            ..Default::default()
        }
    }

    /// Patch that only sets the description.
    pub fn description(description: impl Into<String>) -> Self {
        Self {
            description: Some(description.into()),
            ..Default::default()
        }
    }

    /// Patch that only sets the urgency.
    pub fn urgency(urgency: Urgency) -> Self {
        Self {
            urgency: Some(urgency),
            ..Default::default()
        }
    }

    /// Patch that only sets the location.
    pub fn location(location: impl Into<String>) -> Self {
        Self {
            location: Some(location.into()),
            ..Default::default()
        }
    }

    /// Returns true when the patch carries no changes.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
