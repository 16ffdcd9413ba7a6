//! Data models for drafts, stored requests and invites.
//!
//! Display implementations for these models live in
//! [`crate::display::models`], keeping presentation apart from the data
//! structures.
//!
//! # Examples
//!
//! ```rust
//! use wrench_core::models::{DraftPatch, RequestDraft, Urgency};
//!
//! let mut draft = RequestDraft::new(Some("prop-12".to_string()));
//! draft.merge(DraftPatch::category("plumbing"));
//! draft.merge(DraftPatch::urgency(Urgency::High));
//!
//! assert_eq!(draft.category.as_deref(), Some("plumbing"));
//! assert_eq!(draft.property_id.as_deref(), Some("prop-12"));
//! ```

pub mod draft;
pub mod filters;
pub mod invite;
pub mod request;
pub mod session;
pub mod status;


pub use draft::{Attachment, DraftPatch, PreviewHandle, RequestDraft, KNOWN_CATEGORIES};
pub use filters::RequestQuery;
pub use invite::PropertyInvite;
pub use request::{MaintenanceRequest, NewRequest, RequestUpdate};
pub use session::SessionContext;
pub use status::{ContactPreference, RequestStatus, Urgency};
