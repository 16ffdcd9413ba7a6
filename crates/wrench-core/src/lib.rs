//! Core library for the Wrench tenant maintenance-request tool.
//!
//! A tenant composes a request across a fixed sequence of steps and submits
//! it once. The crate is organized around that flow:
//!
//! - [`models`]: the in-memory draft, patches, stored requests and invites
//! - [`validation`]: pure field validators and their limits
//! - [`form`]: the draft container and preview handle ownership
//! - [`workflow`]: step definitions, the navigator, review and the session
//!   type tying them together
//! - [`submit`]: translation of a finished draft into a stored request, with
//!   the duplicate guard and concurrent photo uploads
//! - [`store`]: record, blob and invite traits with SQLite, filesystem and
//!   in-memory implementations
//! - [`assist`]: category classifier, canned suggestions and repair analysis triage
//! - [`desk`]: local stores wired to a submitter, plus request history
//! - [`display`]: markdown rendering for the CLI
//!
//! # Quick Start
//!
//! ```rust
//! use wrench_core::{
//!     models::{DraftPatch, SessionContext, Urgency},
//!     store::{MemoryBlobStore, MemoryRecordStore},
//!     submit::{SubmitOptions, Submitter},
//!     workflow::{RequestWorkflow, StepId},
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let submitter = Submitter::new(MemoryRecordStore::new(), MemoryBlobStore::new());
//! let session = SessionContext::new("tenant-1", "Ada", "ada@example.com");
//! let mut workflow = RequestWorkflow::new(session, Some("prop-12".to_string()));
//!
//! workflow.update(DraftPatch {
//!     category: Some("plumbing".to_string()),
//!     description: Some("Kitchen faucet leaking for 2 days".to_string()),
//!     urgency: Some(Urgency::High),
//!     location: Some("Kitchen".to_string()),
//!     ..Default::default()
//! });
//! while workflow.current_step() != StepId::Submission {
//!     workflow.advance()?;
//! }
//!
//! let result = workflow.submit(&submitter, &SubmitOptions::default()).await?;
//! assert!(!result.request.details.is_emergency);
//! println!("{result}");
//! # Ok(())
//! # }
//! ```

pub mod assist;
pub mod desk;
pub mod display;
pub mod error;
pub mod form;
pub mod models;
pub mod params;
pub mod store;
pub mod submit;
pub mod validation;
pub mod workflow;

pub use desk::{Desk, DeskBuilder};
pub use display::{CreateResult, DeleteResult, OperationStatus, Requests, UpdateResult};
pub use error::{Result, WrenchError};
pub use models::{
    DraftPatch, MaintenanceRequest, RequestDraft, RequestStatus, SessionContext, Urgency,
};
pub use submit::{SubmissionResult, SubmitError, SubmitOptions, Submitter};
pub use workflow::{NavigationError, RequestWorkflow, StepId};
