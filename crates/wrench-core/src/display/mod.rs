//! Markdown formatting for requests, reviews and operation results.
//!
//! Domain types implement [`std::fmt::Display`] in [`models`]. Collections and
//! operation outcomes get newtype wrappers so the same request can render as
//! a list entry, a full record or an update confirmation.
//!
//! - [`collections`]: [`Requests`], [`Suggestions`]
//! - [`results`]: [`CreateResult`], [`UpdateResult`], [`DeleteResult`] and
//!   the display of a [`crate::submit::SubmissionResult`]
//! - [`status`]: [`OperationStatus`]
//! - [`datetime`]: [`LocalDateTime`]

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;
pub mod status;

pub use collections::{Requests, Suggestions};
pub use datetime::LocalDateTime;
pub use results::{CreateResult, DeleteResult, UpdateResult};
pub use status::OperationStatus;
