//! Parameter structures for desk operations.
//!
//! These carry plain data between the front end and [`crate::desk::Desk`]
//! without any framework derives. The CLI defines its own clap wrappers and
//! converts them with `.into()`:
//!
//! ```ignore
//! #[derive(Args)]
//! pub struct ListArgs {
//!     #[arg(long)]
//!     pub status: Option<String>,
//! }
//!
//! impl From<ListArgs> for ListRequests {
//!     fn from(args: ListArgs) -> Self {
//!         ListRequests { status: args.status, limit: None }
//!     }
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::{
    error::{Result, WrenchError},
    models::RequestStatus,
};

/// Parameters for operations requiring just an ID.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Id {
    /// The ID of the request to operate on
    pub id: u64,
}

/// Parameters for listing the current tenant's requests.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListRequests {
    /// Only requests in this status ('submitted', 'in_progress', 'completed',
    /// 'cancelled')
    #[serde(default)]
    pub status: Option<String>,
    /// Maximum number of requests to return
    #[serde(default)]
    pub limit: Option<usize>,
}

impl ListRequests {
    /// Parses the status filter.
    ///
    /// # Errors
    ///
    /// `WrenchError::InvalidInput` when the status is not recognized.
    ///
    /// ```rust
    /// use wrench_core::{models::RequestStatus, params::ListRequests};
    ///
    /// let params = ListRequests { status: Some("in-progress".to_string()), limit: None };
    /// assert_eq!(params.parsed_status().unwrap(), Some(RequestStatus::InProgress));
    /// ```
    pub fn parsed_status(&self) -> Result<Option<RequestStatus>> {
        self.status.as_deref().map(parse_status).transpose()
    }
}

/// Parameters for permanently deleting a request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeleteRequest {
    pub id: u64,
    /// Must be true; deletion cannot be undone
    #[serde(default)]
    pub confirmed: bool,
}

/// Parameters for changing a request's status.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SetStatus {
    pub id: u64,
    /// New status name
    pub status: String,
}

impl SetStatus {
    /// Parses the requested status.
    pub fn parsed_status(&self) -> Result<RequestStatus> {
        parse_status(&self.status)
    }
}

/// Parameters for registering an invite code.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AddInvite {
    pub code: String,
    pub property_id: String,
    pub property_name: String,
}

fn parse_status(value: &str) -> Result<RequestStatus> {
    value
        .parse::<RequestStatus>()
        .map_err(|e| WrenchError::invalid_input("status").with_reason(e))
}
