//! Query types for reading stored requests.

use jiff::Timestamp;

use super::{MaintenanceRequest, RequestStatus};

/// Filter options for querying stored requests.
///
/// Results are always ordered newest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestQuery {
    /// Only requests submitted by this user
    pub user_id: Option<String>,

    /// Only requests with this origin tag
    pub origin: Option<String>,

    /// Only requests in this status
    pub status: Option<RequestStatus>,

    /// Only requests created at or after this instant
    pub created_after: Option<Timestamp>,

    /// Maximum number of results
    pub limit: Option<usize>,
}

impl RequestQuery {
    /// All requests belonging to one user.
    pub fn for_user(user_id: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
            ..Default::default()
        }
    }

    /// Still-open requests from `user_id` with the given origin created at or
    /// after `since`. Used by the duplicate-submission guard, which compares
    /// the content of each candidate against the draft being submitted.
    ///
    /// Cancelled and already-handled requests never count as duplicates.
    ///
    /// ```rust
    /// use jiff::Timestamp;
    /// use wrench_core::models::{RequestQuery, RequestStatus};
    ///
    /// let query = RequestQuery::recent_duplicate("tenant-7", "wizard", Timestamp::UNIX_EPOCH);
    /// assert_eq!(query.status, Some(RequestStatus::Submitted));
    /// assert_eq!(query.origin.as_deref(), Some("wizard"));
    /// assert_eq!(query.limit, None);
    /// ```
    pub fn recent_duplicate(
        user_id: impl Into<String>,
        origin: impl Into<String>,
        since: Timestamp,
    ) -> Self {
        Self {
            user_id: Some(user_id.into()),
            origin: Some(origin.into()),
            status: Some(RequestStatus::Submitted),
            created_after: Some(since),
            limit: None,
        }
    }

    /// Whether a request satisfies every filter of this query.
    pub fn matches(&self, request: &MaintenanceRequest) -> bool {
        self.user_id
            .as_ref()
            .map_or(true, |user| *user == request.details.user_id)
            && self
                .origin
                .as_ref()
                .map_or(true, |origin| *origin == request.details.origin)
            && self.status.map_or(true, |status| status == request.status)
            && self
                .created_after
                .map_or(true, |after| request.created_at >= after)
    }
}
