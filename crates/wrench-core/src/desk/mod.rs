//! The maintenance desk: local stores plus the submitter, and the request
//! history operations the front end needs after submission.
//!
//! # Examples
//!
//! ```rust,no_run
//! use wrench_core::{models::SessionContext, params::ListRequests, DeskBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let desk = DeskBuilder::new()
//!     .with_database_path(Some("/tmp/requests.db"))
//!     .with_blob_dir(Some("/tmp/blobs"))
//!     .build()
//!     .await?;
//!
//! let session = SessionContext::new("tenant-1", "Ada", "ada@example.com");
//! let requests = desk.list_requests(&session, &ListRequests::default()).await?;
//! println!("{requests}");
//! # Ok(())
//! # }
//! ```

use log::{debug, info};

use crate::{
    display::Requests,
    error::{Result, WrenchError},
    models::{
        MaintenanceRequest, PropertyInvite, RequestQuery, RequestStatus, RequestUpdate,
        SessionContext,
    },
    params::{AddInvite, DeleteRequest, Id, ListRequests, SetStatus},
    store::{FsBlobStore, InviteLookup, RecordStore, SqliteStore},
    submit::Submitter,
    workflow::RequestWorkflow,
};

pub mod builder;

pub use builder::DeskBuilder;

/// Request desk backed by SQLite and the filesystem.
#[derive(Debug)]
pub struct Desk {
    store: SqliteStore,
    submitter: Submitter<SqliteStore, FsBlobStore>,
}

impl Desk {
    pub(crate) fn new(store: SqliteStore, submitter: Submitter<SqliteStore, FsBlobStore>) -> Self {
        Self { store, submitter }
    }

    pub fn store(&self) -> &SqliteStore {
        &self.store
    }

    pub fn submitter(&self) -> &Submitter<SqliteStore, FsBlobStore> {
        &self.submitter
    }

    /// Starts a workflow for `session`, tied to the property behind `invite`
    /// when one is given.
    ///
    /// # Errors
    ///
    /// `WrenchError::InvalidInput` when the invite code is unknown.
    pub async fn start_request(
        &self,
        session: SessionContext,
        invite: Option<&str>,
    ) -> Result<RequestWorkflow> {
        let property_id = match invite {
            Some(code) => {
                let invite = self.resolve_invite(code).await?.ok_or_else(|| {
                    WrenchError::invalid_input("invite")
                        .with_reason(format!("Unknown invite code '{code}'"))
                })?;
                debug!("Invite {} resolved to {}", invite.code, invite.property_id);
                Some(invite.property_id)
            }
            None => None,
        };
        Ok(RequestWorkflow::new(session, property_id))
    }

    /// Lists the tenant's requests, newest first.
    pub async fn list_requests(
        &self,
        session: &SessionContext,
        params: &ListRequests,
    ) -> Result<Requests> {
        let query = RequestQuery {
            status: params.parsed_status()?,
            limit: params.limit,
            ..RequestQuery::for_user(&session.user_id)
        };
        Ok(Requests(self.store.query(query).await?))
    }

    pub async fn get_request(&self, params: &Id) -> Result<Option<MaintenanceRequest>> {
        self.store.get(params.id).await
    }

    /// Cancels one of the tenant's own requests.
    ///
    /// Only requests still in `submitted` can be cancelled; once a team has
    /// picked a request up it has to be closed by them.
    ///
    /// # Errors
    ///
    /// - `WrenchError::RequestNotFound` for an unknown id
    /// - `WrenchError::InvalidInput` when the request belongs to someone
    ///   else or is past `submitted`
    pub async fn cancel_request(
        &self,
        session: &SessionContext,
        params: &Id,
    ) -> Result<MaintenanceRequest> {
        let request = self
            .store
            .get(params.id)
            .await?
            .ok_or(WrenchError::RequestNotFound { id: params.id })?;

        if request.details.user_id != session.user_id {
            return Err(WrenchError::invalid_input("id")
                .with_reason(format!("Request {} belongs to another tenant", params.id)));
        }
        if request.status != RequestStatus::Submitted {
            return Err(WrenchError::invalid_input("status").with_reason(format!(
                "Only submitted requests can be cancelled (request {} is {})",
                params.id, request.status
            )));
        }

        let cancelled = self
            .store
            .update(params.id, RequestUpdate::status(RequestStatus::Cancelled))
            .await?;
        info!("Request {} cancelled by {}", params.id, session.user_id);
        Ok(cancelled)
    }

    /// Permanently deletes a request. Requires `confirmed`.
    ///
    /// Returns the deleted request, or `None` if it did not exist.
    pub async fn delete_request(&self, params: &DeleteRequest) -> Result<Option<MaintenanceRequest>> {
        if !params.confirmed {
            return Err(WrenchError::invalid_input("confirmed").with_reason(
                "Deleting a request cannot be undone. Confirm to proceed with permanent deletion.",
            ));
        }

        let request = self.store.get(params.id).await?;
        if request.is_some() {
            self.store.delete(params.id).await?;
            info!("Request {} deleted", params.id);
        }
        Ok(request)
    }

    /// Moves a request to another status.
    pub async fn update_status(&self, params: &SetStatus) -> Result<MaintenanceRequest> {
        let status = params.parsed_status()?;
        self.store
            .update(params.id, RequestUpdate::status(status))
            .await
    }

    pub async fn resolve_invite(&self, code: &str) -> Result<Option<PropertyInvite>> {
        self.store.resolve(code.to_string()).await
    }

    pub async fn add_invite(&self, params: &AddInvite) -> Result<PropertyInvite> {
        self.store
            .add_invite(
                params.code.clone(),
                params.property_id.clone(),
                params.property_name.clone(),
            )
            .await
    }
}
