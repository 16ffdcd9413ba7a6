//! Turns a finished draft into a stored maintenance request.
//!
//! [`Submitter::submit`] runs these stages in order:
//!
//! 1. Validate the draft. Nothing is uploaded for an incomplete draft.
//! 2. Look for a still-submitted request from the same tenant and origin,
//!    created inside the idempotency window, with the same category, urgency,
//!    description and location as the draft. A match is returned as-is with
//!    `reused = true`. A failing lookup is logged and treated as "no match".
//!    A zero or negative window skips the lookup entirely.
//! 3. Upload every photo concurrently and wait for all of them to settle.
//!    Photos already stored by an earlier attempt are not uploaded again.
//! 4. Create the record with `priority` and `is_emergency` derived from the
//!    urgency.
//! 5. Attach an [`AdvisoryEstimate`] for display.

use futures::future::join_all;
use jiff::{SignedDuration, Timestamp};
use log::{debug, error, info, warn};

use crate::{
    models::{
        MaintenanceRequest, NewRequest, PreviewHandle, RequestDraft, RequestQuery,
        RequestStatus, SessionContext,
    },
    store::{BlobStore, RecordStore},
    validation::{validate_ready_for_submission, ValidationError},
};

pub mod error;
pub mod estimate;

pub use error::{AttachmentFailure, SubmitError};
pub use estimate::AdvisoryEstimate;

/// Origin tag written on requests created through the workflow.
pub const DEFAULT_ORIGIN: &str = "tenant-request-wizard";

/// Prefix for uploaded photo paths.
pub const DEFAULT_BLOB_NAMESPACE: &str = "maintenance-photos";

/// Window in which a second submission returns the first request.
pub const DEFAULT_IDEMPOTENCY_WINDOW: SignedDuration = SignedDuration::from_secs(5 * 60);

/// Settings for a [`Submitter`].
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitConfig {
    pub origin: String,
    pub idempotency_window: SignedDuration,
    pub blob_namespace: String,
}

impl Default for SubmitConfig {
    fn default() -> Self {
        Self {
            origin: DEFAULT_ORIGIN.to_string(),
            idempotency_window: DEFAULT_IDEMPOTENCY_WINDOW,
            blob_namespace: DEFAULT_BLOB_NAMESPACE.to_string(),
        }
    }
}

/// What to do when some photos fail to upload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AttachmentPolicy {
    /// Create nothing unless every photo uploaded.
    ///
    /// Photos that did upload before the failure stay in the blob store and
    /// are listed in [`SubmitError::Attachments`]. Pass them back through
    /// [`SubmitOptions::uploaded`] on the retry so they are not stored a
    /// second time under a new path. [`RequestWorkflow::submit`] does this on
    /// its own. A caller that drops the list and retries writes fresh copies,
    /// and the earlier ones are left without a request pointing at them.
    ///
    /// [`RequestWorkflow::submit`]: crate::workflow::RequestWorkflow::submit
    #[default]
    RequireAll,
    /// Create the request with the photos that did upload
    SkipFailed,
}

/// A photo that reached the blob store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedPhoto {
    /// Attachment the upload belongs to
    pub preview: PreviewHandle,
    /// URL returned by the blob store
    pub url: String,
}

/// Per-call submission options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmitOptions {
    pub attachments: AttachmentPolicy,

    /// Photos stored by an earlier attempt for the same draft. Attachments
    /// listed here keep their URL and are not uploaded again.
    pub uploaded: Vec<UploadedPhoto>,
}

impl SubmitOptions {
    /// Options for retrying without the photos that failed.
    pub fn skip_failed_photos() -> Self {
        Self {
            attachments: AttachmentPolicy::SkipFailed,
            ..Default::default()
        }
    }

    /// Adds earlier uploads to reuse. A later entry for the same attachment
    /// replaces an earlier one.
    pub fn reusing(mut self, uploaded: impl IntoIterator<Item = UploadedPhoto>) -> Self {
        for photo in uploaded {
            self.uploaded.retain(|known| known.preview != photo.preview);
            self.uploaded.push(photo);
        }
        self
    }
}

/// Outcome of a successful submission.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionResult {
    /// The stored request
    pub request: MaintenanceRequest,

    /// True when an earlier request inside the idempotency window was
    /// returned instead of creating a new one
    pub reused: bool,

    /// URLs of the photos stored with the request
    pub photo_urls: Vec<String>,

    /// File names of photos left out under [`AttachmentPolicy::SkipFailed`]
    pub skipped: Vec<String>,

    /// Display-only response estimate
    pub estimate: AdvisoryEstimate,
}

impl SubmissionResult {
    pub fn id(&self) -> u64 {
        self.request.id
    }
}

/// Builds the blob path for one attachment.
///
/// ```rust
/// use wrench_core::submit::blob_path;
///
/// assert_eq!(
///     blob_path("photos", "tenant-1", 1700000000000, 0, "my leak (1).JPG"),
///     "photos/tenant-1/1700000000000_0_my_leak__1_.JPG"
/// );
/// ```
pub fn blob_path(namespace: &str, user_id: &str, millis: i64, index: usize, file_name: &str) -> String {
    format!(
        "{namespace}/{}/{millis}_{index}_{}",
        sanitize_segment(user_id),
        sanitize_segment(file_name)
    )
}

fn sanitize_segment(value: &str) -> String {
    let cleaned: String = value
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.is_empty() || cleaned.chars().all(|c| c == '.') {
        "unnamed".to_string()
    } else {
        cleaned
    }
}

/// Maps a complete draft onto the record payload.
///
/// # Errors
///
/// Returns the first [`ValidationError`] when the draft is not ready.
pub fn build_request(
    session: &SessionContext,
    draft: &RequestDraft,
    origin: &str,
    photo_urls: Vec<String>,
) -> Result<NewRequest, ValidationError> {
    validate_ready_for_submission(draft)?;

    let (Some(category), Some(urgency)) = (draft.category.clone(), draft.urgency) else {
        return Err(ValidationError::new(
            "category",
            "Category and urgency are required",
        ));
    };

    Ok(NewRequest {
        user_id: session.user_id.clone(),
        user_name: session.display_name.clone(),
        user_email: session.email.clone(),
        property_id: draft.property_id.clone(),
        category,
        subcategory: draft.subcategory.clone(),
        description: draft.description.trim().to_string(),
        location: draft.location.trim().to_string(),
        urgency,
        priority: urgency,
        is_emergency: NewRequest::derive_emergency(urgency),
        photo_urls,
        contact_preference: draft.contact_preference,
        best_time_to_contact: draft.best_time_to_contact.clone(),
        allow_entry_without_tenant: draft.allow_entry_without_tenant,
        origin: origin.to_string(),
    })
}

/// Whether a stored request describes the same problem as `draft`.
///
/// Compares the fields the tenant typed, after the same trimming
/// [`build_request`] applies.
fn is_same_request(draft: &RequestDraft, request: &MaintenanceRequest) -> bool {
    let details = &request.details;
    request.status == RequestStatus::Submitted
        && draft.category.as_deref() == Some(details.category.as_str())
        && draft.urgency == Some(details.urgency)
        && draft.description.trim() == details.description
        && draft.location.trim() == details.location
}

/// Submits drafts against a record store and a blob store.
#[derive(Debug)]
pub struct Submitter<R, B> {
    records: R,
    blobs: B,
    config: SubmitConfig,
}

impl<R: RecordStore, B: BlobStore> Submitter<R, B> {
    pub fn new(records: R, blobs: B) -> Self {
        Self::with_config(records, blobs, SubmitConfig::default())
    }

    pub fn with_config(records: R, blobs: B, config: SubmitConfig) -> Self {
        Self {
            records,
            blobs,
            config,
        }
    }

    pub fn records(&self) -> &R {
        &self.records
    }

    pub fn blobs(&self) -> &B {
        &self.blobs
    }

    pub fn config(&self) -> &SubmitConfig {
        &self.config
    }

    /// Submits `draft` on behalf of `session`.
    ///
    /// # Errors
    ///
    /// - [`SubmitError::Invalid`] when the draft is incomplete
    /// - [`SubmitError::Attachments`] when a photo upload fails under
    ///   [`AttachmentPolicy::RequireAll`]. No record is created, and the
    ///   error lists the uploads that did succeed
    /// - [`SubmitError::Create`] when the record store refuses the request
    pub async fn submit(
        &self,
        session: &SessionContext,
        draft: &RequestDraft,
        options: &SubmitOptions,
    ) -> Result<SubmissionResult, SubmitError> {
        validate_ready_for_submission(draft)?;

        if let Some(existing) = self.find_recent(session, draft).await {
            info!(
                "Returning request {} created within the idempotency window",
                existing.id
            );
            return Ok(Self::reused(existing));
        }

        let (uploaded, failed) = self
            .upload_attachments(session, draft, &options.uploaded)
            .await;
        let mut skipped = Vec::new();
        if !failed.is_empty() {
            match options.attachments {
                AttachmentPolicy::RequireAll => {
                    warn!(
                        "{} photo upload(s) failed, not creating the request",
                        failed.len()
                    );
                    return Err(SubmitError::Attachments { failed, uploaded });
                }
                AttachmentPolicy::SkipFailed => {
                    for failure in &failed {
                        warn!(
                            "Submitting without {}: {}",
                            failure.file_name, failure.reason
                        );
                    }
                    skipped = failed.into_iter().map(|f| f.file_name).collect();
                }
            }
        }

        let photo_urls: Vec<String> = uploaded.into_iter().map(|photo| photo.url).collect();
        let payload = build_request(session, draft, &self.config.origin, photo_urls.clone())?;
        let estimate = AdvisoryEstimate::for_request(payload.urgency, &payload.category);

        let request = self.records.create(payload).await.map_err(|e| {
            error!("Record store refused the request: {e:?}");
            SubmitError::Create { source: e }
        })?;
        info!(
            "Created request {} ({}, {})",
            request.id, request.details.category, request.details.urgency
        );

        Ok(SubmissionResult {
            request,
            reused: false,
            photo_urls,
            skipped,
            estimate,
        })
    }

    /// Newest open request from this tenant and origin inside the window
    /// that carries the same content as `draft`.
    /// Lookup errors are logged and reported as "none".
    async fn find_recent(
        &self,
        session: &SessionContext,
        draft: &RequestDraft,
    ) -> Option<MaintenanceRequest> {
        if self.config.idempotency_window <= SignedDuration::ZERO {
            return None;
        }
        let since = Timestamp::now()
            .checked_sub(self.config.idempotency_window)
            .unwrap_or(Timestamp::MIN);
        let query = RequestQuery::recent_duplicate(&session.user_id, &self.config.origin, since);

        match self.records.query(query).await {
            Ok(found) => found
                .into_iter()
                .find(|request| is_same_request(draft, request)),
            Err(e) => {
                warn!("Duplicate check failed, continuing without it: {e}");
                None
            }
        }
    }

    fn reused(request: MaintenanceRequest) -> SubmissionResult {
        let estimate =
            AdvisoryEstimate::for_request(request.details.urgency, &request.details.category);
        SubmissionResult {
            photo_urls: request.details.photo_urls.clone(),
            request,
            reused: true,
            skipped: Vec::new(),
            estimate,
        }
    }

    /// Uploads every attachment at once and waits for all of them.
    ///
    /// Attachments found in `earlier` keep that URL without touching the blob
    /// store. Returns the successful uploads in attachment order and the
    /// failures.
    async fn upload_attachments(
        &self,
        session: &SessionContext,
        draft: &RequestDraft,
        earlier: &[UploadedPhoto],
    ) -> (Vec<UploadedPhoto>, Vec<AttachmentFailure>) {
        if draft.attachments.is_empty() {
            return (Vec::new(), Vec::new());
        }

        let millis = Timestamp::now().as_millisecond();
        let uploads = draft
            .attachments
            .iter()
            .enumerate()
            .map(|(index, attachment)| {
                let reuse = earlier
                    .iter()
                    .find(|photo| photo.preview == attachment.preview)
                    .map(|photo| photo.url.clone());
                let path = blob_path(
                    &self.config.blob_namespace,
                    &session.user_id,
                    millis,
                    index,
                    &attachment.file_name,
                );
                async move {
                    let result = match reuse {
                        Some(url) => {
                            debug!("Reusing earlier upload of {}", attachment.file_name);
                            Ok(url)
                        }
                        None => {
                            debug!("Uploading {} to {path}", attachment.file_name);
                            self.blobs
                                .upload(
                                    path,
                                    attachment.bytes.clone(),
                                    attachment.content_type.clone(),
                                )
                                .await
                        }
                    };
                    (attachment, result)
                }
            });

        let mut uploaded = Vec::new();
        let mut failed = Vec::new();
        for (attachment, result) in join_all(uploads).await {
            match result {
                Ok(url) => uploaded.push(UploadedPhoto {
                    preview: attachment.preview,
                    url,
                }),
                Err(e) => {
                    debug!("Upload of {} failed: {e}", attachment.file_name);
                    failed.push(AttachmentFailure {
                        file_name: attachment.file_name.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }
        (uploaded, failed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ContactPreference, DraftPatch, Urgency};

    fn session() -> SessionContext {
        SessionContext::new("tenant-1", "Ada Tenant", "ada@example.com")
    }

    fn draft(urgency: Urgency) -> RequestDraft {
        let mut draft = RequestDraft::new(Some("prop-9".to_string()));
        draft.merge(DraftPatch {
            category: Some("plumbing".to_string()),
            description: Some("  Kitchen faucet leaking for 2 days  ".to_string()),
            urgency: Some(urgency),
            location: Some("Kitchen".to_string()),
            contact_preference: Some(ContactPreference::Phone),
            ..Default::default()
        });
        draft
    }

    #[test]
    fn test_build_request_derives_priority() {
        let request = build_request(&session(), &draft(Urgency::High), "wizard", vec![]).unwrap();
        assert_eq!(request.priority, Urgency::High);
        assert!(!request.is_emergency);
        assert_eq!(request.description, "Kitchen faucet leaking for 2 days");
        assert_eq!(request.user_name, "Ada Tenant");
        assert_eq!(request.property_id.as_deref(), Some("prop-9"));
        assert_eq!(request.origin, "wizard");
    }

    #[test]
    fn test_build_request_marks_urgent_as_emergency() {
        let request = build_request(&session(), &draft(Urgency::Urgent), "wizard", vec![]).unwrap();
        assert_eq!(request.priority, Urgency::Urgent);
        assert!(request.is_emergency);
    }

    #[test]
    fn test_build_request_rejects_incomplete_draft() {
        let mut incomplete = draft(Urgency::Low);
        incomplete.category = None;
        let err = build_request(&session(), &incomplete, "wizard", vec![]).unwrap_err();
        assert_eq!(err.field, "category");
    }

    fn stored(draft: &RequestDraft) -> MaintenanceRequest {
        let details = build_request(&session(), draft, "wizard", vec![]).unwrap();
        MaintenanceRequest {
            id: 7,
            details,
            status: RequestStatus::Submitted,
            created_at: Timestamp::now(),
            updated_at: Timestamp::now(),
        }
    }

    #[test]
    fn test_same_request_compares_trimmed_content() {
        let original = draft(Urgency::High);
        let request = stored(&original);
        assert!(is_same_request(&original, &request));

        let mut other_urgency = original.clone();
        other_urgency.urgency = Some(Urgency::Urgent);
        assert!(!is_same_request(&other_urgency, &request));

        let mut other_category = original.clone();
        other_category.category = Some("electrical".to_string());
        assert!(!is_same_request(&other_category, &request));

        let mut other_location = original.clone();
        other_location.location = "Bathroom".to_string();
        assert!(!is_same_request(&other_location, &request));

        let mut other_description = original.clone();
        other_description.description = "Bedroom outlet sparks when used".to_string();
        assert!(!is_same_request(&other_description, &request));
    }

    #[test]
    fn test_same_request_ignores_closed_requests() {
        let original = draft(Urgency::High);
        let cancelled = MaintenanceRequest {
            status: RequestStatus::Cancelled,
            ..stored(&original)
        };
        assert!(!is_same_request(&original, &cancelled));
    }

    #[test]
    fn test_reusing_replaces_entries_for_same_attachment() {
        let photo = |n: u64, url: &str| UploadedPhoto {
            preview: PreviewHandle(n),
            url: url.to_string(),
        };
        let options = SubmitOptions::skip_failed_photos()
            .reusing([photo(1, "a"), photo(2, "b")])
            .reusing([photo(1, "a2")]);

        assert_eq!(options.attachments, AttachmentPolicy::SkipFailed);
        assert_eq!(options.uploaded, vec![photo(2, "b"), photo(1, "a2")]);
    }

    #[test]
    fn test_blob_path_sanitizes() {
        assert_eq!(
            blob_path("ns", "../u", 5, 2, "../../etc/passwd"),
            "ns/.._u/5_2_.._.._etc_passwd"
        );
        assert_eq!(blob_path("ns", "u", 5, 0, "   "), "ns/u/5_0_unnamed");
    }
}
