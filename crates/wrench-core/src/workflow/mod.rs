//! The stepwise request-composition workflow.
//!
//! [`RequestWorkflow`] ties one tenant session to a [`FormState`] and a
//! [`StepNavigator`]. Front ends drive it with draft updates and step
//! transitions and finally call [`RequestWorkflow::submit`].
//!
//! # Examples
//!
//! ```rust
//! use wrench_core::{
//!     models::{DraftPatch, SessionContext, Urgency},
//!     workflow::{RequestWorkflow, StepId},
//! };
//!
//! let session = SessionContext::new("tenant-1", "Ada", "ada@example.com");
//! let mut workflow = RequestWorkflow::new(session, None);
//!
//! workflow.advance().unwrap();
//! assert_eq!(workflow.current_step(), StepId::Category);
//!
//! // Category is still missing, so the navigator stays put.
//! assert!(workflow.advance().is_err());
//!
//! workflow.update(DraftPatch::category("plumbing"));
//! workflow.update(DraftPatch::urgency(Urgency::Medium));
//! assert_eq!(workflow.advance().unwrap(), StepId::Description);
//! ```

use log::{debug, info, warn};

use crate::{
    assist::{Classification, Classifier},
    error::Result,
    form::FormState,
    models::{Attachment, DraftPatch, PreviewHandle, RequestDraft, SessionContext},
    store::{BlobStore, RecordStore},
    submit::{SubmissionResult, SubmitError, SubmitOptions, Submitter, UploadedPhoto},
    validation::ValidationError,
};

pub mod navigator;
pub mod review;
pub mod steps;

#[cfg(test)]
mod tests;

pub use navigator::{NavigationError, StepNavigator};
pub use review::{Review, ReviewSection};
pub use steps::{StepDescriptor, StepId, STEPS};

/// One tenant's request composition session.
#[derive(Debug)]
pub struct RequestWorkflow {
    session: SessionContext,
    form: FormState,
    navigator: StepNavigator,
    last_error: Option<String>,
    /// Photos stored by a failed submission, reused by the next attempt
    uploaded: Vec<UploadedPhoto>,
}

impl RequestWorkflow {
    /// Starts a session at the welcome step with an empty draft.
    pub fn new(session: SessionContext, property_id: Option<String>) -> Self {
        Self {
            session,
            form: FormState::new(property_id),
            navigator: StepNavigator::new(),
            last_error: None,
            uploaded: Vec::new(),
        }
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn draft(&self) -> &RequestDraft {
        self.form.get()
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn navigator(&self) -> &StepNavigator {
        &self.navigator
    }

    pub fn current_step(&self) -> StepId {
        self.navigator.current()
    }

    /// Tenant-facing message from the last failed submission, cleared by the
    /// next successful one.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn update(&mut self, patch: DraftPatch) {
        self.form.update(patch);
    }

    pub fn update_with<F>(&mut self, f: F)
    where
        F: FnOnce(&RequestDraft) -> DraftPatch,
    {
        self.form.update_with(f);
    }

    pub fn attach(
        &mut self,
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> std::result::Result<PreviewHandle, ValidationError> {
        self.form.attach(file_name, content_type, bytes)
    }

    pub fn remove_attachment(&mut self, handle: PreviewHandle) -> Option<Attachment> {
        self.uploaded.retain(|photo| photo.preview != handle);
        self.form.remove_attachment(handle)
    }

    /// Photos a failed submission already stored. The next
    /// [`RequestWorkflow::submit`] reuses them instead of uploading again.
    pub fn pending_uploads(&self) -> &[UploadedPhoto] {
        &self.uploaded
    }

    pub fn advance(&mut self) -> std::result::Result<StepId, NavigationError> {
        self.navigator.advance(self.form.get())
    }

    pub fn back(&mut self) -> std::result::Result<StepId, NavigationError> {
        self.navigator.back()
    }

    pub fn jump_to(&mut self, step: StepId) -> std::result::Result<StepId, NavigationError> {
        self.navigator.jump_to(step)
    }

    pub fn return_to_review(&mut self) -> std::result::Result<StepId, NavigationError> {
        self.navigator.return_to_review(self.form.get())
    }

    pub fn review(&self) -> Review {
        Review::of(self.form.get())
    }

    /// Fills the category from a classifier suggestion.
    ///
    /// The decision is made against the latest draft, so a category the
    /// tenant picked in the meantime is never overwritten. Returns whether
    /// the category was set.
    pub fn apply_classification(&mut self, classification: &Classification) -> bool {
        let mut applied = false;
        self.form.update_with(|draft| {
            if draft.category.is_none() && classification.is_confident() {
                applied = true;
                DraftPatch::category(classification.category.clone())
            } else {
                DraftPatch::default()
            }
        });
        if applied {
            debug!(
                "Applied suggested category {} ({:.2})",
                classification.category, classification.confidence
            );
        }
        applied
    }

    /// Classifies the current description and applies a confident result.
    pub async fn suggest_category<C: Classifier>(
        &mut self,
        classifier: &C,
    ) -> Result<Option<Classification>> {
        let description = self.form.get().description.clone();
        let classification = classifier.classify(&description).await?;
        if let Some(found) = &classification {
            self.apply_classification(found);
        }
        Ok(classification)
    }

    /// Submits the draft. Only allowed on the submission step.
    ///
    /// On success the navigator completes and the draft is discarded along
    /// with its previews. On failure the workflow stays on the submission
    /// step with the draft intact, so the same call can be retried. Photos
    /// that uploaded before a failure are remembered and not stored again on
    /// the retry.
    pub async fn submit<R, B>(
        &mut self,
        submitter: &Submitter<R, B>,
        options: &SubmitOptions,
    ) -> std::result::Result<SubmissionResult, SubmitError>
    where
        R: RecordStore,
        B: BlobStore,
    {
        let step = self.navigator.current();
        if step != StepId::Submission || self.navigator.is_completed() {
            return Err(SubmitError::OutOfSequence { step });
        }

        let options = options.clone().reusing(self.uploaded.iter().cloned());
        match submitter.submit(&self.session, self.form.get(), &options).await {
            Ok(result) => {
                if let Err(e) = self.navigator.complete() {
                    warn!("Could not mark the workflow complete: {e}");
                }
                self.form.discard();
                self.uploaded.clear();
                self.last_error = None;
                info!("Submission finished with request {}", result.id());
                Ok(result)
            }
            Err(e) => {
                // The error lists reused photos too, so it replaces the cache.
                if let SubmitError::Attachments { uploaded, .. } = &e {
                    self.uploaded.clone_from(uploaded);
                }
                self.last_error = Some(e.user_message());
                Err(e)
            }
        }
    }

    /// Abandons the draft and returns to the welcome step.
    pub fn cancel(&mut self) {
        debug!("Workflow cancelled on {}", self.navigator.current());
        self.restart();
    }

    /// Starts a fresh request after a completed one.
    pub fn restart(&mut self) {
        self.form.discard();
        self.navigator.reset();
        self.uploaded.clear();
        self.last_error = None;
    }
}
