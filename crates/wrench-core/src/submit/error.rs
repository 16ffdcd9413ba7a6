use thiserror::Error;

use super::UploadedPhoto;
use crate::{error::WrenchError, validation::ValidationError, workflow::StepId};

/// One photo that could not be uploaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentFailure {
    pub file_name: String,
    pub reason: String,
}

/// Why a submission did not produce a request.
///
/// `Display` carries the full detail for logs. Use
/// [`SubmitError::user_message`] for anything shown to the tenant.
#[derive(Error, Debug)]
pub enum SubmitError {
    /// The draft is missing required data
    #[error("Request is incomplete: {0}")]
    Invalid(#[from] ValidationError),
    /// Submit was called before the workflow reached the submission step
    #[error("Submission attempted from step {step}")]
    OutOfSequence { step: StepId },
    /// At least one photo failed to upload
    ///
    /// `uploaded` lists the photos that did reach the blob store, so a retry
    /// can reuse them.
    #[error("{} of {} photo upload(s) failed", failed.len(), failed.len() + uploaded.len())]
    Attachments {
        failed: Vec<AttachmentFailure>,
        uploaded: Vec<UploadedPhoto>,
    },
    /// The record store refused to create the request
    #[error("Failed to create request: {source}")]
    Create {
        #[source]
        source: WrenchError,
    },
}

impl SubmitError {
    /// Message safe to show to the tenant.
    pub fn user_message(&self) -> String {
        match self {
            SubmitError::Invalid(e) => e.reason.clone(),
            SubmitError::OutOfSequence { .. } => {
                "Please review your request before submitting.".to_string()
            }
            SubmitError::Attachments { .. } => {
                "Could not attach photos. Retry or submit without them.".to_string()
            }
            SubmitError::Create { .. } => {
                "We couldn't submit your request. Your details are saved, please try again."
                    .to_string()
            }
        }
    }

    /// Whether submitting the same draft again may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            SubmitError::Attachments { .. } | SubmitError::Create { .. }
        )
    }

    /// Names of the photos that failed to upload, if that is the failure.
    pub fn failed_attachments(&self) -> &[AttachmentFailure] {
        match self {
            SubmitError::Attachments { failed, .. } => failed,
            _ => &[],
        }
    }
}
