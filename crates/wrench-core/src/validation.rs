//! Field validators for the request draft.
//!
//! Every validator is a pure function that returns `Ok(())` or a
//! [`ValidationError`] carrying a reason the tenant can act on. The limits
//! below are the only place attachment and description rules are defined;
//! the form, the step checks and the review all call these functions.

use thiserror::Error;

use crate::models::{Attachment, RequestDraft, Urgency};

/// Maximum number of photos on one request.
pub const MAX_ATTACHMENTS: usize = 5;

/// Maximum size of a single photo in bytes (10 MiB).
pub const MAX_ATTACHMENT_BYTES: usize = 10 * 1024 * 1024;

/// Minimum description length, counted in characters after trimming.
pub const MIN_DESCRIPTION_CHARS: usize = 10;

/// Maximum description length in characters.
pub const MAX_DESCRIPTION_CHARS: usize = 2000;

/// MIME types accepted for photos.
pub const ALLOWED_IMAGE_TYPES: [&str; 5] = [
    "image/jpeg",
    "image/png",
    "image/gif",
    "image/webp",
    "image/heic",
];

/// A field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason}")]
pub struct ValidationError {
    /// Name of the draft field that failed
    pub field: &'static str,

    /// Human-readable reason
    pub reason: String,
}

impl ValidationError {
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

/// Result of a single validator.
pub type Validation = Result<(), ValidationError>;

/// Category must be chosen.
pub fn validate_category(category: Option<&str>) -> Validation {
    match category.map(str::trim) {
        Some(c) if !c.is_empty() => Ok(()),
        _ => Err(ValidationError::new(
            "category",
            "Please choose a category for the issue",
        )),
    }
}

/// Description must be between the minimum and maximum length.
///
/// ```rust
/// use wrench_core::validation::validate_description;
///
/// assert!(validate_description("Leaky").is_err());
/// assert!(validate_description("Kitchen faucet leaking for 2 days").is_ok());
/// ```
pub fn validate_description(description: &str) -> Validation {
    let chars = description.trim().chars().count();
    if chars < MIN_DESCRIPTION_CHARS {
        return Err(ValidationError::new(
            "description",
            format!(
                "Description must be at least {MIN_DESCRIPTION_CHARS} characters (currently {chars})"
            ),
        ));
    }
    if chars > MAX_DESCRIPTION_CHARS {
        return Err(ValidationError::new(
            "description",
            format!("Description must be at most {MAX_DESCRIPTION_CHARS} characters"),
        ));
    }
    Ok(())
}

/// Urgency must be chosen.
pub fn validate_urgency(urgency: Option<Urgency>) -> Validation {
    urgency.map(|_| ()).ok_or_else(|| {
        ValidationError::new("urgency", "Please tell us how urgent the issue is")
    })
}

/// Location must be non-blank.
pub fn validate_location(location: &str) -> Validation {
    if location.trim().is_empty() {
        Err(ValidationError::new(
            "location",
            "Please say where in the unit the issue is",
        ))
    } else {
        Ok(())
    }
}

/// A single file must be an allowed image type within the size limit.
pub fn validate_attachment(file_name: &str, content_type: &str, size: usize) -> Validation {
    let content_type = content_type.trim().to_lowercase();
    if !ALLOWED_IMAGE_TYPES.contains(&content_type.as_str()) {
        return Err(ValidationError::new(
            "attachments",
            format!("{file_name} is not a supported image type ({content_type})"),
        ));
    }
    if size == 0 {
        return Err(ValidationError::new(
            "attachments",
            format!("{file_name} is empty"),
        ));
    }
    if size > MAX_ATTACHMENT_BYTES {
        return Err(ValidationError::new(
            "attachments",
            format!(
                "{file_name} is larger than {} MB",
                MAX_ATTACHMENT_BYTES / (1024 * 1024)
            ),
        ));
    }
    Ok(())
}

/// One more file may be added to `existing` without exceeding the cap.
pub fn validate_attachment_count(existing: &[Attachment]) -> Validation {
    if existing.len() >= MAX_ATTACHMENTS {
        Err(ValidationError::new(
            "attachments",
            format!("You can attach at most {MAX_ATTACHMENTS} photos"),
        ))
    } else {
        Ok(())
    }
}

/// Every attachment already on the draft is acceptable.
pub fn validate_attachments(attachments: &[Attachment]) -> Validation {
    if attachments.len() > MAX_ATTACHMENTS {
        return Err(ValidationError::new(
            "attachments",
            format!("You can attach at most {MAX_ATTACHMENTS} photos"),
        ));
    }
    attachments
        .iter()
        .try_for_each(|a| validate_attachment(&a.file_name, &a.content_type, a.size()))
}

/// Basic shape check for a contact email.
pub fn validate_email(email: &str) -> Validation {
    let email = email.trim();
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !email.contains(char::is_whitespace)
        }
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err(ValidationError::new(
            "email",
            format!("'{email}' is not a valid email address"),
        ))
    }
}

/// Everything the record needs before it may be submitted.
pub fn validate_ready_for_submission(draft: &RequestDraft) -> Validation {
    validate_category(draft.category.as_deref())?;
    validate_description(&draft.description)?;
    validate_urgency(draft.urgency)?;
    validate_location(&draft.location)?;
    validate_attachments(&draft.attachments)
}
