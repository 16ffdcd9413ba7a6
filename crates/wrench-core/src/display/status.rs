//! One-line confirmation messages.
//!
//! Used for feedback that has no record to show, such as a refused step or
//! a classification that found nothing.

use std::fmt;

/// Success or failure line shown after an operation.
///
/// Renders as a single markdown line with a bold `Done:` or `Error:` label
/// followed by the message, so terminal output and plain-text output read
/// the same. Operations that return a record use the result wrappers such as
/// [`crate::display::CreateResult`] instead.
///
/// The message is shown verbatim. Pass tenant-facing text only, for example
/// [`crate::submit::SubmitError::user_message`] rather than the error's
/// `Display` output.
///
/// ```rust
/// use wrench_core::display::OperationStatus;
///
/// let status = OperationStatus::failure("Please choose an urgency");
/// assert_eq!(status.to_string(), "**Error:** Please choose an urgency\n");
/// ```
pub struct OperationStatus {
    /// Text after the label
    pub message: String,
    /// Picks the `Done:` label when true and `Error:` otherwise
    pub success: bool,
}

impl OperationStatus {
    /// Creates a status labelled `Done:`.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: true,
        }
    }

    /// Creates a status labelled `Error:`.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            success: false,
        }
    }
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = if self.success { "**Done:**" } else { "**Error:**" };
        writeln!(f, "{label} {}", self.message)
    }
}
