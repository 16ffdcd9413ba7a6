//! Read-only view of the signed-in tenant.

use serde::{Deserialize, Serialize};

/// Identity of the tenant using the workflow.
///
/// Passed explicitly into the workflow and the submitter; nothing in this
/// crate mutates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionContext {
    pub user_id: String,
    pub display_name: String,
    pub email: String,
}

impl SessionContext {
    pub fn new(
        user_id: impl Into<String>,
        display_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            display_name: display_name.into(),
            email: email.into(),
        }
    }
}
