//! Wrappers that format the outcome of desk and workflow operations.

use std::fmt;

use crate::{
    models::{MaintenanceRequest, PropertyInvite},
    submit::SubmissionResult,
};

/// Result of creating a resource.
pub struct CreateResult<T> {
    pub resource: T,
}

impl<T> CreateResult<T> {
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for CreateResult<PropertyInvite> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Added invite {}", self.resource.code)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Result of changing a stored request.
pub struct UpdateResult<T> {
    pub resource: T,
    pub changes: Vec<String>,
}

impl<T> UpdateResult<T> {
    pub fn new(resource: T) -> Self {
        Self {
            resource,
            changes: Vec::new(),
        }
    }

    pub fn with_changes(resource: T, changes: Vec<String>) -> Self {
        Self { resource, changes }
    }
}

impl fmt::Display for UpdateResult<MaintenanceRequest> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Updated request {}", self.resource.id)?;
        if !self.changes.is_empty() {
            writeln!(f)?;
            for change in &self.changes {
                writeln!(f, "- {change}")?;
            }
        }
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Result of permanently deleting a request.
pub struct DeleteResult<T> {
    pub resource: T,
}

impl<T> DeleteResult<T> {
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for DeleteResult<MaintenanceRequest> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Deleted request {} ({} in {})",
            self.resource.id, self.resource.details.category, self.resource.details.location
        )
    }
}

impl fmt::Display for SubmissionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.reused {
            writeln!(
                f,
                "You already submitted this request. Showing request {}.",
                self.request.id
            )?;
        } else {
            writeln!(f, "Request {} submitted.", self.request.id)?;
        }
        writeln!(f)?;

        writeln!(f, "- **Expected response**: {}", self.estimate.response_window)?;
        writeln!(f, "- **Assigned to**: {}", self.estimate.team)?;
        if self.request.details.is_emergency {
            writeln!(
                f,
                "- **Emergency**: if there is immediate danger, also call emergency services"
            )?;
        }
        if !self.photo_urls.is_empty() {
            writeln!(f, "- **Photos**: {}", self.photo_urls.len())?;
        }
        if !self.skipped.is_empty() {
            writeln!(f, "- **Not attached**: {}", self.skipped.join(", "))?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "_Response times are estimates, not a guarantee._"
        )
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use super::*;
    use crate::{
        models::{NewRequest, RequestStatus, Urgency},
        submit::AdvisoryEstimate,
    };

    fn request(urgency: Urgency) -> MaintenanceRequest {
        MaintenanceRequest {
            id: 3,
            details: NewRequest {
                user_id: "tenant-1".to_string(),
                user_name: "Ada".to_string(),
                user_email: "ada@example.com".to_string(),
                property_id: None,
                category: "plumbing".to_string(),
                subcategory: None,
                description: "Kitchen faucet leaking for 2 days".to_string(),
                location: "Kitchen".to_string(),
                urgency,
                priority: urgency,
                is_emergency: urgency == Urgency::Urgent,
                photo_urls: vec![],
                contact_preference: None,
                best_time_to_contact: None,
                allow_entry_without_tenant: false,
                origin: "tenant-request-wizard".to_string(),
            },
            status: RequestStatus::Submitted,
            created_at: Timestamp::from_second(1_640_995_200).unwrap(),
            updated_at: Timestamp::from_second(1_640_995_200).unwrap(),
        }
    }

    #[test]
    fn test_submission_display() {
        let result = SubmissionResult {
            request: request(Urgency::Urgent),
            reused: false,
            photo_urls: vec!["memory://a".to_string()],
            skipped: vec!["b.jpg".to_string()],
            estimate: AdvisoryEstimate::for_request(Urgency::Urgent, "plumbing"),
        };
        let out = result.to_string();
        assert!(out.starts_with("Request 3 submitted."));
        assert!(out.contains("- **Expected response**: Within 4 hours"));
        assert!(out.contains("- **Assigned to**: Plumbing Team"));
        assert!(out.contains("**Emergency**"));
        assert!(out.contains("- **Not attached**: b.jpg"));
    }

    #[test]
    fn test_reused_submission_display() {
        let result = SubmissionResult {
            request: request(Urgency::Low),
            reused: true,
            photo_urls: vec![],
            skipped: vec![],
            estimate: AdvisoryEstimate::for_request(Urgency::Low, "plumbing"),
        };
        let out = result.to_string();
        assert!(out.starts_with("You already submitted this request"));
        assert!(!out.contains("**Emergency**"));
    }

    #[test]
    fn test_update_and_delete_display() {
        let updated = UpdateResult::with_changes(
            request(Urgency::Low),
            vec!["Status changed to cancelled".to_string()],
        );
        assert!(updated
            .to_string()
            .contains("Updated request 3\n\n- Status changed to cancelled"));

        let deleted = DeleteResult::new(request(Urgency::Low));
        assert_eq!(deleted.to_string(), "Deleted request 3 (plumbing in Kitchen)\n");
    }
}
