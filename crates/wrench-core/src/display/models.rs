//! Display implementations for domain models.
//!
//! Everything here renders markdown that the CLI passes to termimad.

use std::fmt;

use super::datetime::LocalDateTime;
use crate::{
    assist::Classification,
    models::{ContactPreference, MaintenanceRequest, PropertyInvite, RequestStatus, Urgency},
    workflow::{Review, StepId},
};

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for ContactPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl MaintenanceRequest {
    /// Compact entry used in request lists.
    pub(crate) fn fmt_summary(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let emergency = if self.details.is_emergency {
            " **EMERGENCY**"
        } else {
            ""
        };
        writeln!(
            f,
            "## {}. {} in {} ({}){emergency}",
            self.id,
            self.details.category,
            self.details.location,
            self.status.with_icon()
        )?;
        writeln!(f)?;
        writeln!(f, "- **Urgency**: {}", self.details.urgency)?;
        writeln!(f, "- **Submitted**: {}", LocalDateTime(&self.created_at))?;
        writeln!(f)
    }
}

impl fmt::Display for MaintenanceRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let details = &self.details;
        match &details.subcategory {
            Some(sub) => writeln!(f, "# {}. {} ({sub})", self.id, details.category)?,
            None => writeln!(f, "# {}. {}", self.id, details.category)?,
        }
        writeln!(f)?;

        writeln!(f, "- Status: {}", self.status.with_icon())?;
        writeln!(f, "- Urgency: {}", details.urgency)?;
        if details.is_emergency {
            writeln!(f, "- Emergency: yes")?;
        }
        writeln!(f, "- Location: {}", details.location)?;
        if let Some(property) = &details.property_id {
            writeln!(f, "- Property: {property}")?;
        }
        writeln!(f, "- Submitted by: {} <{}>", details.user_name, details.user_email)?;
        writeln!(f, "- Created: {}", LocalDateTime(&self.created_at))?;
        writeln!(f, "- Updated: {}", LocalDateTime(&self.updated_at))?;

        writeln!(f)?;
        writeln!(f, "{}", details.description)?;

        if details.contact_preference.is_some()
            || details.best_time_to_contact.is_some()
            || details.allow_entry_without_tenant
        {
            writeln!(f, "\n## Contact")?;
            writeln!(f)?;
            if let Some(pref) = details.contact_preference {
                writeln!(f, "- Preferred: {pref}")?;
            }
            if let Some(best_time) = &details.best_time_to_contact {
                writeln!(f, "- Best time: {best_time}")?;
            }
            if details.allow_entry_without_tenant {
                writeln!(f, "- Entry allowed without tenant present")?;
            }
        }

        if !details.photo_urls.is_empty() {
            writeln!(f, "\n## Photos")?;
            writeln!(f)?;
            for url in &details.photo_urls {
                writeln!(f, "- {url}")?;
            }
        }

        Ok(())
    }
}

impl fmt::Display for PropertyInvite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## {} ({})", self.property_name, self.property_id)?;
        writeln!(f)?;
        writeln!(f, "- **Invite code**: {}", self.code)?;
        writeln!(f, "- **Created**: {}", LocalDateTime(&self.created_at))
    }
}

impl fmt::Display for Review {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Review your request")?;
        writeln!(f)?;
        for section in &self.sections {
            let mark = if section.complete { "✓" } else { "✗" };
            let optional = if section.required { "" } else { " (optional)" };
            writeln!(f, "- {mark} **{}**{optional}: {}", section.title, section.summary)?;
            if let Some(issue) = &section.issue {
                writeln!(f, "  - {issue}")?;
            }
        }
        writeln!(f)?;
        if self.can_submit() {
            writeln!(f, "Ready to submit.")
        } else {
            writeln!(f, "Some required details are missing.")
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({:.0}% confidence",
            self.category,
            self.confidence * 100.0
        )?;
        if !self.matched.is_empty() {
            write!(f, ", matched: {}", self.matched.join(", "))?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use super::*;
    use crate::models::{DraftPatch, NewRequest, RequestDraft};

    fn request() -> MaintenanceRequest {
        MaintenanceRequest {
            id: 7,
            details: NewRequest {
                user_id: "tenant-1".to_string(),
                user_name: "Ada Tenant".to_string(),
                user_email: "ada@example.com".to_string(),
                property_id: Some("prop-1".to_string()),
                category: "plumbing".to_string(),
                subcategory: Some("faucet".to_string()),
                description: "Kitchen faucet leaking for 2 days".to_string(),
                location: "Kitchen".to_string(),
                urgency: Urgency::Urgent,
                priority: Urgency::Urgent,
                is_emergency: true,
                photo_urls: vec!["file:///tmp/a.jpg".to_string()],
                contact_preference: Some(ContactPreference::Text),
                best_time_to_contact: None,
                allow_entry_without_tenant: true,
                origin: "tenant-request-wizard".to_string(),
            },
            status: RequestStatus::Submitted,
            created_at: Timestamp::from_second(1_640_995_200).unwrap(),
            updated_at: Timestamp::from_second(1_640_995_200).unwrap(),
        }
    }

    #[test]
    fn test_request_display() {
        let out = request().to_string();
        assert!(out.starts_with("# 7. plumbing (faucet)\n"));
        assert!(out.contains("- Status: ○ Submitted"));
        assert!(out.contains("- Emergency: yes"));
        assert!(out.contains("- Preferred: text"));
        assert!(out.contains("- Entry allowed without tenant present"));
        assert!(out.contains("## Photos"));
        assert!(out.contains("- file:///tmp/a.jpg"));
    }

    #[test]
    fn test_review_display() {
        let mut draft = RequestDraft::default();
        draft.merge(DraftPatch::category("hvac"));
        let out = Review::of(&draft).to_string();
        assert!(out.contains("- ✓ **Category**: hvac"));
        assert!(out.contains("- ✗ **Urgency**: Not chosen"));
        assert!(out.contains("Some required details are missing."));
    }

    #[test]
    fn test_status_and_step_display() {
        assert_eq!(RequestStatus::InProgress.to_string(), "in_progress");
        assert_eq!(StepId::Media.to_string(), "media");
        assert_eq!(Urgency::High.to_string(), "high");
    }

    #[test]
    fn test_classification_display() {
        let c = Classification {
            category: "plumbing".to_string(),
            confidence: 0.8,
            matched: vec!["leak".to_string(), "sink".to_string()],
        };
        assert_eq!(c.to_string(), "plumbing (80% confidence, matched: leak, sink)");
    }
}
