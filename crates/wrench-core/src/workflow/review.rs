//! Read-only review of the draft before submission.
//!
//! Completeness of each section comes from the same validators the steps use
//! while the tenant is typing, so the review and the live checks can never
//! disagree.

use super::steps::StepId;
use crate::{
    models::RequestDraft,
    validation::{
        validate_attachments, validate_category, validate_description, validate_location,
        validate_urgency, Validation, ValidationError,
    },
};

/// One section of the review screen.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewSection {
    /// Section heading
    pub title: &'static str,

    /// Step to jump to when editing, if the section is editable
    pub edit_step: Option<StepId>,

    /// Whether submission requires this section to be complete
    pub required: bool,

    pub complete: bool,

    /// Current value, formatted for display
    pub summary: String,

    /// Why the section is incomplete
    pub issue: Option<ValidationError>,
}

impl ReviewSection {
    fn from_validation(
        title: &'static str,
        edit_step: Option<StepId>,
        required: bool,
        summary: String,
        validation: Validation,
    ) -> Self {
        Self {
            title,
            edit_step,
            required,
            complete: validation.is_ok(),
            summary,
            issue: validation.err(),
        }
    }
}

/// Review of a whole draft.
#[derive(Debug, Clone, PartialEq)]
pub struct Review {
    pub sections: Vec<ReviewSection>,
}

impl Review {
    /// Builds the review for the current draft.
    pub fn of(draft: &RequestDraft) -> Self {
        let category_summary = match (&draft.category, &draft.subcategory) {
            (Some(category), Some(sub)) => format!("{category} ({sub})"),
            (Some(category), None) => category.clone(),
            (None, _) => "Not chosen".to_string(),
        };

        let urgency_summary = draft
            .urgency
            .map_or_else(|| "Not chosen".to_string(), |u| u.as_str().to_string());

        let photos_summary = if draft.attachments.is_empty() {
            "No photos".to_string()
        } else {
            let names: Vec<_> = draft
                .attachments
                .iter()
                .map(|a| a.file_name.as_str())
                .collect();
            format!("{} photo(s): {}", names.len(), names.join(", "))
        };

        let mut contact_parts = Vec::new();
        if let Some(pref) = draft.contact_preference {
            contact_parts.push(format!("by {}", pref.as_str()));
        }
        if let Some(best_time) = &draft.best_time_to_contact {
            contact_parts.push(best_time.clone());
        }
        contact_parts.push(if draft.allow_entry_without_tenant {
            "entry allowed without tenant".to_string()
        } else {
            "tenant must be present".to_string()
        });

        let sections = vec![
            ReviewSection::from_validation(
                "Category",
                Some(StepId::Category),
                true,
                category_summary,
                validate_category(draft.category.as_deref()),
            ),
            ReviewSection::from_validation(
                "Description",
                Some(StepId::Description),
                true,
                draft.description.trim().to_string(),
                validate_description(&draft.description),
            ),
            ReviewSection::from_validation(
                "Urgency",
                Some(StepId::Urgency),
                true,
                urgency_summary,
                validate_urgency(draft.urgency),
            ),
            ReviewSection::from_validation(
                "Location",
                Some(StepId::Location),
                true,
                draft.location.trim().to_string(),
                validate_location(&draft.location),
            ),
            ReviewSection::from_validation(
                "Photos",
                Some(StepId::Media),
                false,
                photos_summary,
                validate_attachments(&draft.attachments),
            ),
            ReviewSection::from_validation(
                "Contact",
                None,
                false,
                contact_parts.join(", "),
                Ok(()),
            ),
        ];

        Self { sections }
    }

    /// True when every required section is complete and no optional section
    /// holds invalid data.
    pub fn can_submit(&self) -> bool {
        self.blocking_error().is_none()
    }

    /// The first reason submission is blocked, if any.
    pub fn blocking_error(&self) -> Option<ValidationError> {
        self.sections
            .iter()
            .find(|s| !s.complete)
            .and_then(|s| s.issue.clone())
    }

    /// Completeness flags in section order.
    pub fn completeness(&self) -> Vec<(&'static str, bool)> {
        self.sections.iter().map(|s| (s.title, s.complete)).collect()
    }

    pub fn section(&self, title: &str) -> Option<&ReviewSection> {
        self.sections.iter().find(|s| s.title == title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ContactPreference, DraftPatch, Urgency};

    fn complete_draft() -> RequestDraft {
        let mut draft = RequestDraft::default();
        draft.merge(DraftPatch {
            category: Some("plumbing".to_string()),
            description: Some("Kitchen faucet leaking for 2 days".to_string()),
            urgency: Some(Urgency::High),
            location: Some("Kitchen".to_string()),
            ..Default::default()
        });
        draft
    }

    #[test]
    fn test_empty_draft_cannot_submit() {
        let review = Review::of(&RequestDraft::default());
        assert!(!review.can_submit());
        assert_eq!(review.blocking_error().unwrap().field, "category");

        let flags = review.completeness();
        assert_eq!(flags[0], ("Category", false));
        assert_eq!(flags[4], ("Photos", true));
        assert_eq!(flags[5], ("Contact", true));
    }

    #[test]
    fn test_complete_draft_can_submit() {
        let review = Review::of(&complete_draft());
        assert!(review.can_submit());
        assert!(review.sections.iter().all(|s| s.complete));
        assert_eq!(review.section("Urgency").unwrap().summary, "high");
    }

    #[test]
    fn test_optional_sections_do_not_block() {
        let mut draft = complete_draft();
        draft.contact_preference = None;
        assert!(Review::of(&draft).can_submit());
    }

    #[test]
    fn test_contact_summary() {
        let mut draft = complete_draft();
        draft.merge(DraftPatch {
            contact_preference: Some(ContactPreference::Text),
            best_time_to_contact: Some("after 5pm".to_string()),
            allow_entry_without_tenant: Some(true),
            ..Default::default()
        });
        let review = Review::of(&draft);
        assert_eq!(
            review.section("Contact").unwrap().summary,
            "by text, after 5pm, entry allowed without tenant"
        );
    }

    #[test]
    fn test_edit_targets() {
        let review = Review::of(&complete_draft());
        assert_eq!(
            review.section("Location").unwrap().edit_step,
            Some(StepId::Location)
        );
        assert_eq!(review.section("Contact").unwrap().edit_step, None);
    }

    #[test]
    fn test_short_description_blocks_with_reason() {
        let mut draft = complete_draft();
        draft.merge(DraftPatch::description("Drips"));
        let review = Review::of(&draft);
        let section = review.section("Description").unwrap();
        assert!(!section.complete);
        assert!(section.issue.as_ref().unwrap().reason.contains("at least"));
        assert!(!review.can_submit());
    }
}
