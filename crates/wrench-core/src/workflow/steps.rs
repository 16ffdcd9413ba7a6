//! Static step definitions for the request workflow.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::review::Review;
use crate::{
    models::RequestDraft,
    validation::{
        validate_attachments, validate_category, validate_description, validate_location,
        validate_urgency, Validation,
    },
};

/// Identifier of one workflow step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepId {
    Welcome,
    Category,
    Description,
    Urgency,
    Location,
    Media,
    Review,
    Submission,
}

impl StepId {
    pub fn as_str(&self) -> &'static str {
        match self {
            StepId::Welcome => "welcome",
            StepId::Category => "category",
            StepId::Description => "description",
            StepId::Urgency => "urgency",
            StepId::Location => "location",
            StepId::Media => "media",
            StepId::Review => "review",
            StepId::Submission => "submission",
        }
    }

    /// Position of the step in [`STEPS`].
    pub fn index(&self) -> usize {
        STEPS
            .iter()
            .position(|s| s.id == *self)
            .unwrap_or(STEPS.len() - 1)
    }

    /// Descriptor for this step.
    pub fn descriptor(&self) -> &'static StepDescriptor {
        &STEPS[self.index()]
    }
}

impl FromStr for StepId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        STEPS
            .iter()
            .map(|step| step.id)
            .find(|id| id.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Invalid step: {s}"))
    }
}

/// Static metadata for one step.
#[derive(Debug)]
pub struct StepDescriptor {
    pub id: StepId,

    /// Heading shown for the step
    pub title: &'static str,

    /// Whether `back()` is allowed from this step
    pub reversible: bool,

    /// Whether the review step may jump here to edit a section
    pub editable: bool,

    check: fn(&RequestDraft) -> Validation,
}

impl StepDescriptor {
    /// Whether the tenant may leave this step going forward, with the
    /// blocking reason when not.
    pub fn can_proceed(&self, draft: &RequestDraft) -> Validation {
        (self.check)(draft)
    }
}

fn always(_: &RequestDraft) -> Validation {
    Ok(())
}

fn category_chosen(draft: &RequestDraft) -> Validation {
    validate_category(draft.category.as_deref())
}

fn description_long_enough(draft: &RequestDraft) -> Validation {
    validate_description(&draft.description)
}

fn urgency_chosen(draft: &RequestDraft) -> Validation {
    validate_urgency(draft.urgency)
}

fn location_given(draft: &RequestDraft) -> Validation {
    validate_location(&draft.location)
}

fn photos_acceptable(draft: &RequestDraft) -> Validation {
    validate_attachments(&draft.attachments)
}

fn review_complete(draft: &RequestDraft) -> Validation {
    Review::of(draft).blocking_error().map_or(Ok(()), Err)
}

/// The workflow, in order.
pub static STEPS: [StepDescriptor; 8] = [
    StepDescriptor {
        id: StepId::Welcome,
        title: "Report a maintenance issue",
        reversible: false,
        editable: false,
        check: always,
    },
    StepDescriptor {
        id: StepId::Category,
        title: "What kind of issue is it?",
        reversible: true,
        editable: true,
        check: category_chosen,
    },
    StepDescriptor {
        id: StepId::Description,
        title: "Describe the problem",
        reversible: true,
        editable: true,
        check: description_long_enough,
    },
    StepDescriptor {
        id: StepId::Urgency,
        title: "How urgent is it?",
        reversible: true,
        editable: true,
        check: urgency_chosen,
    },
    StepDescriptor {
        id: StepId::Location,
        title: "Where is the issue?",
        reversible: true,
        editable: true,
        check: location_given,
    },
    StepDescriptor {
        id: StepId::Media,
        title: "Add photos (optional)",
        reversible: true,
        editable: true,
        check: photos_acceptable,
    },
    StepDescriptor {
        id: StepId::Review,
        title: "Review your request",
        reversible: true,
        editable: false,
        check: review_complete,
    },
    StepDescriptor {
        id: StepId::Submission,
        title: "Submitting",
        reversible: false,
        editable: false,
        check: always,
    },
];
