//! Advisory response estimates shown after submission.
//!
//! These are display strings only. Nothing in the crate measures or enforces
//! them, and they are not a service-level commitment.

use crate::models::Urgency;

/// Expected response window and the team a request is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdvisoryEstimate {
    pub response_window: &'static str,
    pub team: &'static str,
}

impl AdvisoryEstimate {
    pub fn for_request(urgency: Urgency, category: &str) -> Self {
        Self {
            response_window: response_window(urgency),
            team: assigned_team(category),
        }
    }
}

/// Expected response time for an urgency level.
pub fn response_window(urgency: Urgency) -> &'static str {
    match urgency {
        Urgency::Urgent => "Within 4 hours",
        Urgency::High => "Within 24 hours",
        Urgency::Medium => "Within 2-3 business days",
        Urgency::Low => "Within 5-7 business days",
    }
}

/// Team that usually handles a category.
pub fn assigned_team(category: &str) -> &'static str {
    match category.trim().to_lowercase().as_str() {
        "plumbing" => "Plumbing Team",
        "electrical" => "Electrical Team",
        "hvac" => "HVAC Team",
        "appliances" => "Appliance Repair",
        "structural" => "Building Maintenance",
        "pest_control" => "Pest Control",
        "locks_security" => "Security & Locks",
        _ => "General Maintenance",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_windows() {
        assert_eq!(response_window(Urgency::Urgent), "Within 4 hours");
        assert_eq!(response_window(Urgency::High), "Within 24 hours");
        assert_eq!(response_window(Urgency::Medium), "Within 2-3 business days");
        assert_eq!(response_window(Urgency::Low), "Within 5-7 business days");
    }

    #[test]
    fn test_team_falls_back_to_general() {
        assert_eq!(assigned_team("Plumbing"), "Plumbing Team");
        assert_eq!(assigned_team("other"), "General Maintenance");
        assert_eq!(assigned_team("roof garden"), "General Maintenance");
    }
}
