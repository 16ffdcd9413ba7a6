//! Closed enumerations used by drafts and stored requests.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How quickly the tenant needs the issue addressed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    /// Cosmetic or can wait a week
    Low,

    /// Should be looked at within a few days
    Medium,

    /// Affects daily living
    High,

    /// Safety risk or active damage
    Urgent,
}

impl Urgency {
    /// All urgency levels, lowest first.
    pub const ALL: [Urgency; 4] = [
        Urgency::Low,
        Urgency::Medium,
        Urgency::High,
        Urgency::Urgent,
    ];

    /// Convert to the stored string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Urgency::Low => "low",
            Urgency::Medium => "medium",
            Urgency::High => "high",
            Urgency::Urgent => "urgent",
        }
    }
}

impl FromStr for Urgency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Urgency::Low),
            "medium" => Ok(Urgency::Medium),
            "high" => Ok(Urgency::High),
            "urgent" => Ok(Urgency::Urgent),
            _ => Err(format!("Invalid urgency: {s}")),
        }
    }
}

/// The channel the tenant prefers to be contacted on.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ContactPreference {
    Phone,
    Email,
    Text,
}

impl ContactPreference {
    /// Convert to the stored string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContactPreference::Phone => "phone",
            ContactPreference::Email => "email",
            ContactPreference::Text => "text",
        }
    }
}

impl FromStr for ContactPreference {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "phone" | "call" => Ok(ContactPreference::Phone),
            "email" => Ok(ContactPreference::Email),
            "text" | "sms" => Ok(ContactPreference::Text),
            _ => Err(format!("Invalid contact preference: {s}")),
        }
    }
}

/// Lifecycle status of a stored maintenance request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    /// Newly submitted, not yet picked up
    #[default]
    Submitted,

    /// A team is working on it
    InProgress,

    /// Work finished
    Completed,

    /// Withdrawn by the tenant or closed without work
    Cancelled,
}

impl RequestStatus {
    /// Convert to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Submitted => "submitted",
            RequestStatus::InProgress => "in_progress",
            RequestStatus::Completed => "completed",
            RequestStatus::Cancelled => "cancelled",
        }
    }

    /// Status with an icon for list display.
    ///
    /// ```rust
    /// use wrench_core::models::RequestStatus;
    ///
    /// assert_eq!(RequestStatus::Completed.with_icon(), "✓ Completed");
    /// assert_eq!(RequestStatus::Submitted.with_icon(), "○ Submitted");
    /// ```
    pub fn with_icon(&self) -> &'static str {
        match self {
            RequestStatus::Submitted => "○ Submitted",
            RequestStatus::InProgress => "➤ In Progress",
            RequestStatus::Completed => "✓ Completed",
            RequestStatus::Cancelled => "✗ Cancelled",
        }
    }
}

impl FromStr for RequestStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "submitted" => Ok(RequestStatus::Submitted),
            "in_progress" | "in-progress" | "inprogress" => Ok(RequestStatus::InProgress),
            "completed" | "done" => Ok(RequestStatus::Completed),
            "cancelled" | "canceled" => Ok(RequestStatus::Cancelled),
            _ => Err(format!("Invalid request status: {s}")),
        }
    }
}
