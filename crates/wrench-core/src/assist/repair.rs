//! Triage of a repair assistant's analysis.
//!
//! The assistant answers with a JSON object describing the problem:
//!
//! ```json
//! {
//!   "parts_needed": false,
//!   "complexity_level": "low",
//!   "further_inquiry": true,
//!   "further_questions": "Is the water coming from the handle or the spout?",
//!   "instructions": "",
//!   "description_of_issue": "Dripping kitchen faucet"
//! }
//! ```
//!
//! [`RepairAnalysis`] is the validated form of that object and
//! [`RepairAnalysis::next_action`] picks what the tenant sees next:
//!
//! | parts needed | complexity    | further inquiry | next action                     |
//! |--------------|---------------|-----------------|---------------------------------|
//! | yes          | any           | any             | [`NextAction::ContractorDispatch`] |
//! | any          | high          | any             | [`NextAction::ContractorDispatch`] |
//! | no           | low or medium | yes             | [`NextAction::FollowUpQuestions`]  |
//! | no           | low or medium | no              | [`NextAction::RepairInstructions`] |
//!
//! Assistants do not always answer in JSON. [`interpret`] passes plain text
//! through unchanged and reports JSON that fails validation instead of
//! guessing at it.

use std::{fmt, str::FromStr};

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::error::{Result, WrenchError};

/// Offer shown when the repair needs a professional.
pub const DISPATCH_OFFER: &str =
    "It seems your issue is rather complex, would you like for me to dispatch a contractor to your address?";

const MISSING_QUESTIONS: &str =
    "I need more information to help you, but no specific questions were provided.";
const MISSING_INSTRUCTIONS: &str =
    "I should provide repair instructions, but none were generated.";

/// How involved a repair looks. Parsed case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Complexity {
    Low,
    Medium,
    High,
}

impl Complexity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Complexity::Low => "low",
            Complexity::Medium => "medium",
            Complexity::High => "high",
        }
    }
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Complexity {
    type Err = WrenchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Complexity::Low),
            "medium" => Ok(Complexity::Medium),
            "high" => Ok(Complexity::High),
            other => Err(WrenchError::invalid_input("complexity_level")
                .with_reason(format!("'{other}' is not one of low, medium, high"))),
        }
    }
}

impl TryFrom<String> for Complexity {
    type Error = WrenchError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

/// A validated repair analysis.
///
/// `parts_needed`, `complexity_level` and `further_inquiry` are required and
/// must have the right JSON type. The text fields default to empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepairAnalysis {
    /// Whether the repair needs replacement parts
    pub parts_needed: bool,

    #[serde(rename = "complexity_level")]
    pub complexity: Complexity,

    /// Whether the assistant needs more detail before it can help
    pub further_inquiry: bool,

    /// Questions to ask the tenant when `further_inquiry` is set
    #[serde(default)]
    pub further_questions: String,

    /// Do-it-yourself steps for a simple repair
    #[serde(default)]
    pub instructions: String,

    /// The assistant's summary of the problem
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_of_issue: Option<String>,
}

impl RepairAnalysis {
    /// Parses and validates an analysis from JSON text.
    ///
    /// # Errors
    ///
    /// [`WrenchError::Serialization`] when the text is not a JSON object, a
    /// required field is missing, a field has the wrong type or the
    /// complexity is not low, medium or high.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Validates an already parsed JSON value.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// Decides what to offer the tenant.
    pub fn next_action(&self) -> NextAction {
        debug!(
            "Repair analysis: parts needed {}, complexity {}, further inquiry {}",
            self.parts_needed, self.complexity, self.further_inquiry
        );
        if self.parts_needed || self.complexity == Complexity::High {
            info!("Suggesting contractor dispatch");
            return NextAction::ContractorDispatch;
        }
        if self.further_inquiry {
            if self.further_questions.trim().is_empty() {
                warn!("Further inquiry requested but no questions were provided");
            }
            NextAction::FollowUpQuestions(self.further_questions.trim().to_string())
        } else {
            if self.instructions.trim().is_empty() {
                warn!("Repair instructions expected but none were provided");
            }
            NextAction::RepairInstructions(self.instructions.trim().to_string())
        }
    }
}

/// What the tenant is offered after an analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextAction {
    /// The repair needs parts or a professional
    ContractorDispatch,
    /// More detail is needed; holds the questions to ask
    FollowUpQuestions(String),
    /// The tenant can fix it; holds the steps
    RepairInstructions(String),
}

impl NextAction {
    /// Text shown to the tenant. Falls back to a fixed notice when the
    /// assistant left the questions or instructions empty.
    pub fn message(&self) -> &str {
        match self {
            NextAction::ContractorDispatch => DISPATCH_OFFER,
            NextAction::FollowUpQuestions(questions) if questions.is_empty() => MISSING_QUESTIONS,
            NextAction::FollowUpQuestions(questions) => questions,
            NextAction::RepairInstructions(steps) if steps.is_empty() => MISSING_INSTRUCTIONS,
            NextAction::RepairInstructions(steps) => steps,
        }
    }
}

impl fmt::Display for NextAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// How an assistant's reply was understood.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepairReply {
    /// A valid analysis and the action it leads to
    Action {
        analysis: RepairAnalysis,
        action: NextAction,
    },
    /// The reply was not JSON and is shown as written
    Raw(String),
    /// JSON that is not a valid analysis
    Invalid { reason: String },
}

impl fmt::Display for RepairReply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepairReply::Action { action, .. } => writeln!(f, "{action}"),
            RepairReply::Raw(text) => writeln!(f, "{text}"),
            RepairReply::Invalid { reason } => {
                writeln!(f, "Error processing repair analysis: {reason}")
            }
        }
    }
}

/// Reads an assistant reply.
///
/// ```rust
/// use wrench_core::assist::{interpret, NextAction, RepairReply};
///
/// let reply = interpret(r#"{"parts_needed": true, "complexity_level": "Low", "further_inquiry": false}"#);
/// assert!(matches!(reply, RepairReply::Action { action: NextAction::ContractorDispatch, .. }));
///
/// let plain = interpret("Turn off the water valve under the sink first.");
/// assert_eq!(plain, RepairReply::Raw("Turn off the water valve under the sink first.".to_string()));
/// ```
pub fn interpret(reply: &str) -> RepairReply {
    let value: serde_json::Value = match serde_json::from_str(reply) {
        Ok(value) => value,
        Err(e) => {
            debug!("Reply is not JSON ({e}), passing it through");
            return RepairReply::Raw(reply.to_string());
        }
    };

    match RepairAnalysis::from_value(value) {
        Ok(analysis) => {
            let action = analysis.next_action();
            RepairReply::Action { analysis, action }
        }
        Err(e) => {
            warn!("Rejected repair analysis: {e}");
            RepairReply::Invalid {
                reason: e.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn analysis(parts_needed: bool, complexity: &str, further_inquiry: bool) -> RepairAnalysis {
        RepairAnalysis::from_value(json!({
            "parts_needed": parts_needed,
            "complexity_level": complexity,
            "further_inquiry": further_inquiry,
            "further_questions": "Is the drip from the handle or the spout?",
            "instructions": "Tighten the packing nut under the handle.",
        }))
        .unwrap()
    }

    #[test]
    fn test_parts_needed_dispatches_contractor() {
        for complexity in ["low", "medium", "high"] {
            assert_eq!(
                analysis(true, complexity, true).next_action(),
                NextAction::ContractorDispatch
            );
        }
    }

    #[test]
    fn test_high_complexity_dispatches_contractor() {
        let action = analysis(false, "HIGH", true).next_action();
        assert_eq!(action, NextAction::ContractorDispatch);
        assert_eq!(action.message(), DISPATCH_OFFER);
    }

    #[test]
    fn test_further_inquiry_asks_questions() {
        for complexity in ["low", "medium"] {
            assert_eq!(
                analysis(false, complexity, true).next_action(),
                NextAction::FollowUpQuestions(
                    "Is the drip from the handle or the spout?".to_string()
                )
            );
        }
    }

    #[test]
    fn test_simple_repair_gives_instructions() {
        let action = analysis(false, "Medium", false).next_action();
        assert_eq!(
            action,
            NextAction::RepairInstructions("Tighten the packing nut under the handle.".to_string())
        );
        assert_eq!(action.to_string(), "Tighten the packing nut under the handle.");
    }

    #[test]
    fn test_empty_text_falls_back_to_notice() {
        let mut bare = analysis(false, "low", true);
        bare.further_questions.clear();
        assert_eq!(bare.next_action().message(), MISSING_QUESTIONS);

        bare.further_inquiry = false;
        bare.instructions = "   ".to_string();
        assert_eq!(bare.next_action().message(), MISSING_INSTRUCTIONS);
    }

    #[test]
    fn test_missing_required_field_is_rejected() {
        for field in ["parts_needed", "complexity_level", "further_inquiry"] {
            let mut value = json!({
                "parts_needed": false,
                "complexity_level": "low",
                "further_inquiry": false,
            });
            value.as_object_mut().unwrap().remove(field);

            let err = RepairAnalysis::from_value(value).unwrap_err();
            assert!(matches!(err, WrenchError::Serialization { .. }));
            assert!(err.to_string().contains(field), "{err}");
        }
    }

    #[test]
    fn test_wrong_types_are_rejected() {
        let wrong_bool = RepairAnalysis::from_json(
            r#"{"parts_needed": "yes", "complexity_level": "low", "further_inquiry": false}"#,
        );
        assert!(wrong_bool.is_err());

        let wrong_level = RepairAnalysis::from_json(
            r#"{"parts_needed": false, "complexity_level": "extreme", "further_inquiry": false}"#,
        )
        .unwrap_err();
        assert!(wrong_level.to_string().contains("extreme"));

        let numeric_level = RepairAnalysis::from_json(
            r#"{"parts_needed": false, "complexity_level": 3, "further_inquiry": false}"#,
        );
        assert!(numeric_level.is_err());
    }

    #[test]
    fn test_interpret_passes_plain_text_through() {
        let reply = interpret("Please send a photo of the leak.");
        assert_eq!(
            reply.to_string(),
            "Please send a photo of the leak.\n"
        );
    }

    #[test]
    fn test_interpret_reports_invalid_json() {
        let reply = interpret(r#"{"parts_needed": false}"#);
        match &reply {
            RepairReply::Invalid { reason } => assert!(reason.contains("complexity_level")),
            other => panic!("unexpected reply: {other:?}"),
        }
        assert!(reply
            .to_string()
            .starts_with("Error processing repair analysis:"));

        assert!(matches!(interpret("42"), RepairReply::Invalid { .. }));
    }

    #[test]
    fn test_interpret_keeps_analysis() {
        let reply = interpret(
            r#"{"parts_needed": false, "complexity_level": "low", "further_inquiry": false,
                "instructions": "Reset the breaker.", "description_of_issue": "Tripped breaker"}"#,
        );
        match reply {
            RepairReply::Action { analysis, action } => {
                assert_eq!(
                    analysis.description_of_issue.as_deref(),
                    Some("Tripped breaker")
                );
                assert_eq!(action, NextAction::RepairInstructions("Reset the breaker.".to_string()));
            }
            other => panic!("unexpected reply: {other:?}"),
        }
    }
}
