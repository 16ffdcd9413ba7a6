//! Category suggestions for free-text descriptions, and triage of repair
//! analyses.
//!
//! [`Classifier`] is the seam a real model would sit behind.
//! [`KeywordClassifier`] is the built-in implementation: a keyword table
//! that scores each category by the number of matching terms.
//!
//! The [`repair`] module reads the structured analysis a repair assistant
//! returns and decides what the tenant sees next.

use std::future::Future;

use crate::error::Result;

pub mod repair;

pub use repair::{interpret, Complexity, NextAction, RepairAnalysis, RepairReply};

/// Confidence a classification needs before it is applied to a draft.
pub const MIN_CONFIDENCE: f32 = 0.6;

/// A suggested category for a description.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub category: String,

    /// Between 0.0 and 1.0
    pub confidence: f32,

    /// Terms in the description that produced the match
    pub matched: Vec<String>,
}

impl Classification {
    /// Whether the suggestion is strong enough to fill an empty category.
    pub fn is_confident(&self) -> bool {
        self.confidence >= MIN_CONFIDENCE
    }
}

/// Suggests a category for a description.
pub trait Classifier: Send + Sync {
    fn classify(
        &self,
        description: &str,
    ) -> impl Future<Output = Result<Option<Classification>>> + Send;
}

const KEYWORDS: &[(&str, &[&str])] = &[
    (
        "plumbing",
        &[
            "leak", "leaking", "drip", "faucet", "tap", "toilet", "pipe", "drain", "clog",
            "clogged", "sink", "shower", "water heater", "flood",
        ],
    ),
    (
        "electrical",
        &[
            "outlet", "socket", "switch", "breaker", "wiring", "spark", "light", "power",
            "fuse", "flicker",
        ],
    ),
    (
        "hvac",
        &[
            "heating", "heater", "furnace", "air conditioning", "ac", "thermostat", "vent",
            "radiator", "cold air", "no heat",
        ],
    ),
    (
        "appliances",
        &[
            "fridge", "refrigerator", "oven", "stove", "dishwasher", "washer", "dryer",
            "microwave", "freezer",
        ],
    ),
    (
        "structural",
        &[
            "crack", "ceiling", "wall", "floor", "roof", "window", "stairs", "mold", "damp",
        ],
    ),
    (
        "pest_control",
        &[
            "mouse", "mice", "rat", "roach", "cockroach", "ant", "ants", "bug", "bed bug",
            "wasp", "termite",
        ],
    ),
    (
        "locks_security",
        &[
            "lock", "key", "door won't", "deadbolt", "intercom", "buzzer", "alarm", "locked out",
        ],
    ),
];

/// Keyword-table classifier.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordClassifier;

impl KeywordClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Synchronous form of [`Classifier::classify`].
    pub fn classify_text(&self, description: &str) -> Option<Classification> {
        let text = description.to_lowercase();
        let words: Vec<&str> = text
            .split(|c: char| !c.is_alphanumeric() && c != '\'')
            .filter(|w| !w.is_empty())
            .collect();

        let contains = |term: &str| {
            if term.contains(' ') {
                text.contains(term)
            } else {
                words.contains(&term)
            }
        };

        let mut best: Option<(&str, Vec<String>)> = None;
        for (category, terms) in KEYWORDS {
            let matched: Vec<String> = terms
                .iter()
                .copied()
                .filter(|term| contains(*term))
                .map(str::to_string)
                .collect();
            let better = best
                .as_ref()
                .map_or(!matched.is_empty(), |(_, m)| matched.len() > m.len());
            if better {
                best = Some((*category, matched));
            }
        }

        best.map(|(category, matched)| Classification {
            category: category.to_string(),
            confidence: confidence_for(matched.len()),
            matched,
        })
    }
}

fn confidence_for(matches: usize) -> f32 {
    match matches {
        0 => 0.0,
        1 => 0.6,
        2 => 0.8,
        _ => 0.95,
    }
}

impl Classifier for KeywordClassifier {
    async fn classify(&self, description: &str) -> Result<Option<Classification>> {
        Ok(self.classify_text(description))
    }
}

/// Canned description prompts for a category.
pub fn suggestions_for(category: &str) -> &'static [&'static str] {
    match category.trim().to_lowercase().as_str() {
        "plumbing" => &[
            "Kitchen faucet is leaking constantly",
            "Toilet keeps running after flushing",
            "Bathroom sink drains very slowly",
        ],
        "electrical" => &[
            "Outlet in the living room stopped working",
            "Lights flicker when appliances turn on",
            "Breaker keeps tripping",
        ],
        "hvac" => &[
            "Heating is not turning on",
            "Air conditioning blows warm air",
            "Thermostat does not respond",
        ],
        "appliances" => &[
            "Refrigerator is not cooling",
            "Dishwasher does not drain",
            "Oven does not heat up",
        ],
        "structural" => &[
            "Crack in the bedroom wall is growing",
            "Window does not close properly",
            "Water stain on the ceiling",
        ],
        "pest_control" => &[
            "Seeing mice in the kitchen",
            "Ants coming in near the back door",
            "Cockroaches in the bathroom",
        ],
        "locks_security" => &[
            "Front door lock is sticking",
            "Intercom buzzer does not open the door",
            "Lost key needs replacing",
        ],
        _ => &[
            "Describe what is wrong and when it started",
            "Mention anything you have already tried",
        ],
    }
}
