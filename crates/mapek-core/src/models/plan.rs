use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::section::{is_complete_order, Section, DEFAULT_ORDER};

/// How many advisory suggestion cards the UI shows at once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum SuggestionDensity {
    Low,
    #[default]
    Medium,
    High,
}

impl SuggestionDensity {
    pub fn as_str(self) -> &'static str {
        match self {
            SuggestionDensity::Low => "low",
            SuggestionDensity::Medium => "medium",
            SuggestionDensity::High => "high",
        }
    }
}

/// A generated layout plan. Plans are append-only; a newer plan for the same
/// scope supersedes older ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AdaptationPlan {
    pub id: Uuid,
    pub user_id: String,
    pub patient_id: Option<String>,
    pub generated_at: jiff::Timestamp,
    /// Always a permutation of [`DEFAULT_ORDER`].
    pub section_order: Vec<Section>,
    pub suggestion_density: SuggestionDensity,
    pub explanation: String,
}

impl AdaptationPlan {
    pub fn has_complete_order(&self) -> bool {
        is_complete_order(&self.section_order)
    }

    /// True when rendering this plan looks any different from the defaults.
    pub fn differs_from_default(&self) -> bool {
        self.section_order != DEFAULT_ORDER
            || self.suggestion_density != SuggestionDensity::default()
    }
}
