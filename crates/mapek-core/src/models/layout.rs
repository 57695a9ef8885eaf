use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::plan::{AdaptationPlan, SuggestionDensity};
use super::section::{Section, DEFAULT_ORDER};

/// Where the layout a renderer receives came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum LayoutSource {
    /// The latest stored plan.
    Plan,
    /// No plan exists, or the user reset the layout.
    Default,
    /// Reading the plan failed; defaults were substituted.
    Fallback,
}

/// The section order and density a renderer should draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct EffectiveLayout {
    pub section_order: Vec<Section>,
    pub suggestion_density: SuggestionDensity,
    pub explanation: String,
    pub plan_id: Option<Uuid>,
    pub source: LayoutSource,
}

impl EffectiveLayout {
    pub fn from_plan(plan: AdaptationPlan) -> Self {
        Self {
            section_order: plan.section_order,
            suggestion_density: plan.suggestion_density,
            explanation: plan.explanation,
            plan_id: Some(plan.id),
            source: LayoutSource::Plan,
        }
    }

    pub fn defaults(source: LayoutSource) -> Self {
        let explanation = match source {
            LayoutSource::Fallback => "Adaptive layout is unavailable; showing the default layout.",
            _ => "Showing the default layout.",
        };
        Self {
            section_order: DEFAULT_ORDER.to_vec(),
            suggestion_density: SuggestionDensity::default(),
            explanation: explanation.to_string(),
            plan_id: None,
            source,
        }
    }
}
