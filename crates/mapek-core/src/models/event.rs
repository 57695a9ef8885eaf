use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::InvalidEventError;

use super::section::Section;

/// The closed set of trackable interaction kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum EventCategory {
    Navigation,
    SuggestionFeedback,
    RiskChange,
}

impl EventCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            EventCategory::Navigation => "navigation",
            EventCategory::SuggestionFeedback => "suggestion_feedback",
            EventCategory::RiskChange => "risk_change",
        }
    }
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventCategory {
    type Err = InvalidEventError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "navigation" => Ok(EventCategory::Navigation),
            "suggestion_feedback" => Ok(EventCategory::SuggestionFeedback),
            "risk_change" => Ok(EventCategory::RiskChange),
            other => Err(InvalidEventError::UnknownCategory(other.to_string())),
        }
    }
}

/// What the clinician did with an advisory suggestion card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum FeedbackAction {
    Accept,
    Ignore,
    NotRelevant,
}

/// Patient risk category, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum RiskLevel {
    Routine,
    Elevated,
    HighConcern,
    Critical,
}

/// Category-specific payload of an event. The `category` tag is stored
/// alongside the fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "category", rename_all = "snake_case")]
#[ts(export)]
pub enum EventDetail {
    Navigation {
        #[serde(default)]
        from_section: Option<Section>,
        to_section: Section,
    },
    SuggestionFeedback {
        suggestion_id: String,
        action: FeedbackAction,
    },
    RiskChange {
        previous_level: RiskLevel,
        new_level: RiskLevel,
    },
}

impl EventDetail {
    pub fn category(&self) -> EventCategory {
        match self {
            EventDetail::Navigation { .. } => EventCategory::Navigation,
            EventDetail::SuggestionFeedback { .. } => EventCategory::SuggestionFeedback,
            EventDetail::RiskChange { .. } => EventCategory::RiskChange,
        }
    }

    /// Parse an untagged JSON payload as the detail for `category`.
    ///
    /// Missing or mistyped fields are rejected. Extra fields are ignored.
    pub fn from_json(
        category: EventCategory,
        detail: serde_json::Value,
    ) -> Result<Self, InvalidEventError> {
        let serde_json::Value::Object(mut fields) = detail else {
            return Err(InvalidEventError::Detail {
                category,
                reason: "detail must be a JSON object".to_string(),
            });
        };
        fields.insert(
            "category".to_string(),
            serde_json::Value::String(category.as_str().to_string()),
        );

        serde_json::from_value(serde_json::Value::Object(fields)).map_err(|e| {
            InvalidEventError::Detail {
                category,
                reason: e.to_string(),
            }
        })
    }

    /// True for a risk change to a strictly more severe level.
    pub fn is_risk_escalation(&self) -> bool {
        matches!(
            self,
            EventDetail::RiskChange { previous_level, new_level } if new_level > previous_level
        )
    }
}

/// One recorded user interaction. Written once, never modified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct UserActionEvent {
    pub id: Uuid,
    pub user_id: String,
    pub patient_id: Option<String>,
    pub detail: EventDetail,
    pub occurred_at: jiff::Timestamp,
}

impl UserActionEvent {
    pub fn category(&self) -> EventCategory {
        self.detail.category()
    }
}
