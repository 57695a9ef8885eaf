//! Adaptation knowledge base: rule thresholds and cold-start layouts.
//!
//! Both are injected into the planner so a deployment (or a test) can swap
//! them without touching the planning code.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::section::Section;

/// Thresholds consulted by the planner. Missing fields in a loaded rules
/// file fall back to the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdaptationRules {
    /// Visits in the window at which a section is promoted.
    pub navigation_promote_threshold: u32,
    /// Ignore rate strictly above which density drops to `low`.
    pub ignore_rate_low_density: f64,
    /// Accept rate strictly above which density rises to `high`.
    pub accept_rate_high_density: f64,
    /// Risk escalations in the window that trigger the risk priority layout.
    pub risk_escalation_priority_threshold: u32,
    /// Sections forced to the front after a risk escalation, in order.
    pub risk_priority_sections: Vec<Section>,
    pub default_window_days: u32,
}

impl Default for AdaptationRules {
    fn default() -> Self {
        Self {
            navigation_promote_threshold: 5,
            ignore_rate_low_density: 0.5,
            accept_rate_high_density: 0.7,
            risk_escalation_priority_threshold: 1,
            risk_priority_sections: vec![Section::Vitals, Section::Labs],
            default_window_days: 30,
        }
    }
}

/// Source of per-user starting layouts, consulted only on cold start.
pub trait SpecialtyDefaults: Send + Sync {
    /// Sections to promote for a user with no recorded activity, if any.
    fn cold_start_sections(&self, user_id: &str) -> Option<Vec<Section>>;
}

/// Lookup that never supplies a starting layout.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSpecialtyDefaults;

impl SpecialtyDefaults for NoSpecialtyDefaults {
    fn cold_start_sections(&self, _user_id: &str) -> Option<Vec<Section>> {
        None
    }
}

/// Specialty → promoted sections, plus user → specialty assignments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpecialtyTable {
    pub specialties: HashMap<String, Vec<Section>>,
    pub assignments: HashMap<String, String>,
}

impl SpecialtyTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_specialty(mut self, specialty: impl Into<String>, sections: Vec<Section>) -> Self {
        self.specialties.insert(specialty.into(), sections);
        self
    }

    pub fn assign(mut self, user_id: impl Into<String>, specialty: impl Into<String>) -> Self {
        self.assignments.insert(user_id.into(), specialty.into());
        self
    }

    pub fn specialty_of(&self, user_id: &str) -> Option<&str> {
        self.assignments.get(user_id).map(String::as_str)
    }
}

impl SpecialtyDefaults for SpecialtyTable {
    fn cold_start_sections(&self, user_id: &str) -> Option<Vec<Section>> {
        let specialty = self.specialty_of(user_id)?;
        self.specialties
            .get(specialty)
            .filter(|sections| !sections.is_empty())
            .cloned()
    }
}
