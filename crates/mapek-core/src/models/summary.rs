use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::section::Section;

/// Interaction counts for one user (optionally one patient) over a window.
///
/// Computed on demand and never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct UsageSummary {
    pub window_days: u32,
    pub section_visit_counts: BTreeMap<Section, u32>,
    pub suggestion_accept_count: u32,
    pub suggestion_ignore_count: u32,
    pub suggestion_not_relevant_count: u32,
    pub risk_escalation_count: u32,
}

impl UsageSummary {
    pub fn empty(window_days: u32) -> Self {
        Self {
            window_days,
            ..Self::default()
        }
    }

    pub fn visits(&self, section: Section) -> u32 {
        self.section_visit_counts
            .get(&section)
            .copied()
            .unwrap_or(0)
    }

    /// Widened so the sum of three `u32` counts cannot overflow.
    pub fn total_feedback(&self) -> u64 {
        u64::from(self.suggestion_accept_count)
            + u64::from(self.suggestion_ignore_count)
            + u64::from(self.suggestion_not_relevant_count)
    }

    /// No counted activity at all in the window.
    pub fn is_cold_start(&self) -> bool {
        self.section_visit_counts.values().all(|&n| n == 0)
            && self.total_feedback() == 0
            && self.risk_escalation_count == 0
    }
}
