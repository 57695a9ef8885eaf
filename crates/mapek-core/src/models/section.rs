use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A named region of the patient-detail page.
///
/// Variants are declared in default display order, so the derived `Ord`
/// doubles as "position in the default layout".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Section {
    Summary,
    Demographics,
    Diagnoses,
    Medications,
    Allergies,
    Vitals,
    Labs,
    Imaging,
    Suggestions,
    Safety,
}

/// The compiled-in layout used whenever no plan applies.
pub const DEFAULT_ORDER: [Section; 10] = [
    Section::Summary,
    Section::Demographics,
    Section::Diagnoses,
    Section::Medications,
    Section::Allergies,
    Section::Vitals,
    Section::Labs,
    Section::Imaging,
    Section::Suggestions,
    Section::Safety,
];

impl Section {
    pub fn as_str(self) -> &'static str {
        match self {
            Section::Summary => "summary",
            Section::Demographics => "demographics",
            Section::Diagnoses => "diagnoses",
            Section::Medications => "medications",
            Section::Allergies => "allergies",
            Section::Vitals => "vitals",
            Section::Labs => "labs",
            Section::Imaging => "imaging",
            Section::Suggestions => "suggestions",
            Section::Safety => "safety",
        }
    }

    /// Index of this section in [`DEFAULT_ORDER`].
    pub fn default_position(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// True when `order` contains every section of [`DEFAULT_ORDER`] exactly once.
pub fn is_complete_order(order: &[Section]) -> bool {
    if order.len() != DEFAULT_ORDER.len() {
        return false;
    }
    let mut seen = [false; DEFAULT_ORDER.len()];
    for section in order {
        let slot = &mut seen[section.default_position()];
        if *slot {
            return false;
        }
        *slot = true;
    }
    true
}
