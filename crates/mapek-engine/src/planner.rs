//! Layout planning: a pure function from a usage summary and the rules
//! knowledge base to a section order, a suggestion density and an
//! explanation.

use uuid::Uuid;

use mapek_core::knowledge::{AdaptationRules, SpecialtyDefaults};
use mapek_core::models::plan::{AdaptationPlan, SuggestionDensity};
use mapek_core::models::section::{is_complete_order, Section, DEFAULT_ORDER};
use mapek_core::models::summary::UsageSummary;

/// A rule that changed the layout away from the defaults.
#[derive(Debug, Clone, PartialEq)]
pub enum Adjustment {
    /// Risk priority sections moved to the front after escalations.
    RiskPriority {
        sections: Vec<Section>,
        escalations: u32,
    },
    /// Sections promoted by visit count, in placement order.
    FrequentVisits { sections: Vec<(Section, u32)> },
    /// Cold-start layout supplied by the specialty lookup.
    SpecialtyStart { sections: Vec<Section> },
    /// Density moved off `medium`; `rate` is the rate that crossed its threshold.
    Density {
        density: SuggestionDensity,
        rate: f64,
        total_feedback: u64,
    },
}

/// Everything the planner decided, before it is stamped into a plan.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutDecision {
    pub section_order: Vec<Section>,
    pub suggestion_density: SuggestionDensity,
    pub adjustments: Vec<Adjustment>,
    pub explanation: String,
}

/// Decide the layout for `summary`.
///
/// `cold_start` is only consulted when the summary has no activity at all.
pub fn decide(
    summary: &UsageSummary,
    rules: &AdaptationRules,
    cold_start: Option<&[Section]>,
) -> LayoutDecision {
    let mut adjustments = Vec::new();

    let section_order = order_sections(summary, rules, cold_start, &mut adjustments);
    let suggestion_density = choose_density(summary, rules, &mut adjustments);
    let explanation = explain(&adjustments, summary.window_days);

    LayoutDecision {
        section_order,
        suggestion_density,
        adjustments,
        explanation,
    }
}

/// Build a new plan for (user, patient) from `summary`.
pub fn plan(
    user_id: &str,
    patient_id: Option<&str>,
    summary: &UsageSummary,
    rules: &AdaptationRules,
    specialties: &dyn SpecialtyDefaults,
    generated_at: jiff::Timestamp,
) -> AdaptationPlan {
    let cold_start = if summary.is_cold_start() {
        specialties.cold_start_sections(user_id)
    } else {
        None
    };
    let decision = decide(summary, rules, cold_start.as_deref());

    AdaptationPlan {
        id: Uuid::new_v4(),
        user_id: user_id.to_string(),
        patient_id: patient_id.map(str::to_string),
        generated_at,
        section_order: decision.section_order,
        suggestion_density: decision.suggestion_density,
        explanation: decision.explanation,
    }
}

fn order_sections(
    summary: &UsageSummary,
    rules: &AdaptationRules,
    cold_start: Option<&[Section]>,
    adjustments: &mut Vec<Adjustment>,
) -> Vec<Section> {
    let mut order: Vec<Section> = Vec::with_capacity(DEFAULT_ORDER.len());

    // Zero thresholds are treated as 1 so a rule never fires without evidence.
    if summary.risk_escalation_count >= rules.risk_escalation_priority_threshold.max(1) {
        let placed = push_unique(&mut order, rules.risk_priority_sections.iter().copied());
        if !placed.is_empty() {
            adjustments.push(Adjustment::RiskPriority {
                sections: placed,
                escalations: summary.risk_escalation_count,
            });
        }
    }

    let threshold = rules.navigation_promote_threshold.max(1);
    let mut frequent: Vec<(Section, u32)> = DEFAULT_ORDER
        .iter()
        .map(|&section| (section, summary.visits(section)))
        .filter(|&(_, visits)| visits >= threshold)
        .collect();
    // Stable: equal counts keep default order.
    frequent.sort_by(|a, b| b.1.cmp(&a.1));

    let promoted: Vec<(Section, u32)> = frequent
        .into_iter()
        .filter(|(section, _)| !order.contains(section))
        .collect();
    if !promoted.is_empty() {
        order.extend(promoted.iter().map(|&(section, _)| section));
        adjustments.push(Adjustment::FrequentVisits { sections: promoted });
    }

    if summary.is_cold_start()
        && let Some(sections) = cold_start
    {
        let placed = push_unique(&mut order, sections.iter().copied());
        if !placed.is_empty() {
            adjustments.push(Adjustment::SpecialtyStart { sections: placed });
        }
    }

    push_unique(&mut order, DEFAULT_ORDER);

    debug_assert!(is_complete_order(&order), "section order lost or duplicated a section");
    order
}

/// Append each section not already in `order`; returns the ones appended.
fn push_unique(order: &mut Vec<Section>, sections: impl IntoIterator<Item = Section>) -> Vec<Section> {
    let mut placed = Vec::new();
    for section in sections {
        if !order.contains(&section) {
            order.push(section);
            placed.push(section);
        }
    }
    placed
}

fn choose_density(
    summary: &UsageSummary,
    rules: &AdaptationRules,
    adjustments: &mut Vec<Adjustment>,
) -> SuggestionDensity {
    let total_feedback = summary.total_feedback();
    if total_feedback == 0 {
        return SuggestionDensity::Medium;
    }

    let total = total_feedback as f64;
    let ignore_rate = f64::from(summary.suggestion_ignore_count) / total;
    let accept_rate = f64::from(summary.suggestion_accept_count) / total;

    let (density, rate) = if ignore_rate > rules.ignore_rate_low_density {
        (SuggestionDensity::Low, ignore_rate)
    } else if accept_rate > rules.accept_rate_high_density {
        (SuggestionDensity::High, accept_rate)
    } else {
        return SuggestionDensity::Medium;
    };

    adjustments.push(Adjustment::Density {
        density,
        rate,
        total_feedback,
    });
    density
}

fn explain(adjustments: &[Adjustment], window_days: u32) -> String {
    if adjustments.is_empty() {
        return format!(
            "No adaptation rules fired in the last {}; the default layout was kept unchanged.",
            plural(u64::from(window_days), "day")
        );
    }

    let sentences: Vec<String> = adjustments
        .iter()
        .map(|adjustment| match adjustment {
            Adjustment::RiskPriority {
                sections,
                escalations,
            } => format!(
                "Moved {} to the top after {} in the last {}.",
                join_sections(sections),
                plural(u64::from(*escalations), "risk escalation"),
                plural(u64::from(window_days), "day")
            ),
            Adjustment::FrequentVisits { sections } => {
                let listed: Vec<String> = sections
                    .iter()
                    .map(|(section, visits)| {
                        format!("{section} ({})", plural(u64::from(*visits), "visit"))
                    })
                    .collect();
                format!("Promoted frequently visited sections: {}.", join_words(&listed))
            }
            Adjustment::SpecialtyStart { sections } => format!(
                "No recent activity; started from the specialty layout with {} first.",
                join_sections(sections)
            ),
            Adjustment::Density {
                density,
                rate,
                total_feedback,
            } => {
                let (verb, outcome) = match density {
                    SuggestionDensity::Low => ("fewer", "ignored"),
                    _ => ("more", "accepted"),
                };
                format!(
                    "Showing {verb} suggestions: {:.0}% of recent suggestions were {outcome} ({}).",
                    rate * 100.0,
                    plural(*total_feedback, "response")
                )
            }
        })
        .collect();

    sentences.join(" ")
}

fn plural(n: u64, noun: &str) -> String {
    if n == 1 {
        format!("{n} {noun}")
    } else {
        format!("{n} {noun}s")
    }
}

fn join_sections(sections: &[Section]) -> String {
    let words: Vec<String> = sections.iter().map(Section::to_string).collect();
    join_words(&words)
}

fn join_words(words: &[String]) -> String {
    match words {
        [] => String::new(),
        [only] => only.clone(),
        [init @ .., last] => format!("{} and {last}", init.join(", ")),
    }
}
