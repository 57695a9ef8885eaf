use mapek_core::knowledge::{AdaptationRules, NoSpecialtyDefaults, SpecialtyTable};
use mapek_core::models::plan::SuggestionDensity;
use mapek_core::models::section::{is_complete_order, Section, DEFAULT_ORDER};
use mapek_core::models::summary::UsageSummary;
use mapek_engine::planner::{decide, plan, Adjustment};
use proptest::prelude::*;

fn summary_with_visits(visits: &[(Section, u32)]) -> UsageSummary {
    let mut summary = UsageSummary::empty(30);
    for &(section, n) in visits {
        summary.section_visit_counts.insert(section, n);
    }
    summary
}

fn feedback(accept: u32, ignore: u32, not_relevant: u32) -> UsageSummary {
    UsageSummary {
        suggestion_accept_count: accept,
        suggestion_ignore_count: ignore,
        suggestion_not_relevant_count: not_relevant,
        ..UsageSummary::empty(30)
    }
}

#[test]
fn cold_start_keeps_defaults() {
    let decision = decide(&UsageSummary::empty(30), &AdaptationRules::default(), None);
    assert_eq!(decision.section_order, DEFAULT_ORDER);
    assert_eq!(decision.suggestion_density, SuggestionDensity::Medium);
    assert!(decision.adjustments.is_empty());
    assert!(decision.explanation.contains("default layout was kept"));
}

#[test]
fn promotion_threshold_is_inclusive() {
    let rules = AdaptationRules::default();

    let below = decide(&summary_with_visits(&[(Section::Imaging, 4)]), &rules, None);
    assert_eq!(below.section_order, DEFAULT_ORDER);

    let at = decide(&summary_with_visits(&[(Section::Imaging, 5)]), &rules, None);
    assert_eq!(at.section_order[0], Section::Imaging);
    assert_eq!(at.section_order[1..8], DEFAULT_ORDER[..7]);
    assert!(at.explanation.contains("imaging (5 visits)"));
}

#[test]
fn promoted_sections_sort_by_visits_then_default_position() {
    let summary = summary_with_visits(&[
        (Section::Safety, 6),
        (Section::Labs, 9),
        (Section::Allergies, 6),
        (Section::Summary, 2),
    ]);
    let decision = decide(&summary, &AdaptationRules::default(), None);

    assert_eq!(
        decision.section_order[..3],
        [Section::Labs, Section::Allergies, Section::Safety]
    );
    assert_eq!(
        decision.section_order[3..],
        [
            Section::Summary,
            Section::Demographics,
            Section::Diagnoses,
            Section::Medications,
            Section::Vitals,
            Section::Imaging,
            Section::Suggestions,
        ]
    );
}

#[test]
fn risk_escalation_forces_vitals_then_labs_ahead_of_usage() {
    let mut summary = summary_with_visits(&[(Section::Medications, 12), (Section::Labs, 8)]);
    summary.risk_escalation_count = 1;

    let decision = decide(&summary, &AdaptationRules::default(), None);
    assert_eq!(
        decision.section_order[..3],
        [Section::Vitals, Section::Labs, Section::Medications]
    );
    assert!(is_complete_order(&decision.section_order));
    assert_eq!(
        decision.adjustments[0],
        Adjustment::RiskPriority {
            sections: vec![Section::Vitals, Section::Labs],
            escalations: 1,
        }
    );
    // Labs was already placed by the risk rule, so only medications is listed.
    assert_eq!(
        decision.adjustments[1],
        Adjustment::FrequentVisits {
            sections: vec![(Section::Medications, 12)],
        }
    );
}

#[test]
fn scenario_risk_and_accepting_clinician() {
    let mut summary = summary_with_visits(&[(Section::Vitals, 7), (Section::Labs, 3)]);
    summary.risk_escalation_count = 1;
    summary.suggestion_accept_count = 8;
    summary.suggestion_ignore_count = 2;

    let decision = decide(&summary, &AdaptationRules::default(), None);
    assert_eq!(
        decision.section_order,
        vec![
            Section::Vitals,
            Section::Labs,
            Section::Summary,
            Section::Demographics,
            Section::Diagnoses,
            Section::Medications,
            Section::Allergies,
            Section::Imaging,
            Section::Suggestions,
            Section::Safety,
        ]
    );
    assert_eq!(decision.suggestion_density, SuggestionDensity::High);
    assert!(decision.explanation.contains("vitals and labs"));
    assert!(decision.explanation.contains("80%"));
}

#[test]
fn scenario_ignore_rate_exactly_at_threshold_is_medium() {
    let decision = decide(&feedback(0, 1, 1), &AdaptationRules::default(), None);
    assert_eq!(decision.suggestion_density, SuggestionDensity::Medium);
    assert_eq!(decision.section_order, DEFAULT_ORDER);
}

#[test]
fn mostly_ignored_suggestions_lower_density() {
    let decision = decide(&feedback(1, 3, 0), &AdaptationRules::default(), None);
    assert_eq!(decision.suggestion_density, SuggestionDensity::Low);
    assert!(decision.explanation.contains("75%"));
    assert!(decision.explanation.contains("ignored"));
}

#[test]
fn accept_rate_at_threshold_is_not_high() {
    let decision = decide(&feedback(7, 0, 3), &AdaptationRules::default(), None);
    assert_eq!(decision.suggestion_density, SuggestionDensity::Medium);
}

#[test]
fn ignore_check_wins_under_overlapping_custom_rules() {
    let rules = AdaptationRules {
        ignore_rate_low_density: 0.1,
        accept_rate_high_density: 0.1,
        ..AdaptationRules::default()
    };
    let decision = decide(&feedback(5, 5, 0), &rules, None);
    assert_eq!(decision.suggestion_density, SuggestionDensity::Low);
}

#[test]
fn injected_thresholds_change_promotion() {
    let rules = AdaptationRules {
        navigation_promote_threshold: 2,
        ..AdaptationRules::default()
    };
    let decision = decide(&summary_with_visits(&[(Section::Safety, 2)]), &rules, None);
    assert_eq!(decision.section_order[0], Section::Safety);
}

#[test]
fn zero_threshold_does_not_promote_unvisited_sections() {
    let rules = AdaptationRules {
        navigation_promote_threshold: 0,
        ..AdaptationRules::default()
    };
    let decision = decide(&summary_with_visits(&[(Section::Labs, 1)]), &rules, None);
    assert_eq!(decision.section_order[0], Section::Labs);
    assert_eq!(
        decision.adjustments,
        vec![Adjustment::FrequentVisits {
            sections: vec![(Section::Labs, 1)],
        }]
    );
}

#[test]
fn extreme_feedback_counts_do_not_overflow() {
    let summary = UsageSummary {
        suggestion_accept_count: u32::MAX,
        suggestion_ignore_count: 1,
        suggestion_not_relevant_count: u32::MAX,
        ..UsageSummary::empty(30)
    };
    let decision = decide(&summary, &AdaptationRules::default(), None);
    assert_eq!(decision.suggestion_density, SuggestionDensity::Medium);

    let mostly_accepted = UsageSummary {
        suggestion_accept_count: u32::MAX,
        suggestion_ignore_count: 1,
        ..UsageSummary::empty(30)
    };
    let decision = decide(&mostly_accepted, &AdaptationRules::default(), None);
    assert_eq!(decision.suggestion_density, SuggestionDensity::High);
    assert!(decision.explanation.contains("4294967296 responses"));
}

#[test]
fn specialty_layout_applies_only_on_cold_start() {
    let table = SpecialtyTable::new()
        .with_specialty("oncology", vec![Section::Labs, Section::Imaging, Section::Labs])
        .assign("dr-onc", "oncology");
    let rules = AdaptationRules::default();

    let cold = plan("dr-onc", None, &UsageSummary::empty(30), &rules, &table, jiff::Timestamp::now());
    assert_eq!(cold.section_order[..2], [Section::Labs, Section::Imaging]);
    assert!(cold.has_complete_order());
    assert!(cold.explanation.contains("specialty layout"));

    let active = plan("dr-onc", None, &feedback(1, 0, 0), &rules, &table, jiff::Timestamp::now());
    assert_eq!(active.section_order, DEFAULT_ORDER);
}

#[test]
fn plan_carries_scope_and_timestamp() {
    let at = jiff::Timestamp::from_second(1_760_000_000).unwrap();
    let plan = plan(
        "u1",
        Some("p9"),
        &UsageSummary::empty(30),
        &AdaptationRules::default(),
        &NoSpecialtyDefaults,
        at,
    );
    assert_eq!(plan.user_id, "u1");
    assert_eq!(plan.patient_id.as_deref(), Some("p9"));
    assert_eq!(plan.generated_at, at);
    assert!(!plan.explanation.is_empty());
    assert!(!plan.differs_from_default());
}

fn arb_summary() -> impl Strategy<Value = UsageSummary> {
    (
        prop::collection::vec(any::<u32>(), DEFAULT_ORDER.len()),
        any::<u32>(),
        any::<u32>(),
        any::<u32>(),
        any::<u32>(),
    )
        .prop_map(|(visits, accept, ignore, not_relevant, escalations)| {
            let mut summary = UsageSummary {
                suggestion_accept_count: accept,
                suggestion_ignore_count: ignore,
                suggestion_not_relevant_count: not_relevant,
                risk_escalation_count: escalations,
                ..UsageSummary::empty(30)
            };
            for (section, n) in DEFAULT_ORDER.iter().zip(visits) {
                summary.section_visit_counts.insert(*section, n);
            }
            summary
        })
}

proptest! {
    #[test]
    fn section_order_is_always_a_permutation(summary in arb_summary()) {
        let decision = decide(&summary, &AdaptationRules::default(), Some(&[Section::Safety]));
        prop_assert!(is_complete_order(&decision.section_order));
        prop_assert!(!decision.explanation.is_empty());
    }

    #[test]
    fn density_follows_rule_precedence(
        accept in any::<u32>(),
        ignore in any::<u32>(),
        not_relevant in any::<u32>(),
    ) {
        let total = u64::from(accept) + u64::from(ignore) + u64::from(not_relevant);
        prop_assume!(total > 0);
        let total = total as f64;
        let expected = if f64::from(ignore) / total > 0.5 {
            SuggestionDensity::Low
        } else if f64::from(accept) / total > 0.7 {
            SuggestionDensity::High
        } else {
            SuggestionDensity::Medium
        };

        let decision = decide(&feedback(accept, ignore, not_relevant), &AdaptationRules::default(), None);
        prop_assert_eq!(decision.suggestion_density, expected);
    }
}
