use jiff::{SignedDuration, Timestamp};

use mapek_core::models::event::{EventDetail, FeedbackAction, UserActionEvent};
use mapek_core::models::summary::UsageSummary;

/// Earliest `occurred_at` included in a window of `window_days` days ending
/// at `now`. A day is 24 hours.
pub fn window_start(now: Timestamp, window_days: u32) -> Timestamp {
    let span = SignedDuration::from_hours(i64::from(window_days) * 24);
    now.checked_sub(span).unwrap_or(Timestamp::MIN)
}

/// Whether `event` counts toward a summary for `user_id` / `patient_id`.
///
/// With a patient, events recorded without a patient still count.
pub fn in_scope(event: &UserActionEvent, user_id: &str, patient_id: Option<&str>) -> bool {
    if event.user_id != user_id {
        return false;
    }
    match (patient_id, event.patient_id.as_deref()) {
        (Some(wanted), Some(actual)) => wanted == actual,
        _ => true,
    }
}

/// Count the in-scope events at or after `since`. Plain counting: no
/// weighting or decay.
pub fn summarize<'a>(
    events: impl IntoIterator<Item = &'a UserActionEvent>,
    user_id: &str,
    patient_id: Option<&str>,
    since: Timestamp,
    window_days: u32,
) -> UsageSummary {
    let mut summary = UsageSummary::empty(window_days);

    for event in events {
        if event.occurred_at < since || !in_scope(event, user_id, patient_id) {
            continue;
        }
        match &event.detail {
            EventDetail::Navigation { to_section, .. } => {
                *summary.section_visit_counts.entry(*to_section).or_insert(0) += 1;
            }
            EventDetail::SuggestionFeedback { action, .. } => match action {
                FeedbackAction::Accept => summary.suggestion_accept_count += 1,
                FeedbackAction::Ignore => summary.suggestion_ignore_count += 1,
                FeedbackAction::NotRelevant => summary.suggestion_not_relevant_count += 1,
            },
            detail @ EventDetail::RiskChange { .. } => {
                if detail.is_risk_escalation() {
                    summary.risk_escalation_count += 1;
                }
            }
        }
    }

    summary
}
