//! S3 key/path conventions.
//!
//! Pure string functions with no AWS SDK dependency. Timestamps are encoded as
//! zero-padded Unix milliseconds so lexicographic key order is time order.

use uuid::Uuid;

pub const EVENTS_PREFIX: &str = "events/";

pub const PLANS_PREFIX: &str = "plans/";

fn millis(ts: jiff::Timestamp) -> u64 {
    ts.as_millisecond().max(0) as u64
}

pub fn events_prefix(user_id: &str) -> String {
    format!("{EVENTS_PREFIX}{user_id}/")
}

pub fn event(user_id: &str, occurred_at: jiff::Timestamp, id: Uuid) -> String {
    format!("{EVENTS_PREFIX}{user_id}/{:020}-{id}.json", millis(occurred_at))
}

/// Listing marker that sorts before every event key at or after `since`.
pub fn events_start_after(user_id: &str, since: jiff::Timestamp) -> String {
    format!("{EVENTS_PREFIX}{user_id}/{:020}", millis(since))
}

/// Prefix holding every plan for one (user, optional patient) scope.
pub fn plans_prefix(user_id: &str, patient_id: Option<&str>) -> String {
    match patient_id {
        Some(patient_id) => format!("{PLANS_PREFIX}{user_id}/patients/{patient_id}/"),
        None => format!("{PLANS_PREFIX}{user_id}/user/"),
    }
}

/// True when `key` sits directly under `prefix`, not in a nested "directory".
///
/// Listing a prefix also returns keys of any id that extends it with `/`;
/// those belong to a different scope.
pub fn is_direct_child(prefix: &str, key: &str) -> bool {
    key.strip_prefix(prefix)
        .is_some_and(|rest| !rest.is_empty() && !rest.contains('/'))
}

pub fn plan(
    user_id: &str,
    patient_id: Option<&str>,
    generated_at: jiff::Timestamp,
    id: Uuid,
) -> String {
    format!(
        "{}{:020}-{id}.json",
        plans_prefix(user_id, patient_id),
        millis(generated_at)
    )
}
