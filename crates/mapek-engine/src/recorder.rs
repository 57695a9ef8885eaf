use uuid::Uuid;

use mapek_core::error::InvalidEventError;
use mapek_core::identifiers;
use mapek_core::models::event::{EventCategory, EventDetail, UserActionEvent};

/// Validate a raw interaction and build the event to append.
///
/// Nothing is persisted here; a rejected event never reaches the store.
pub fn build_event(
    user_id: &str,
    category: &str,
    detail: serde_json::Value,
    patient_id: Option<&str>,
    occurred_at: jiff::Timestamp,
) -> Result<UserActionEvent, InvalidEventError> {
    identifiers::check_scope(user_id, patient_id)?;

    let category: EventCategory = category.parse()?;
    let detail = EventDetail::from_json(category, detail)?;

    if let EventDetail::SuggestionFeedback { suggestion_id, .. } = &detail
        && suggestion_id.trim().is_empty()
    {
        return Err(InvalidEventError::Identifier {
            field: "suggestion_id",
            reason: "must not be empty",
        });
    }

    Ok(UserActionEvent {
        id: Uuid::new_v4(),
        user_id: user_id.to_string(),
        patient_id: patient_id.map(str::to_string),
        detail,
        occurred_at,
    })
}
