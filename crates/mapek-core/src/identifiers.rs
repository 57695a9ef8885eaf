//! Identifier rules shared by every operation that takes a user or patient
//! scope. Both ids become S3 key segments.

use crate::error::InvalidEventError;

/// Reject ids that are empty or could escape their key segment.
pub fn check_key_segment(field: &'static str, value: &str) -> Result<(), InvalidEventError> {
    if value.trim().is_empty() {
        return Err(InvalidEventError::Identifier {
            field,
            reason: "must not be empty",
        });
    }
    if value.contains('/') {
        return Err(InvalidEventError::Identifier {
            field,
            reason: "must not contain '/'",
        });
    }
    Ok(())
}

/// Validate a (user, optional patient) scope.
pub fn check_scope(user_id: &str, patient_id: Option<&str>) -> Result<(), InvalidEventError> {
    check_key_segment("user_id", user_id)?;
    if let Some(patient_id) = patient_id {
        check_key_segment("patient_id", patient_id)?;
    }
    Ok(())
}
