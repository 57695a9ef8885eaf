use thiserror::Error;

use crate::models::event::EventCategory;

/// Rejection of a user action event before anything is persisted.
#[derive(Debug, Error)]
pub enum InvalidEventError {
    #[error("unknown event category: {0}")]
    UnknownCategory(String),

    #[error("invalid {category} detail: {reason}")]
    Detail {
        category: EventCategory,
        reason: String,
    },

    #[error("invalid {field}: {reason}")]
    Identifier {
        field: &'static str,
        reason: &'static str,
    },
}
