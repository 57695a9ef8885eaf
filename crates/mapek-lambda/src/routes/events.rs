use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use mapek_storage::AdaptationStore;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RecordEventRequest {
    pub user_id: String,
    pub patient_id: Option<String>,
    pub category: String,
    #[serde(default)]
    pub detail: serde_json::Value,
}

#[derive(Debug, Serialize)]
pub struct RecordEventResponse {
    pub id: Uuid,
}

/// Record one trackable interaction. Clients must treat any failure here as
/// non-fatal to the action being tracked.
pub async fn record_event<S: AdaptationStore + 'static>(
    State(state): State<AppState<S>>,
    Json(req): Json<RecordEventRequest>,
) -> Result<(StatusCode, Json<RecordEventResponse>), ApiError> {
    let id = state
        .engine
        .record_event(
            &req.user_id,
            &req.category,
            req.detail,
            req.patient_id.as_deref(),
        )
        .await
        .inspect_err(|e| tracing::warn!(error = %e, "user action not recorded"))?;

    Ok((StatusCode::CREATED, Json(RecordEventResponse { id })))
}
