use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use mapek_core::models::plan::AdaptationPlan;
use mapek_storage::AdaptationStore;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GeneratePlanRequest {
    pub user_id: String,
    pub patient_id: Option<String>,
    pub window_days: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct PlanScope {
    pub user_id: String,
    pub patient_id: Option<String>,
}

pub async fn generate_plan<S: AdaptationStore + 'static>(
    State(state): State<AppState<S>>,
    Json(req): Json<GeneratePlanRequest>,
) -> Result<Json<AdaptationPlan>, ApiError> {
    let plan = state
        .engine
        .generate_plan(&req.user_id, req.patient_id.as_deref(), req.window_days)
        .await?;
    Ok(Json(plan))
}

pub async fn get_latest_plan<S: AdaptationStore + 'static>(
    State(state): State<AppState<S>>,
    Query(scope): Query<PlanScope>,
) -> Result<Json<AdaptationPlan>, ApiError> {
    state
        .engine
        .get_latest_plan(&scope.user_id, scope.patient_id.as_deref())
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("no adaptation plan for user {}", scope.user_id)))
}
