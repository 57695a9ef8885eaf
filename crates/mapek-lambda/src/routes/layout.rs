use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use mapek_core::models::layout::EffectiveLayout;
use mapek_storage::AdaptationStore;

use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LayoutQuery {
    pub user_id: String,
    pub patient_id: Option<String>,
    /// Set by the UI's "reset layout" toggle.
    #[serde(default)]
    pub use_defaults: bool,
}

/// The layout to render. Always succeeds; storage trouble yields the defaults.
pub async fn get_layout<S: AdaptationStore + 'static>(
    State(state): State<AppState<S>>,
    Query(query): Query<LayoutQuery>,
) -> Json<EffectiveLayout> {
    let layout = state
        .engine
        .effective_layout(&query.user_id, query.patient_id.as_deref(), query.use_defaults)
        .await;
    Json(layout)
}
