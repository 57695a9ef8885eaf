//! mapek-lambda
//!
//! HTTP surface for the adaptive layout engine, run on AWS Lambda through
//! `lambda_http`. The router is generic over the store so it can be driven
//! in-process by tests.

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

use axum::middleware as axum_mw;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};

use mapek_storage::AdaptationStore;

use crate::state::AppState;

pub fn router<S: AdaptationStore + 'static>(state: AppState<S>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/events", post(routes::events::record_event::<S>))
        .route("/plans", post(routes::plans::generate_plan::<S>))
        .route("/plans/latest", get(routes::plans::get_latest_plan::<S>))
        .route("/layout", get(routes::layout::get_layout::<S>))
        .layer(axum_mw::from_fn(middleware::audit::audit_log))
        .layer(cors)
        .with_state(state)
}
