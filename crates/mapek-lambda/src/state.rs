use std::sync::Arc;

use mapek_engine::AdaptationEngine;

/// Shared application state, injected into all route handlers via Axum state.
pub struct AppState<S> {
    pub engine: Arc<AdaptationEngine<S>>,
}

impl<S> AppState<S> {
    pub fn new(engine: AdaptationEngine<S>) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }
}

// Manual impl: cloning shares the engine and must not require `S: Clone`.
impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            engine: Arc::clone(&self.engine),
        }
    }
}
