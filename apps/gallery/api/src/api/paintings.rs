use axum::Router;
use domain_paintings::{PaintingService, handlers};
use std::sync::Arc;

pub fn router(state: &crate::state::AppState) -> Router {
    let service = PaintingService::from_arc(Arc::clone(&state.store))
        .with_settings(state.config.similarity.clone());
    handlers::router(service)
}
