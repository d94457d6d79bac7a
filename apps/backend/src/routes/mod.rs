//! HTTP routes

pub mod analyze;
pub mod catalog;
pub mod learner;
pub mod settings;
pub mod study;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::AppState;

/// Build the router with all routes.
pub fn router(state: AppState) -> Router {
    // Routes that act on one learner's progress
    let learner_routes = Router::new()
        .route("/api/study/queue", get(study::queue))
        .route("/api/study/recommendations", get(study::recommend))
        .route("/api/study/quiz", get(study::quiz))
        .route("/api/study/answer", post(study::answer))
        .route("/api/study/start/:item_id", post(study::start))
        .route("/api/study/demote/:item_id", post(study::demote))
        .route("/api/study/breakdown", get(study::status_breakdown))
        .route("/api/study/results", get(study::results))
        .layer(middleware::from_fn(learner::learner_middleware));

    Router::new()
        .route("/health", get(health_check))
        .route("/api/analyze/stem", post(analyze::stem))
        .route("/api/analyze/text", post(analyze::text))
        .route("/api/catalog/import", post(catalog::import))
        .route("/api/catalog", get(catalog::list))
        .route("/api/catalog/:item_id", get(catalog::get))
        .route("/api/settings", get(settings::get).put(settings::update))
        .merge(learner_routes)
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
