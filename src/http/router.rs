//! Router configuration for the HTTP API.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        // NEO pass-through
        .route("/home/stats", get(handlers::neo_stats))
        .route("/home/today_stats", get(handlers::neo_today))
        .route("/neo/browse", get(handlers::neo_browse))
        .route("/neo/{id}", get(handlers::neo_lookup))
        // AI
        .route("/ai/predict-impact", post(handlers::predict_impact))
        .route("/ai/plan-intercept", post(handlers::plan_intercept))
        .route("/ai/impact-examples", get(handlers::get_impact_examples))
        .route("/health", get(handlers::health_check));

    Router::new()
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
