pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/analyses",
            get(handlers::handle_list_analyses).post(handlers::handle_create_analysis),
        )
        .route(
            "/api/v1/analyses/results",
            post(handlers::handle_submit_result),
        )
        .route("/api/v1/analyses/:id", get(handlers::handle_get_analysis))
        .route(
            "/api/v1/analyses/:id/result",
            get(handlers::handle_get_analysis_result),
        )
        .with_state(state)
}
