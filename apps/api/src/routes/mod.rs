pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::generation::handlers as generation;
use crate::state::AppState;
use crate::validation::handlers as validation;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Validation API
        .route(
            "/api/v1/articles/validate",
            post(validation::handle_validate),
        )
        .route(
            "/api/v1/articles/validate/report",
            post(validation::handle_validate_report),
        )
        .route(
            "/api/v1/articles/runs/:id",
            get(validation::handle_get_run),
        )
        // Generation API
        .route(
            "/api/v1/articles/generate",
            post(generation::handle_generate),
        )
        .with_state(state)
}
