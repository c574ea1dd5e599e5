pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::questions::handlers::{self, MAX_FORM_BYTES};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/questions",
            post(handlers::handle_generate_questions).layer(DefaultBodyLimit::max(MAX_FORM_BYTES)),
        )
        .with_state(state)
}
