pub mod health;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::interview::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/tracks", get(handlers::handle_list_tracks))
        .route("/api/v1/interviews", post(handlers::handle_create_interview))
        .route(
            "/api/v1/interviews/:id",
            get(handlers::handle_get_interview).delete(handlers::handle_delete_interview),
        )
        .route(
            "/api/v1/interviews/:id/answers",
            post(handlers::handle_answer),
        )
        .route("/api/v1/interviews/:id/reset", post(handlers::handle_reset))
        .route(
            "/api/v1/interviews/:id/credential",
            put(handlers::handle_set_credential),
        )
        .with_state(state)
}
