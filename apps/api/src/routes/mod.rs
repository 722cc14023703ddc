pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::gallery::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/galleries/render",
            post(handlers::handle_render_preview),
        )
        .route("/api/v1/galleries/:slug", get(handlers::handle_get_gallery))
        .with_state(state)
}
