pub mod health;

use axum::{extract::DefaultBodyLimit, routing::get, routing::post, Router};

use crate::review::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Resume API
        .route("/api/v1/resumes", post(handlers::handle_upload_resume))
        .route("/api/v1/resumes/:id", get(handlers::handle_get_resume))
        .route(
            "/api/v1/resumes/:id/revised",
            get(handlers::handle_get_revised_html),
        )
        .route(
            "/api/v1/resumes/:id/download",
            get(handlers::handle_download_pdf),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
