//! HTTP surface: routers, extractors and response shaping.

pub mod auth;
pub mod error;
pub mod files;
pub mod present;
pub mod state;
pub mod student;
pub mod teacher;

use std::sync::Arc;

use axum::{Json, Router, routing::get};
use classroom_api_types::HealthCheckResponse;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub use auth::CurrentUser;
pub use error::ApiError;
pub use state::AppState;

/// Full application router with state, CORS and request tracing attached.
pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .merge(teacher::create_teacher_router())
        .merge(student::create_student_router())
        .merge(files::create_upload_router(state.config.max_upload_bytes))
        .merge(files::create_files_router(&state.config.upload_dir))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn health() -> Json<HealthCheckResponse> {
    Json(HealthCheckResponse::ok())
}
