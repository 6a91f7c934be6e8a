//! Upload intake and static serving of stored files.

use std::path::Path;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Multipart, State, multipart::MultipartRejection},
    routing::post,
};
use classroom_api_types::{Success, UploadResponse};
use classroom_core::domain::{AccessScope, UploadedFile};
use tower_http::services::ServeDir;

use super::auth::CurrentUser;
use super::error::ApiError;
use super::state::AppState;
use crate::service::ServiceError;

const FILE_FIELD: &str = "file";

pub fn create_upload_router(max_upload_bytes: usize) -> Router<Arc<AppState>> {
    Router::new().route(
        "/api/teacher/assignments/upload",
        post(upload_assignment_file).layer(DefaultBodyLimit::max(max_upload_bytes)),
    )
}

/// Serves everything under `root` at `/files/{key}`.
pub fn create_files_router(root: &Path) -> Router<Arc<AppState>> {
    Router::new().nest_service("/files", ServeDir::new(root))
}

async fn upload_assignment_file(
    state: State<Arc<AppState>>,
    user: CurrentUser,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<Success<UploadResponse>>, ApiError> {
    let caller = user.require(AccessScope::Teacher)?;
    let mut multipart = multipart?;

    let mut upload = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await?;
        upload = Some(UploadedFile {
            file_name,
            content_type,
            bytes: bytes.to_vec(),
        });
        break;
    }
    let file = upload.ok_or(ServiceError::BadRequest("File is required"))?;

    let key = state
        .services
        .coursework
        .upload_assignment_file(&caller, file)
        .await?;

    Ok(Json(Success::new(UploadResponse {
        url: state.files.url_for_key(&key),
        key,
    })))
}
