use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;

use super::error_response;
use crate::application::services::DownloadError;
use crate::presentation::state::AppState;

const NOT_FOUND_MESSAGE: &str = "Processed files not found";

/// Streams the finished chapters of a task as one ZIP archive.
#[tracing::instrument(skip(state))]
pub async fn download_handler(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
) -> impl IntoResponse {
    match state.task_service.download(&task_id).await {
        Ok((id, archive)) => {
            tracing::info!(task_id = %id, bytes = archive.len(), "Serving chapter archive");
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, "application/zip".to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename=\"chapters-{}.zip\"", id),
                    ),
                ],
                archive,
            )
                .into_response()
        }
        Err(DownloadError::NotFound(_)) | Err(DownloadError::NotCompleted(_)) => {
            error_response(StatusCode::NOT_FOUND, NOT_FOUND_MESSAGE)
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to package output");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to package processed files",
            )
        }
    }
}
