use std::io;

use axum::Json;
use axum::extract::{Multipart, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use futures::TryStreamExt;
use serde::{Deserialize, Serialize};

use super::error_response;
use crate::application::services::SubmitError;
use crate::domain::ProcessingOptions;
use crate::presentation::state::AppState;

const FILE_FIELD: &str = "file";

#[derive(Debug, Deserialize)]
pub struct UploadParams {
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_model_type")]
    pub model_type: String,
}

fn default_language() -> String {
    ProcessingOptions::DEFAULT_LANGUAGE.to_string()
}

fn default_model_type() -> String {
    ProcessingOptions::DEFAULT_MODEL_SIZE.to_string()
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub task_id: String,
    pub message: String,
}

#[tracing::instrument(skip(state, multipart))]
pub async fn upload_handler(
    State(state): State<AppState>,
    Query(params): Query<UploadParams>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    let options = match state
        .task_service
        .processing_options(&params.language, &params.model_type)
    {
        Ok(options) => options,
        Err(e) => {
            tracing::warn!(error = %e, "Rejected upload options");
            return error_response(StatusCode::BAD_REQUEST, e.to_string());
        }
    };

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(f)) => f,
            Ok(None) => {
                tracing::warn!("Upload request with no file");
                return error_response(StatusCode::BAD_REQUEST, "No file uploaded");
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to read multipart");
                return error_response(
                    StatusCode::BAD_REQUEST,
                    format!("Failed to read multipart: {}", e),
                );
            }
        };

        if field.name() != Some(FILE_FIELD) && field.file_name().is_none() {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        tracing::debug!(filename = %filename, "Receiving audiobook upload");

        let stream = Box::pin(field.map_err(io::Error::other));
        return match state.task_service.submit(&filename, stream, options).await {
            Ok(task_id) => {
                tracing::info!(
                    task_id = %task_id,
                    filename = %filename,
                    "Chapterization task enqueued"
                );
                (
                    StatusCode::ACCEPTED,
                    Json(UploadResponse {
                        task_id: task_id.to_string(),
                        message: "Processing started".to_string(),
                    }),
                )
                    .into_response()
            }
            Err(SubmitError::EmptyUpload) => {
                error_response(StatusCode::BAD_REQUEST, "Uploaded file is empty")
            }
            Err(SubmitError::UploadRead(detail)) => {
                tracing::warn!(error = %detail, "Upload stream ended abnormally");
                error_response(
                    StatusCode::BAD_REQUEST,
                    format!("Failed to read uploaded file: {}", detail),
                )
            }
            Err(SubmitError::QueueUnavailable) => error_response(
                StatusCode::SERVICE_UNAVAILABLE,
                "Processing queue unavailable",
            ),
            Err(e) => {
                tracing::error!(error = %e, "Failed to accept upload");
                error_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to store uploaded file",
                )
            }
        };
    }
}
