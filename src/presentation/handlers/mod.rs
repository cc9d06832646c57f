mod download;
mod health;
mod models;
mod task_status;
mod tasks;
mod upload;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

pub use download::download_handler;
pub use health::health_handler;
pub use models::models_handler;
pub use task_status::{TaskStatusResponse, task_status_handler};
pub use tasks::{TaskSummary, tasks_handler};
pub use upload::{UploadParams, UploadResponse, upload_handler};

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub(crate) fn error_response(status: StatusCode, error: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
        }),
    )
        .into_response()
}
