use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;

use super::error_response;
use crate::domain::TaskStatus;
use crate::presentation::state::AppState;

#[derive(Debug, Serialize)]
pub struct TaskSummary {
    pub task_id: String,
    pub status: TaskStatus,
    pub progress: f32,
    pub message: String,
}

#[tracing::instrument(skip(state))]
pub async fn tasks_handler(State(state): State<AppState>) -> impl IntoResponse {
    match state.task_service.list().await {
        Ok(tasks) => {
            let summaries: Vec<TaskSummary> = tasks
                .into_iter()
                .map(|(id, record)| TaskSummary {
                    task_id: id.to_string(),
                    status: record.status,
                    progress: record.progress,
                    message: record.message,
                })
                .collect();
            (StatusCode::OK, Json(summaries)).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to list tasks");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to list tasks: {}", e),
            )
        }
    }
}
