use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::presentation::state::AppState;

/// Languages and speech models the backend accepts, as it reports them.
pub async fn models_handler(State(state): State<AppState>) -> impl IntoResponse {
    (StatusCode::OK, Json(state.task_service.catalog()))
}
