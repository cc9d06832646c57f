use std::sync::Arc;

use crate::application::services::TaskService;
use crate::presentation::config::Settings;

#[derive(Clone)]
pub struct AppState {
    pub task_service: Arc<TaskService>,
    pub settings: Settings,
}
