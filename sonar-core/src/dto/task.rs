//! Task DTOs

use crate::domain::task::TaskStatus;
use serde::{Deserialize, Serialize};

/// Body of `GET <ceTaskUrl>`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskResponse {
    pub task: TaskDetails,
}

/// The `task` object of a task response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub status: TaskStatus,
}
