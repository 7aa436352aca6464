//! Analysis task domain types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of a background analysis task on the analysis service
///
/// Values the service does not document are kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Success,
    Failed,
    Canceled,
    Other(String),
}

impl TaskStatus {
    /// Wire representation of the status
    pub fn as_str(&self) -> &str {
        match self {
            TaskStatus::Pending => "PENDING",
            TaskStatus::InProgress => "IN_PROGRESS",
            TaskStatus::Success => "SUCCESS",
            TaskStatus::Failed => "FAILED",
            TaskStatus::Canceled => "CANCELED",
            TaskStatus::Other(raw) => raw,
        }
    }

    /// Whether the task has finished successfully
    pub fn is_success(&self) -> bool {
        matches!(self, TaskStatus::Success)
    }
}

impl From<&str> for TaskStatus {
    fn from(raw: &str) -> Self {
        match raw {
            "PENDING" => TaskStatus::Pending,
            "IN_PROGRESS" => TaskStatus::InProgress,
            "SUCCESS" => TaskStatus::Success,
            "FAILED" => TaskStatus::Failed,
            "CANCELED" => TaskStatus::Canceled,
            other => TaskStatus::Other(other.to_string()),
        }
    }
}

impl From<String> for TaskStatus {
    fn from(raw: String) -> Self {
        TaskStatus::from(raw.as_str())
    }
}

impl From<TaskStatus> for String {
    fn from(status: TaskStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_statuses() {
        assert_eq!(TaskStatus::from("SUCCESS"), TaskStatus::Success);
        assert_eq!(TaskStatus::from("IN_PROGRESS"), TaskStatus::InProgress);
        assert!(TaskStatus::from("SUCCESS").is_success());
        assert!(!TaskStatus::from("PENDING").is_success());
    }

    #[test]
    fn test_unknown_status_is_kept_verbatim() {
        let status = TaskStatus::from("QUEUED_SOMEWHERE");
        assert_eq!(status, TaskStatus::Other("QUEUED_SOMEWHERE".to_string()));
        assert_eq!(status.to_string(), "QUEUED_SOMEWHERE");
        assert!(!status.is_success());
    }

    #[test]
    fn test_status_is_case_sensitive() {
        assert!(!TaskStatus::from("success").is_success());
    }
}
