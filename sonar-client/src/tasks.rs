//! Analysis task endpoint

use crate::SonarClient;
use crate::error::Result;
use sonar_core::domain::task::TaskStatus;
use sonar_core::dto::task::TaskResponse;
use tracing::debug;

impl SonarClient {
    /// Fetch the status of an analysis task
    ///
    /// # Arguments
    /// * `task_url` - Absolute task URL, as written to the report artifact
    ///   by the scanner (`ceTaskUrl`)
    ///
    /// # Returns
    /// The task's `task.status` field
    pub async fn task_status(&self, task_url: &str) -> Result<TaskStatus> {
        let response = self.get(task_url).send().await?;
        let body: TaskResponse = self.handle_response(response).await?;

        debug!(task_id = ?body.task.id, status = %body.task.status, "Fetched task status");
        Ok(body.task.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ClientError;

    #[tokio::test]
    async fn test_task_status_success() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/ce/task")
            .match_query(mockito::Matcher::UrlEncoded("id".into(), "AX1".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"task":{"id":"AX1","status":"SUCCESS"}}"#)
            .create_async()
            .await;

        let client = SonarClient::new(server.url());
        let url = format!("{}/api/ce/task?id=AX1", server.url());
        let status = client.task_status(&url).await.unwrap();

        assert_eq!(status, TaskStatus::Success);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_task_status_non_2xx_is_api_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/ce/task")
            .with_status(503)
            .with_body("maintenance")
            .create_async()
            .await;

        let client = SonarClient::new(server.url());
        let url = format!("{}/api/ce/task", server.url());
        let err = client.task_status(&url).await.unwrap_err();

        assert!(matches!(err, ClientError::ApiError { status: 503, .. }));
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_task_status_missing_field_is_parse_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/ce/task")
            .with_status(200)
            .with_body(r#"{"task":{}}"#)
            .create_async()
            .await;

        let client = SonarClient::new(server.url());
        let url = format!("{}/api/ce/task", server.url());
        let err = client.task_status(&url).await.unwrap_err();

        assert!(matches!(err, ClientError::ParseError(_)));
    }

    #[tokio::test]
    async fn test_task_status_invalid_url_is_not_retryable() {
        let client = SonarClient::new("http://localhost:9000");
        let err = client.task_status("not a url").await.unwrap_err();

        assert!(!err.is_retryable());
    }
}
