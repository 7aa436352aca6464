//! Quality gate endpoint

use crate::SonarClient;
use crate::error::Result;
use sonar_core::domain::quality_gate::QualityGateStatus;
use sonar_core::dto::quality_gate::ProjectStatusResponse;
use tracing::debug;

impl SonarClient {
    /// URL of the quality gate status endpoint for a project
    ///
    /// The project key is substituted as-is.
    pub fn project_status_url(&self, project_key: &str) -> String {
        format!(
            "{}/api/qualitygates/project_status?projectKey={}",
            self.base_url, project_key
        )
    }

    /// URL of the project dashboard in the web UI
    pub fn dashboard_url(&self, project_key: &str) -> String {
        format!("{}/dashboard/index/{}", self.base_url, project_key)
    }

    /// Fetch the current quality gate verdict of a project
    ///
    /// # Arguments
    /// * `project_key` - Project key as shown on the dashboard, e.g. `com.example:myapp`
    ///
    /// # Returns
    /// The `projectStatus.status` field, unchanged
    pub async fn project_status(&self, project_key: &str) -> Result<QualityGateStatus> {
        let url = self.project_status_url(project_key);
        let response = self.get(&url).send().await?;
        let body: ProjectStatusResponse = self.handle_response(response).await?;

        debug!(project_key, status = %body.project_status.status, "Fetched quality gate status");
        Ok(body.project_status.status)
    }
}
