//! Polling engine
//!
//! Two loops run one after the other, each with its own deadline:
//! - Task completion: wait until the analysis task reports `SUCCESS`
//! - Quality gate: fetch the project's verdict, retrying transient failures
//!
//! The analysis service sits behind [`QualityService`] so both loops run
//! against fakes in tests.

mod gate;
mod progress;
mod task;

pub use gate::fetch_quality_gate;
pub use progress::{DotProgress, NoProgress, Progress};
pub use task::wait_for_task;

use async_trait::async_trait;
use sonar_client::SonarClient;
use sonar_core::domain::quality_gate::QualityGateStatus;
use sonar_core::domain::task::TaskStatus;
use tracing::info;

use crate::config::PollerSettings;
use crate::error::PollError;
use crate::outcome::GateOutcome;

/// Remote operations the pollers depend on
#[async_trait]
pub trait QualityService: Send + Sync {
    /// Status of the analysis task at `task_url`
    async fn task_status(&self, task_url: &str) -> sonar_client::Result<TaskStatus>;

    /// Current quality gate verdict of a project
    async fn quality_gate_status(
        &self,
        project_key: &str,
    ) -> sonar_client::Result<QualityGateStatus>;

    /// Web UI location of the project's results
    fn dashboard_url(&self, project_key: &str) -> String;
}

#[async_trait]
impl QualityService for SonarClient {
    async fn task_status(&self, task_url: &str) -> sonar_client::Result<TaskStatus> {
        SonarClient::task_status(self, task_url).await
    }

    async fn quality_gate_status(
        &self,
        project_key: &str,
    ) -> sonar_client::Result<QualityGateStatus> {
        self.project_status(project_key).await
    }

    fn dashboard_url(&self, project_key: &str) -> String {
        SonarClient::dashboard_url(self, project_key)
    }
}

/// Wait for the current analysis, then fetch its quality gate verdict
///
/// Each phase gets the full configured timeout.
pub async fn check_quality_gate(
    settings: &PollerSettings,
    service: &dyn QualityService,
    progress: &dyn Progress,
) -> Result<GateOutcome, PollError> {
    let policy = settings.backoff_policy();

    let task = wait_for_task(service, &settings.report_path, &policy, progress).await?;
    info!(task_url = task.url(), "Analysis task finished");

    let status = fetch_quality_gate(service, &settings.project_key, &policy, progress).await?;
    info!(project_key = %settings.project_key, %status, "Quality gate evaluated");

    Ok(GateOutcome::new(
        status,
        service.dashboard_url(&settings.project_key),
    ))
}
