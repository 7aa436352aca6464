//! Task-completion poller

use std::path::Path;

use sonar_core::domain::task::TaskStatus;
use tracing::{debug, info};

use super::{Progress, QualityService};
use crate::error::{Phase, PollError};
use crate::report::{TaskReference, read_task_reference};
use crate::retry::{BackoffPolicy, Verdict, retry};

/// Block until the analysis task named in the report artifact succeeds
///
/// The artifact is read once, before any request; a missing file or entry
/// fails without touching the network. Any status other than `SUCCESS`
/// counts as not ready yet and is retried like a transport failure, under
/// the same deadline.
///
/// # Returns
/// The task reference that was polled
pub async fn wait_for_task(
    service: &dyn QualityService,
    report_path: &Path,
    policy: &BackoffPolicy,
    progress: &dyn Progress,
) -> Result<TaskReference, PollError> {
    let task = read_task_reference(report_path)?;
    info!(task_url = task.url(), "Waiting for analysis task");

    let task_url = task.url();
    progress.begin(Phase::TaskCompletion);
    let result = retry(
        policy,
        move || {
            progress.attempt();
            service.task_status(task_url)
        },
        classify,
    )
    .await;
    progress.finish();

    result
        .map(|()| task)
        .map_err(|e| PollError::from_retry(Phase::TaskCompletion, e))
}

fn classify(result: sonar_client::Result<TaskStatus>) -> Verdict<(), PollError> {
    match result {
        Ok(status) if status.is_success() => Verdict::Success(()),
        Ok(status) => {
            debug!(%status, "Analysis task not finished yet");
            Verdict::Retryable(PollError::NotReadyYet(status))
        }
        Err(e) => PollError::from(e).into_verdict(),
    }
}
