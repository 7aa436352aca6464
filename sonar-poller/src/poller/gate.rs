//! Quality-gate poller

use sonar_core::domain::quality_gate::QualityGateStatus;

use super::{Progress, QualityService};
use crate::error::{Phase, PollError};
use crate::retry::{BackoffPolicy, Verdict, retry};

/// Fetch the project's quality gate verdict
///
/// Only transient failures are retried: transport errors, non-2xx responses
/// and bodies without `projectStatus.status`. Any verdict the service sends
/// is final and returned unchanged.
pub async fn fetch_quality_gate(
    service: &dyn QualityService,
    project_key: &str,
    policy: &BackoffPolicy,
    progress: &dyn Progress,
) -> Result<QualityGateStatus, PollError> {
    progress.begin(Phase::QualityGate);
    let result = retry(
        policy,
        move || {
            progress.attempt();
            service.quality_gate_status(project_key)
        },
        classify,
    )
    .await;
    progress.finish();

    result.map_err(|e| PollError::from_retry(Phase::QualityGate, e))
}

fn classify(
    result: sonar_client::Result<QualityGateStatus>,
) -> Verdict<QualityGateStatus, PollError> {
    match result {
        Ok(status) => Verdict::Success(status),
        Err(e) => PollError::from(e).into_verdict(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::poller::NoProgress;
    use crate::poller::testing::*;
    use sonar_client::ClientError;
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn test_verdict_is_returned_as_is() {
        for verdict in ["OK", "ERROR", "WARN", "SOMETHING_NEW"] {
            let service = ScriptedService::new(vec![], vec![Ok(QualityGateStatus::from(verdict))]);

            let status = fetch_quality_gate(&service, "app", &BackoffPolicy::default(), &NoProgress)
                .await
                .unwrap();

            assert_eq!(status.as_str(), verdict);
            assert_eq!(service.gate_calls(), 1);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_error_verdict_is_not_retried() {
        let service = ScriptedService::new(vec![], vec![Ok(QualityGateStatus::Error)]);
        let progress = CountingProgress::default();

        let status = fetch_quality_gate(&service, "app", &BackoffPolicy::default(), &progress)
            .await
            .unwrap();

        assert_eq!(status, QualityGateStatus::Error);
        assert_eq!(progress.attempts(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_malformed_and_failed_responses_are_retried() {
        let service = ScriptedService::new(
            vec![],
            vec![
                Err(ClientError::ParseError("missing field `projectStatus`".into())),
                Err(ClientError::api_error(500, "oops")),
                Ok(QualityGateStatus::Ok),
            ],
        );
        let progress = CountingProgress::default();

        let status = fetch_quality_gate(&service, "app", &BackoffPolicy::default(), &progress)
            .await
            .unwrap();

        assert_eq!(status, QualityGateStatus::Ok);
        assert_eq!(service.gate_calls(), 3);
        assert_eq!(progress.attempts(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_persistent_malformed_response_times_out() {
        let service = ScriptedService::new(
            vec![],
            vec![Err(ClientError::ParseError("empty body".into()))],
        );
        let policy = BackoffPolicy::new(Duration::from_secs(5));

        let err = fetch_quality_gate(&service, "app", &policy, &NoProgress)
            .await
            .unwrap_err();

        match err {
            PollError::TimeoutExceeded { phase, last, .. } => {
                assert_eq!(phase, Phase::QualityGate);
                assert!(matches!(*last, PollError::MalformedResponse(_)));
            }
            other => panic!("expected timeout, got {:?}", other),
        }
    }
}
