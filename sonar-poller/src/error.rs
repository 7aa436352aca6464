//! Polling errors
//!
//! Retryable conditions never leave a polling loop on their own; they only
//! surface wrapped in `TimeoutExceeded` once the loop's budget is spent.

use crate::report::CE_TASK_URL_KEY;
use crate::retry::{RetryError, Verdict};
use sonar_client::ClientError;
use sonar_core::domain::task::TaskStatus;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

/// The two polling loops
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    TaskCompletion,
    QualityGate,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::TaskCompletion => f.write_str("analysis task"),
            Phase::QualityGate => f.write_str("quality gate"),
        }
    }
}

#[derive(Debug, Error)]
pub enum PollError {
    #[error("report artifact {} could not be read", path.display())]
    ArtifactMissing {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("report artifact {} has no {} entry", path.display(), CE_TASK_URL_KEY)]
    ArtifactMalformed { path: PathBuf },

    #[error("transient transport failure: {0}")]
    TransientTransportFailure(#[source] ClientError),

    #[error("analysis task not finished yet (status {0})")]
    NotReadyYet(TaskStatus),

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("{phase} polling timed out after {elapsed:?} ({attempts} attempts); last error: {last}")]
    TimeoutExceeded {
        phase: Phase,
        attempts: u32,
        elapsed: Duration,
        last: Box<PollError>,
    },

    #[error("request failed: {0}")]
    Client(#[source] ClientError),
}

impl PollError {
    /// Conditions retried with backoff until the deadline
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::TransientTransportFailure(_) | Self::NotReadyYet(_) | Self::MalformedResponse(_)
        )
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::TimeoutExceeded { .. })
    }

    /// Classify an attempt's error for the retry executor
    pub(crate) fn into_verdict<T>(self) -> Verdict<T, PollError> {
        if matches!(&self, Self::TransientTransportFailure(e) if e.is_client_error()) {
            warn!(error = %self, "Request rejected, check credentials and project key; will retry");
            Verdict::Retryable(self)
        } else if self.is_retryable() {
            warn!(error = %self, "Attempt failed, will retry");
            Verdict::Retryable(self)
        } else {
            Verdict::Terminal(self)
        }
    }

    /// Collapse a finished retry loop into the error crossing the poller boundary
    pub(crate) fn from_retry(phase: Phase, error: RetryError<PollError>) -> Self {
        match error {
            RetryError::Terminal(error) => error,
            RetryError::Timeout {
                attempts,
                elapsed,
                last,
            } => Self::TimeoutExceeded {
                phase,
                attempts,
                elapsed,
                last: Box::new(last),
            },
        }
    }
}

impl From<ClientError> for PollError {
    fn from(error: ClientError) -> Self {
        match error {
            ClientError::ParseError(message) => Self::MalformedResponse(message),
            error if error.is_retryable() => Self::TransientTransportFailure(error),
            error => Self::Client(error),
        }
    }
}
