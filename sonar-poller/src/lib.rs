//! Sonar Poller
//!
//! Waits for a submitted analysis to finish on the analysis service and
//! reports whether the project passed its quality gate.
//!
//! Architecture:
//! - Report: reads the analysis task URL left behind by the scanner
//! - Retry: deadline-bounded exponential backoff executor
//! - Poller: task-completion and quality-gate loops built on the executor
//! - Outcome: the verdict handed back to the command line layer

pub mod config;
pub mod error;
pub mod outcome;
pub mod poller;
pub mod report;
pub mod retry;

pub use config::{ConfigError, PollerSettings};
pub use error::{Phase, PollError};
pub use outcome::GateOutcome;
pub use poller::{
    DotProgress, NoProgress, Progress, QualityService, check_quality_gate, fetch_quality_gate,
    wait_for_task,
};
pub use report::{TaskReference, parse_task_reference, read_task_reference};
pub use retry::{BackoffPolicy, RetryError, Verdict, retry};
