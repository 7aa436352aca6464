//! Progress reporting
//!
//! One mark per request, not per backoff tick.

use std::io::{self, Write};

use crate::error::Phase;

/// Receives progress events from the polling loops
pub trait Progress: Send + Sync {
    /// A polling loop is starting
    fn begin(&self, phase: Phase);

    /// A request is about to be sent
    fn attempt(&self);

    /// The current polling loop ended, successfully or not
    fn finish(&self);
}

/// Prints a header per phase and a `.` per request to stdout
#[derive(Debug, Default, Clone, Copy)]
pub struct DotProgress;

impl DotProgress {
    fn emit(text: &str) {
        let mut stdout = io::stdout().lock();
        // Progress output is best effort
        let _ = stdout.write_all(text.as_bytes());
        let _ = stdout.flush();
    }
}

impl Progress for DotProgress {
    fn begin(&self, phase: Phase) {
        match phase {
            Phase::TaskCompletion => Self::emit("Polling analysis status..."),
            Phase::QualityGate => Self::emit("Polling quality gate..."),
        }
    }

    fn attempt(&self) {
        Self::emit(".");
    }

    fn finish(&self) {
        Self::emit("\n");
    }
}

/// Discards all progress events
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl Progress for NoProgress {
    fn begin(&self, _phase: Phase) {}

    fn attempt(&self) {}

    fn finish(&self) {}
}
