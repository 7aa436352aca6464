//! Final result of a polling run

use sonar_core::domain::quality_gate::QualityGateStatus;

/// Verdict plus where to look at the details
///
/// The process exit code is derived from this by the binary; the engine
/// itself never exits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateOutcome {
    pub status: QualityGateStatus,
    pub dashboard_url: String,
}

impl GateOutcome {
    pub fn new(status: QualityGateStatus, dashboard_url: impl Into<String>) -> Self {
        Self {
            status,
            dashboard_url: dashboard_url.into(),
        }
    }

    pub fn passed(&self) -> bool {
        self.status.is_passing()
    }

    /// 0 for `OK`, 1 for every other verdict
    pub fn exit_code(&self) -> u8 {
        if self.passed() { 0 } else { 1 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(GateOutcome::new(QualityGateStatus::Ok, "u").exit_code(), 0);
        assert_eq!(GateOutcome::new(QualityGateStatus::Error, "u").exit_code(), 1);
        assert_eq!(GateOutcome::new(QualityGateStatus::Warn, "u").exit_code(), 1);
        assert_eq!(
            GateOutcome::new(QualityGateStatus::Other("PENDING".into()), "u").exit_code(),
            1
        );
    }
}
