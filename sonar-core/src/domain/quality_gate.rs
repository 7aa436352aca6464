//! Quality gate domain types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Quality gate verdict for a project
///
/// The vocabulary belongs to the analysis service. Unknown values are kept
/// in `Other` so the verdict can be reported exactly as received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum QualityGateStatus {
    Ok,
    Warn,
    Error,
    None,
    Other(String),
}

impl QualityGateStatus {
    /// Wire representation of the verdict
    pub fn as_str(&self) -> &str {
        match self {
            QualityGateStatus::Ok => "OK",
            QualityGateStatus::Warn => "WARN",
            QualityGateStatus::Error => "ERROR",
            QualityGateStatus::None => "NONE",
            QualityGateStatus::Other(raw) => raw,
        }
    }

    /// Only an `OK` verdict passes the gate
    pub fn is_passing(&self) -> bool {
        matches!(self, QualityGateStatus::Ok)
    }
}

impl From<&str> for QualityGateStatus {
    fn from(raw: &str) -> Self {
        match raw {
            "OK" => QualityGateStatus::Ok,
            "WARN" => QualityGateStatus::Warn,
            "ERROR" => QualityGateStatus::Error,
            "NONE" => QualityGateStatus::None,
            other => QualityGateStatus::Other(other.to_string()),
        }
    }
}

impl From<String> for QualityGateStatus {
    fn from(raw: String) -> Self {
        QualityGateStatus::from(raw.as_str())
    }
}

impl From<QualityGateStatus> for String {
    fn from(status: QualityGateStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for QualityGateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_ok_passes() {
        assert!(QualityGateStatus::from("OK").is_passing());
        assert!(!QualityGateStatus::from("ERROR").is_passing());
        assert!(!QualityGateStatus::from("WARN").is_passing());
        assert!(!QualityGateStatus::from("NONE").is_passing());
        assert!(!QualityGateStatus::from("ok").is_passing());
    }

    #[test]
    fn test_verdict_string_is_unchanged() {
        for raw in ["OK", "ERROR", "WARN", "NONE", "SOMETHING_NEW"] {
            assert_eq!(QualityGateStatus::from(raw).as_str(), raw);
        }
    }
}
