//! Quality gate DTOs

use crate::domain::quality_gate::QualityGateStatus;
use serde::{Deserialize, Serialize};

/// Body of `GET /api/qualitygates/project_status`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectStatusResponse {
    pub project_status: ProjectStatus,
}

/// The `projectStatus` object; conditions and periods are not modelled
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectStatus {
    pub status: QualityGateStatus,
}
