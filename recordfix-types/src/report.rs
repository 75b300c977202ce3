use crate::plan::ExecutionPlan;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome counts for one `fix_data` run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixSummary {
    pub records_total: u64,
    pub normalized: u64,
    pub excluded: u64,
}

/// Machine-readable run report written next to the outputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixReport {
    pub schema: String,
    pub tool: ToolInfo,
    pub run: RunInfo,
    pub summary: FixSummary,

    #[serde(default)]
    pub plan: ExecutionPlan,

    /// Input and output file locations, if the run touched files.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artifacts: Option<ReportArtifacts>,
}

impl FixReport {
    pub fn new(tool: ToolInfo, run: RunInfo, summary: FixSummary, plan: ExecutionPlan) -> Self {
        Self {
            schema: crate::schema::RECORDFIX_REPORT_V1.to_string(),
            tool,
            run,
            summary,
            plan,
            artifacts: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportArtifacts {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normalized: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excluded: Option<String>,
}
