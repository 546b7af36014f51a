use crate::ident::EntryIds;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifies the binary that produced a report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commit: Option<String>,
}

/// Wall-clock bounds of one run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunTimes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<DateTime<Utc>>,
}

/// Outcome of one pbxpatch run, written as `report.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatchReport {
    pub schema: String,
    pub tool: ToolInfo,

    #[serde(default)]
    pub run: RunTimes,

    pub manifest: ManifestInfo,
    pub ids: EntryIds,

    #[serde(default)]
    pub steps: Vec<StepResult>,

    pub summary: PatchSummary,
}

impl PatchReport {
    pub fn new(tool: ToolInfo, manifest: ManifestInfo, ids: EntryIds) -> Self {
        Self {
            schema: crate::schema::PBXPATCH_REPORT_V1.to_string(),
            tool,
            run: RunTimes::default(),
            manifest,
            ids,
            steps: vec![],
            summary: PatchSummary::default(),
        }
    }

    /// Record a step and keep the summary counts in sync.
    pub fn push_step(&mut self, step: StepResult) {
        match step.status {
            StepStatus::Applied => self.summary.applied += 1,
            StepStatus::Skipped => self.summary.skipped += 1,
        }
        self.steps.push(step);
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestInfo {
    pub path: String,

    /// False for dry runs and for runs where nothing matched.
    pub written: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha256_before: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha256_after: Option<String>,
}

/// The four insertions, in the order they run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    FileReference,
    BuildFile,
    ResourcesPhase,
    MainGroup,
}

impl StepKind {
    pub const ALL: [StepKind; 4] = [
        StepKind::FileReference,
        StepKind::BuildFile,
        StepKind::ResourcesPhase,
        StepKind::MainGroup,
    ];

    pub fn label(self) -> &'static str {
        match self {
            StepKind::FileReference => "file_reference",
            StepKind::BuildFile => "build_file",
            StepKind::ResourcesPhase => "resources_phase",
            StepKind::MainGroup => "main_group",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Applied,
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepResult {
    pub step: StepKind,
    pub status: StepStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl StepResult {
    pub fn applied(step: StepKind) -> Self {
        Self {
            step,
            status: StepStatus::Applied,
            message: None,
        }
    }

    pub fn skipped(step: StepKind, message: impl Into<String>) -> Self {
        Self {
            step,
            status: StepStatus::Skipped,
            message: Some(message.into()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchSummary {
    pub applied: u64,
    pub skipped: u64,
}
