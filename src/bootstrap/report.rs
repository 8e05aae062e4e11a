//! What a bootstrap run did, stage by stage.

use serde::Serialize;
use std::fmt;

use crate::detection::PlatformKind;

/// The four provisioning stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Runtime,
    PackageManager,
    Dependencies,
    MediaTool,
}

impl Stage {
    /// Every stage, in the order the sequencer runs them.
    pub const ALL: [Stage; 4] = [
        Stage::Runtime,
        Stage::PackageManager,
        Stage::Dependencies,
        Stage::MediaTool,
    ];

    /// Human-readable stage name.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Runtime => "Python runtime",
            Self::PackageManager => "Package manager (uv)",
            Self::Dependencies => "Project dependencies",
            Self::MediaTool => "FFmpeg",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// How a stage ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StageStatus {
    /// Nothing to do.
    AlreadyPresent { version: Option<String> },
    /// Installed during this run.
    Installed { via: String },
    /// `uv sync` completed.
    Synced,
    /// The user said no to an optional install.
    Declined,
    /// Left for the application to handle later.
    Deferred { reason: String },
    /// Not attempted.
    Skipped { reason: String },
}

impl StageStatus {
    /// Short description for summaries.
    pub fn describe(&self) -> String {
        match self {
            Self::AlreadyPresent { version: Some(v) } => format!("present ({})", v),
            Self::AlreadyPresent { version: None } => "present".to_string(),
            Self::Installed { via } => format!("installed via {}", via),
            Self::Synced => "synced".to_string(),
            Self::Declined => "declined".to_string(),
            Self::Deferred { reason } => format!("deferred: {}", reason),
            Self::Skipped { reason } => format!("skipped: {}", reason),
        }
    }

    /// Whether the stage changed the machine.
    pub fn made_changes(&self) -> bool {
        matches!(self, Self::Installed { .. } | Self::Synced)
    }
}

/// A stage and how it ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageReport {
    pub stage: Stage,
    #[serde(flatten)]
    pub status: StageStatus,
}

/// Whether the whole run finished.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    /// Every stage ran.
    Completed,
    /// Stopped on purpose: a fresh terminal is needed to see new installs.
    RestartRequired { reason: String },
}

/// Summary of a bootstrap run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BootstrapReport {
    pub platform: PlatformKind,
    pub stages: Vec<StageReport>,
    #[serde(flatten)]
    pub outcome: Outcome,
}

impl BootstrapReport {
    /// An empty, completed report.
    pub fn new(platform: PlatformKind) -> Self {
        Self {
            platform,
            stages: Vec::new(),
            outcome: Outcome::Completed,
        }
    }

    /// Record a finished stage.
    pub fn record(&mut self, stage: Stage, status: StageStatus) {
        self.stages.push(StageReport { stage, status });
    }

    /// Status of a stage, if it ran.
    pub fn status_of(&self, stage: Stage) -> Option<&StageStatus> {
        self.stages
            .iter()
            .find(|r| r.stage == stage)
            .map(|r| &r.status)
    }

    pub fn is_completed(&self) -> bool {
        matches!(self.outcome, Outcome::Completed)
    }

    /// Whether any stage installed or synced something.
    pub fn made_changes(&self) -> bool {
        self.stages.iter().any(|r| r.status.made_changes())
    }
}

/// What the sequencer should do after a stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageFlow {
    /// Record the status and move on.
    Continue(StageStatus),
    /// Record the status and stop with a restart request.
    Restart { status: StageStatus, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn stages_run_in_fixed_order() {
        assert_eq!(Stage::ALL[0], Stage::Runtime);
        assert_eq!(Stage::ALL[3], Stage::MediaTool);
        assert_eq!(Stage::PackageManager.to_string(), "Package manager (uv)");
    }

    #[test]
    fn describe_statuses() {
        assert_eq!(
            StageStatus::AlreadyPresent {
                version: Some("3.12.3".into())
            }
            .describe(),
            "present (3.12.3)"
        );
        assert_eq!(
            StageStatus::Installed { via: "apt".into() }.describe(),
            "installed via apt"
        );
        assert_eq!(StageStatus::Declined.describe(), "declined");
    }

    #[test]
    fn report_tracks_changes_and_lookup() {
        let mut report = BootstrapReport::new(PlatformKind::Linux);
        report.record(
            Stage::Runtime,
            StageStatus::AlreadyPresent { version: None },
        );
        assert!(!report.made_changes());

        report.record(Stage::Dependencies, StageStatus::Synced);
        assert!(report.made_changes());
        assert_eq!(
            report.status_of(Stage::Dependencies),
            Some(&StageStatus::Synced)
        );
        assert!(report.status_of(Stage::MediaTool).is_none());
        assert!(report.is_completed());
    }

    #[test]
    fn serializes_flat_json() {
        let mut report = BootstrapReport::new(PlatformKind::Windows);
        report.record(
            Stage::PackageManager,
            StageStatus::Installed {
                via: "install script".into(),
            },
        );
        report.outcome = Outcome::RestartRequired {
            reason: "open a new terminal".into(),
        };

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(
            value,
            json!({
                "platform": "windows",
                "stages": [
                    {"stage": "package_manager", "status": "installed", "via": "install script"}
                ],
                "outcome": "restart_required",
                "reason": "open a new terminal"
            })
        );
    }
}
