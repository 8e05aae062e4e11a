//! Read-only probe of every stage's tool.

use serde::Serialize;

use super::package_manager::probe_uv;
use super::report::Stage;
use super::runtime::probe_runtime;
use crate::config::BootstrapConfig;
use crate::detection::{PlatformKind, ToolAvailability};
use crate::host::Host;
use crate::media::find_media_tool;
use crate::ui::Table;

/// Availability of one stage's tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolStatus {
    pub stage: Stage,
    #[serde(flatten)]
    pub availability: ToolAvailability,
}

/// Snapshot of the machine, without installing anything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    pub platform: PlatformKind,
    pub ready: bool,
    pub tools: Vec<ToolStatus>,
    pub config: BootstrapConfig,
}

impl StatusReport {
    pub fn status_of(&self, stage: Stage) -> Option<&ToolAvailability> {
        self.tools
            .iter()
            .find(|t| t.stage == stage)
            .map(|t| &t.availability)
    }

    /// Render as an aligned table.
    pub fn to_table(&self) -> Table {
        let mut table = Table::new(&["Stage", "Tool", "Status"]);
        for tool in &self.tools {
            table.push_row(&[
                tool.stage.title(),
                tool.availability.tool_name.as_str(),
                tool.availability.describe().as_str(),
            ]);
        }
        table
    }
}

/// Probe every stage.
///
/// The machine counts as ready when Python and uv are both present; the
/// manifest and FFmpeg are reported but do not affect readiness.
pub fn probe_all(host: &dyn Host, config: &BootstrapConfig) -> StatusReport {
    let manifest_path = config.manifest_path();
    let manifest = if manifest_path.is_file() {
        ToolAvailability::at_path("pyproject.toml", &manifest_path)
    } else {
        ToolAvailability::missing("pyproject.toml")
    };

    let tools = vec![
        ToolStatus {
            stage: Stage::Runtime,
            availability: probe_runtime(host),
        },
        ToolStatus {
            stage: Stage::PackageManager,
            availability: probe_uv(host),
        },
        ToolStatus {
            stage: Stage::Dependencies,
            availability: manifest,
        },
        ToolStatus {
            stage: Stage::MediaTool,
            availability: find_media_tool(host, &config.bin_dir).availability,
        },
    ];

    let ready = tools[0].availability.found && tools[1].availability.found;
    StatusReport {
        platform: host.platform(),
        ready,
        tools,
        config: config.clone(),
    }
}
