//! The bootstrap sequencer and its stages.
//!
//! Stages run in a fixed order and each one is gated on the previous:
//!
//! 1. [`runtime`]: Python 3
//! 2. [`package_manager`]: `uv`
//! 3. [`sync`]: `uv sync` against the project manifest
//! 4. [`media`]: `ffmpeg` and `ffprobe`, opt-in
//!
//! A stage either continues, stops the run with a restart request, or
//! fails. Only a failed FFmpeg download is absorbed; every other error
//! ends the run.

pub mod launch;
pub mod media;
pub mod package_manager;
pub mod report;
pub mod runtime;
pub mod sequencer;
pub mod status;
pub mod sync;

pub use launch::launch_app;
pub use report::{BootstrapReport, Outcome, Stage, StageFlow, StageReport, StageStatus};
pub use sequencer::Sequencer;
pub use status::{probe_all, StatusReport, ToolStatus};

use crate::config::BootstrapConfig;
use crate::detection::{Candidate, PlatformKind};
use crate::error::BootstrapError;
use crate::fetch::HttpFetcher;
use crate::host::Host;
use crate::shell::CommandResult;

/// Everything a stage needs besides the UI.
pub struct StageContext<'a> {
    pub host: &'a dyn Host,
    pub config: &'a BootstrapConfig,
    pub fetcher: &'a HttpFetcher,
}

impl StageContext<'_> {
    pub fn platform(&self) -> PlatformKind {
        self.host.platform()
    }
}

/// Summarize a failed command for an error message.
///
/// Uses the last non-empty stderr line, which is where installers usually
/// put the reason.
pub(crate) fn failure_detail(command: &str, result: &CommandResult) -> String {
    let last_line = result
        .stderr
        .lines()
        .rev()
        .map(str::trim)
        .find(|line| !line.is_empty());

    match last_line {
        Some(line) => format!("`{}` {}: {}", command, result.describe_exit(), line),
        None => format!("`{}` {}", command, result.describe_exit()),
    }
}

/// Error for a tool no candidate installer can provide.
pub(crate) fn unsupported<C: Candidate>(
    tool: &str,
    platform: PlatformKind,
    tried: &[C],
) -> BootstrapError {
    let message = if tried.is_empty() {
        "automatic installs are not supported here".to_string()
    } else {
        let names: Vec<String> = tried.iter().map(Candidate::label).collect();
        format!("no supported installer found (tried {})", names.join(", "))
    };
    BootstrapError::UnsupportedPlatformTooling {
        tool: tool.to_string(),
        platform: platform.to_string(),
        message,
    }
}
