//! Runs the four stages in order.

use super::report::{BootstrapReport, Outcome, Stage, StageFlow};
use super::{media, package_manager, runtime, sync, StageContext};
use crate::config::BootstrapConfig;
use crate::error::Result;
use crate::fetch::HttpFetcher;
use crate::host::Host;
use crate::ui::UserInterface;

/// Drives a bootstrap run against a host.
pub struct Sequencer<'a> {
    host: &'a dyn Host,
    config: BootstrapConfig,
    fetcher: HttpFetcher,
}

impl<'a> Sequencer<'a> {
    pub fn new(host: &'a dyn Host, config: BootstrapConfig) -> Result<Self> {
        let fetcher = HttpFetcher::new()?;
        Ok(Self {
            host,
            config,
            fetcher,
        })
    }

    pub fn config(&self) -> &BootstrapConfig {
        &self.config
    }

    /// Run every stage, stopping at the first error or restart request.
    pub fn run(&self, ui: &mut dyn UserInterface) -> Result<BootstrapReport> {
        let platform = self.host.platform();
        tracing::info!(
            "Bootstrapping {} on {}",
            self.config.project_dir.display(),
            platform
        );
        ui.show_header(&format!("Preparing ytdl on {}", platform));

        let ctx = StageContext {
            host: self.host,
            config: &self.config,
            fetcher: &self.fetcher,
        };
        let mut report = BootstrapReport::new(platform);
        let total = Stage::ALL.len();

        for (index, stage) in Stage::ALL.into_iter().enumerate() {
            ui.show_stage(index + 1, total, stage.title());
            let flow = match stage {
                Stage::Runtime => runtime::ensure_runtime(&ctx, ui),
                Stage::PackageManager => package_manager::ensure_package_manager(&ctx, ui),
                Stage::Dependencies => sync::sync_dependencies(&ctx, ui),
                Stage::MediaTool => media::ensure_media_tool(&ctx, ui),
            }
            .inspect_err(|e| tracing::error!("{} failed: {}", stage, e))?;

            match flow {
                StageFlow::Continue(status) => {
                    tracing::debug!("{}: {}", stage, status.describe());
                    report.record(stage, status);
                }
                StageFlow::Restart { status, reason } => {
                    tracing::info!("{}: restart required ({})", stage, reason);
                    report.record(stage, status);
                    ui.warning(&reason);
                    ui.show_hint("Open a new terminal and run ytdl-bootstrap again to finish setup.");
                    report.outcome = Outcome::RestartRequired { reason };
                    return Ok(report);
                }
            }
        }

        ui.success("Everything is ready");
        Ok(report)
    }
}
