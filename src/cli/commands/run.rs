//! Run command implementation.
//!
//! The `ytdl-bootstrap run` command installs whatever is missing and
//! optionally launches the application.

use std::path::{Path, PathBuf};

use crate::bootstrap::{launch_app, BootstrapReport, Outcome, Sequencer};
use crate::cli::args::RunArgs;
use crate::config::{BootstrapConfig, MediaAnswer, RestartPolicy};
use crate::error::Result;
use crate::host::Host;
use crate::media::ArchiveSource;
use crate::ui::{Table, UserInterface};

use super::dispatcher::{Command, CommandResult};

/// The run command implementation.
pub struct RunCommand<'a> {
    host: &'a dyn Host,
    project_root: PathBuf,
    args: RunArgs,
}

impl<'a> RunCommand<'a> {
    /// Create a new run command.
    pub fn new(host: &'a dyn Host, project_root: &Path, args: RunArgs) -> Self {
        Self {
            host,
            project_root: project_root.to_path_buf(),
            args,
        }
    }

    /// Resolve flags and environment into a run configuration.
    pub fn build_config(&self) -> Result<BootstrapConfig> {
        let mut config = BootstrapConfig::new(&self.project_root);
        if let Some(dir) = &self.args.bin_dir {
            config = config.with_bin_dir(dir);
        }

        config.media_answer = if self.args.yes {
            MediaAnswer::Yes
        } else if self.args.no_media {
            MediaAnswer::No
        } else {
            MediaAnswer::Ask
        };
        if self.args.restart_after_install {
            config.restart_policy = RestartPolicy::Always;
        }
        config.launch = self.args.launch;

        match (&self.args.ffmpeg_url, &self.args.ffmpeg_sha256) {
            (Some(url), sha256) => {
                config.media_archive = Some(ArchiveSource::from_url(url, sha256.as_deref())?);
            }
            (None, Some(_)) => {
                tracing::warn!("Ignoring --ffmpeg-sha256 without --ffmpeg-url");
            }
            (None, None) => {}
        }

        Ok(config)
    }
}

fn summary_table(report: &BootstrapReport) -> Table {
    let mut table = Table::new(&["Stage", "Result"]);
    for entry in &report.stages {
        table.push_row(&[entry.stage.title().to_string(), entry.status.describe()]);
    }
    table
}

impl Command for RunCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config = self.build_config()?;
        tracing::debug!("Resolved config: {:?}", config);

        let sequencer = Sequencer::new(self.host, config)?;
        let report = sequencer.run(ui)?;

        if ui.output_mode().shows_status() {
            ui.message("");
            ui.message(&summary_table(&report).render());
        }

        match &report.outcome {
            Outcome::RestartRequired { .. } => Ok(CommandResult::success()),
            Outcome::Completed if sequencer.config().launch => {
                let code = launch_app(self.host, sequencer.config())?;
                Ok(CommandResult::from_exit_code(code))
            }
            Outcome::Completed => {
                ui.show_hint("Start the app with `uv run python src/main.py`, or rerun with --launch.");
                Ok(CommandResult::success())
            }
        }
    }
}
