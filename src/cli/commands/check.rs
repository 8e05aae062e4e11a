//! Check command implementation.
//!
//! The `ytdl-bootstrap check` command reports what is installed without
//! changing anything.

use std::path::{Path, PathBuf};

use crate::bootstrap::probe_all;
use crate::cli::args::CheckArgs;
use crate::config::BootstrapConfig;
use crate::error::{BootstrapError, Result};
use crate::host::Host;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The check command implementation.
pub struct CheckCommand<'a> {
    host: &'a dyn Host,
    project_root: PathBuf,
    args: CheckArgs,
}

impl<'a> CheckCommand<'a> {
    /// Create a new check command.
    pub fn new(host: &'a dyn Host, project_root: &Path, args: CheckArgs) -> Self {
        Self {
            host,
            project_root: project_root.to_path_buf(),
            args,
        }
    }
}

impl Command for CheckCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let mut config = BootstrapConfig::new(&self.project_root);
        if let Some(dir) = &self.args.bin_dir {
            config = config.with_bin_dir(dir);
        }

        let report = probe_all(self.host, &config);
        let result = if report.ready {
            CommandResult::success()
        } else {
            CommandResult::failure(1)
        };

        if self.args.json {
            let json =
                serde_json::to_string_pretty(&report).map_err(|e| BootstrapError::Other(e.into()))?;
            println!("{}", json);
            return Ok(result);
        }

        ui.show_header(&format!("ytdl-bootstrap on {}", report.platform));
        ui.message(&report.to_table().render());
        ui.message("");
        if report.ready {
            ui.success("Ready to run");
        } else {
            ui.warning("Python or uv is missing");
            ui.show_hint("Run `ytdl-bootstrap` to install what is missing.");
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::PlatformKind;
    use crate::host::MockHost;
    use crate::ui::MockUI;
    use tempfile::TempDir;

    #[test]
    fn ready_machine_exits_zero() {
        let temp = TempDir::new().unwrap();
        let host = MockHost::new(PlatformKind::Linux)
            .with_tool("python3", "Python 3.12.3")
            .with_tool("uv", "uv 0.5.11");
        let cmd = CheckCommand::new(&host, temp.path(), CheckArgs::default());
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();
        assert!(result.success);
        assert!(ui.has_success("Ready"));
        assert!(ui.has_message("3.12.3"));
        assert!(host.commands().is_empty());
    }

    #[test]
    fn missing_uv_exits_one() {
        let temp = TempDir::new().unwrap();
        let host = MockHost::new(PlatformKind::MacOs).with_tool("python3", "Python 3.13.1");
        let cmd = CheckCommand::new(&host, temp.path(), CheckArgs::default());
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();
        assert_eq!(result.exit_code, 1);
        assert!(ui.has_warning("missing"));
        assert!(ui.has_hint("ytdl-bootstrap"));
    }
}
