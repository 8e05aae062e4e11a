//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, Commands, RunArgs};
use crate::error::Result;
use crate::host::Host;
use crate::ui::UserInterface;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ui` - User interface for displaying output and prompts
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }

    /// Pass through a child process exit code.
    pub fn from_exit_code(exit_code: i32) -> Self {
        Self {
            success: exit_code == 0,
            exit_code,
        }
    }

    /// Exit status for this process.
    ///
    /// Codes outside `0..=255` cannot be reported faithfully, so any
    /// non-zero code that does not fit becomes 1.
    pub fn process_exit_code(&self) -> u8 {
        match u8::try_from(self.exit_code) {
            Ok(code) => code,
            Err(_) => 1,
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher<'a> {
    project_root: PathBuf,
    host: &'a dyn Host,
}

impl<'a> CommandDispatcher<'a> {
    /// Create a new dispatcher for the given project root.
    pub fn new(project_root: PathBuf, host: &'a dyn Host) -> Self {
        Self { project_root, host }
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Dispatch and execute a command.
    ///
    /// Routes the CLI subcommand to the appropriate command implementation
    /// and executes it.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match &cli.command {
            Some(Commands::Run(args)) => {
                let cmd = super::run::RunCommand::new(self.host, &self.project_root, args.clone());
                cmd.execute(ui)
            }
            Some(Commands::Check(args)) => {
                let cmd =
                    super::check::CheckCommand::new(self.host, &self.project_root, args.clone());
                cmd.execute(ui)
            }
            Some(Commands::Completions(args)) => {
                let cmd = super::completions::CompletionsCommand::new(args.clone());
                cmd.execute(ui)
            }
            None => {
                // Zero-argument entry point
                let cmd =
                    super::run::RunCommand::new(self.host, &self.project_root, RunArgs::default());
                cmd.execute(ui)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::PlatformKind;
    use crate::host::MockHost;
    use crate::ui::MockUI;
    use clap::Parser;
    use tempfile::TempDir;

    #[test]
    fn command_result_success() {
        let result = CommandResult::success();
        assert!(result.success);
        assert_eq!(result.exit_code, 0);
    }

    #[test]
    fn command_result_failure() {
        let result = CommandResult::failure(1);
        assert!(!result.success);
        assert_eq!(result.exit_code, 1);
    }

    #[test]
    fn child_exit_code_passes_through() {
        assert!(CommandResult::from_exit_code(0).success);
        assert_eq!(CommandResult::from_exit_code(3).exit_code, 3);
    }

    #[test]
    fn out_of_range_exit_codes_stay_failures() {
        assert_eq!(CommandResult::success().process_exit_code(), 0);
        assert_eq!(CommandResult::from_exit_code(42).process_exit_code(), 42);
        assert_eq!(CommandResult::from_exit_code(255).process_exit_code(), 255);
        assert_eq!(CommandResult::from_exit_code(256).process_exit_code(), 1);
        assert_eq!(CommandResult::from_exit_code(512).process_exit_code(), 1);
        assert_eq!(CommandResult::from_exit_code(-1).process_exit_code(), 1);
        assert_eq!(
            CommandResult::from_exit_code(-1073741510).process_exit_code(),
            1
        );
    }

    #[test]
    fn dispatcher_creation() {
        let host = MockHost::new(PlatformKind::Linux);
        let dispatcher = CommandDispatcher::new(PathBuf::from("/test"), &host);
        assert_eq!(dispatcher.project_root(), Path::new("/test"));
    }

    #[test]
    fn no_subcommand_runs_bootstrap() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("pyproject.toml"), "").unwrap();
        let host = MockHost::new(PlatformKind::Linux)
            .with_tool("python3", "Python 3.12.3")
            .with_tool("uv", "uv 0.5.11")
            .with_tool("ffmpeg", "ffmpeg version 6.1.1");
        let dispatcher = CommandDispatcher::new(temp.path().to_path_buf(), &host);
        let cli = Cli::try_parse_from(["ytdl-bootstrap"]).unwrap();
        let mut ui = MockUI::new();

        let result = dispatcher.dispatch(&cli, &mut ui).unwrap();
        assert!(result.success);
        assert_eq!(host.commands(), vec!["uv sync"]);
    }
}
