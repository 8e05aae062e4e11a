//! The real machine.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::defaults::VERSION_QUERY_TIMEOUT;
use crate::detection::PlatformKind;
use crate::error::Result;
use crate::shell::{self, CommandOptions, CommandResult};

use super::Host;

/// [`Host`] backed by real processes and the real environment.
#[derive(Debug, Clone)]
pub struct SystemHost {
    platform: PlatformKind,
    show_output: bool,
    query_timeout: Duration,
}

impl SystemHost {
    /// Create a host for the current platform.
    ///
    /// With `show_output`, install commands write straight to the terminal;
    /// otherwise their output is captured and only surfaced on failure.
    pub fn new(show_output: bool) -> Self {
        Self {
            platform: PlatformKind::detect(),
            show_output,
            query_timeout: VERSION_QUERY_TIMEOUT,
        }
    }
}

impl Host for SystemHost {
    fn platform(&self) -> PlatformKind {
        self.platform
    }

    fn query(&self, program: &str, args: &[&str]) -> Option<CommandResult> {
        shell::probe_program(program, args, self.query_timeout)
    }

    fn run(&self, command: &str, cwd: Option<&Path>) -> Result<CommandResult> {
        let options = CommandOptions {
            cwd: cwd.map(Path::to_path_buf),
            capture_stdout: !self.show_output,
            capture_stderr: !self.show_output,
            ..Default::default()
        };
        shell::execute(command, &options)
    }

    fn run_attached(&self, command: &str, cwd: Option<&Path>) -> Result<CommandResult> {
        let options = CommandOptions {
            cwd: cwd.map(Path::to_path_buf),
            ..Default::default()
        };
        shell::execute(command, &options)
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn prepend_path(&self, dir: &Path) {
        shell::prepend_to_path(dir);
    }

    fn is_elevated(&self) -> bool {
        shell::is_elevated()
    }

    fn home_dir(&self) -> Option<PathBuf> {
        dirs::home_dir()
    }

    fn env_var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok().filter(|v| !v.is_empty())
    }
}
