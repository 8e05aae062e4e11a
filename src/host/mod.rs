//! The machine being provisioned.
//!
//! Every bootstrap stage talks to the operating system through the [`Host`]
//! trait: version probes, install commands, PATH edits. Production code uses
//! [`SystemHost`]; tests use [`MockHost`], which simulates installed tools and
//! records every command instead of running it.
//!
//! # Example
//!
//! ```
//! use ytdl_bootstrap::detection::PlatformKind;
//! use ytdl_bootstrap::host::{Host, MockHost};
//!
//! let host = MockHost::new(PlatformKind::Linux).with_tool("uv", "uv 0.5.11");
//! assert!(host.query("uv", &["--version"]).is_some());
//! assert!(host.query("python3", &["--version"]).is_none());
//! ```

pub mod mock;
pub mod system;

pub use mock::MockHost;
pub use system::SystemHost;

use std::path::{Path, PathBuf};

use crate::detection::PlatformKind;
use crate::error::Result;
use crate::shell::CommandResult;

/// Side effects the bootstrap needs from the machine.
pub trait Host {
    /// The platform detected at startup.
    fn platform(&self) -> PlatformKind;

    /// Run a program directly and capture its output.
    ///
    /// Returns `None` when the program cannot be started (not installed).
    fn query(&self, program: &str, args: &[&str]) -> Option<CommandResult>;

    /// Run a command line through the platform shell.
    ///
    /// Errors only when the shell itself cannot be spawned; a non-zero exit
    /// is reported through [`CommandResult::success`].
    fn run(&self, command: &str, cwd: Option<&Path>) -> Result<CommandResult>;

    /// Run a command line with the terminal attached, regardless of verbosity.
    fn run_attached(&self, command: &str, cwd: Option<&Path>) -> Result<CommandResult>;

    /// Whether a file exists at a system location.
    fn is_file(&self, path: &Path) -> bool;

    /// Prepend a directory to the PATH seen by this process and its children.
    fn prepend_path(&self, dir: &Path);

    /// Whether the process already has root/administrator rights.
    fn is_elevated(&self) -> bool;

    /// The user's home directory.
    fn home_dir(&self) -> Option<PathBuf>;

    /// Read an environment variable.
    fn env_var(&self, key: &str) -> Option<String>;
}
