//! Mock host for testing.
//!
//! `MockHost` implements the [`Host`] trait without touching the machine.
//! Tools are declared up front with their version output; commands are
//! recorded, and can be configured to fail or to "install" a tool so that
//! later probes find it.
//!
//! # Example
//!
//! ```
//! use ytdl_bootstrap::detection::PlatformKind;
//! use ytdl_bootstrap::host::{Host, MockHost};
//!
//! let host = MockHost::new(PlatformKind::Linux)
//!     .with_tool("apt-get", "apt 2.7.14 (amd64)")
//!     .with_install_effect("install -y python3", "python3", "Python 3.12.3");
//!
//! assert!(host.query("python3", &["--version"]).is_none());
//! host.run("sudo apt-get install -y python3", None).unwrap();
//! assert!(host.query("python3", &["--version"]).is_some());
//! assert!(host.ran("apt-get install"));
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::detection::PlatformKind;
use crate::error::Result;
use crate::shell::CommandResult;

use super::Host;

/// A simulated tool install triggered by a matching command.
#[derive(Debug, Clone)]
struct InstallEffect {
    command_fragment: String,
    program: String,
    version_output: String,
}

/// Mock host implementation for testing.
#[derive(Debug)]
pub struct MockHost {
    platform: PlatformKind,
    tools: RefCell<HashMap<String, String>>,
    effects: Vec<InstallEffect>,
    failing: Vec<String>,
    files: Vec<PathBuf>,
    commands: RefCell<Vec<String>>,
    command_dirs: RefCell<Vec<Option<PathBuf>>>,
    path_prepends: RefCell<Vec<PathBuf>>,
    elevated: bool,
    home: Option<PathBuf>,
    env: HashMap<String, String>,
}

impl MockHost {
    /// Create a mock host with no tools installed.
    pub fn new(platform: PlatformKind) -> Self {
        Self {
            platform,
            tools: RefCell::new(HashMap::new()),
            effects: Vec::new(),
            failing: Vec::new(),
            files: Vec::new(),
            commands: RefCell::new(Vec::new()),
            command_dirs: RefCell::new(Vec::new()),
            path_prepends: RefCell::new(Vec::new()),
            elevated: false,
            home: None,
            env: HashMap::new(),
        }
    }

    /// Declare a tool as installed, answering version queries with `version_output`.
    pub fn with_tool(self, program: &str, version_output: &str) -> Self {
        self.tools
            .borrow_mut()
            .insert(program.to_string(), version_output.to_string());
        self
    }

    /// Make any command containing `command_fragment` install `program`.
    pub fn with_install_effect(
        mut self,
        command_fragment: &str,
        program: &str,
        version_output: &str,
    ) -> Self {
        self.effects.push(InstallEffect {
            command_fragment: command_fragment.to_string(),
            program: program.to_string(),
            version_output: version_output.to_string(),
        });
        self
    }

    /// Make any command containing `command_fragment` exit with code 1.
    pub fn with_failing_command(mut self, command_fragment: &str) -> Self {
        self.failing.push(command_fragment.to_string());
        self
    }

    /// Declare a file as present at a system location.
    ///
    /// Only declared files are visible through [`Host::is_file`]; the real
    /// filesystem is never consulted.
    pub fn with_file(mut self, path: &Path) -> Self {
        self.files.push(path.to_path_buf());
        self
    }

    /// Pretend to run with root/administrator rights.
    pub fn with_elevated(mut self, elevated: bool) -> Self {
        self.elevated = elevated;
        self
    }

    /// Set the home directory reported to callers.
    pub fn with_home(mut self, home: &Path) -> Self {
        self.home = Some(home.to_path_buf());
        self
    }

    /// Set an environment variable visible through [`Host::env_var`].
    pub fn with_env(mut self, key: &str, value: &str) -> Self {
        self.env.insert(key.to_string(), value.to_string());
        self
    }

    /// All commands run so far, in order.
    pub fn commands(&self) -> Vec<String> {
        self.commands.borrow().clone()
    }

    /// Working directories of the commands run so far, in order.
    pub fn command_dirs(&self) -> Vec<Option<PathBuf>> {
        self.command_dirs.borrow().clone()
    }

    /// Check if any command containing `fragment` was run.
    pub fn ran(&self, fragment: &str) -> bool {
        self.commands.borrow().iter().any(|c| c.contains(fragment))
    }

    /// Directories prepended to PATH so far.
    pub fn path_prepends(&self) -> Vec<PathBuf> {
        self.path_prepends.borrow().clone()
    }
}

impl Host for MockHost {
    fn platform(&self) -> PlatformKind {
        self.platform
    }

    fn query(&self, program: &str, _args: &[&str]) -> Option<CommandResult> {
        self.tools
            .borrow()
            .get(program)
            .map(|output| CommandResult::success(output.clone(), String::new(), Duration::ZERO))
    }

    fn run(&self, command: &str, cwd: Option<&Path>) -> Result<CommandResult> {
        self.commands.borrow_mut().push(command.to_string());
        self.command_dirs
            .borrow_mut()
            .push(cwd.map(Path::to_path_buf));

        if self.failing.iter().any(|f| command.contains(f.as_str())) {
            return Ok(CommandResult::failure(
                Some(1),
                String::new(),
                format!("mock failure: {}", command),
                Duration::ZERO,
            ));
        }

        for effect in &self.effects {
            if command.contains(effect.command_fragment.as_str()) {
                self.tools
                    .borrow_mut()
                    .insert(effect.program.clone(), effect.version_output.clone());
            }
        }

        Ok(CommandResult::success(
            String::new(),
            String::new(),
            Duration::ZERO,
        ))
    }

    fn run_attached(&self, command: &str, cwd: Option<&Path>) -> Result<CommandResult> {
        self.run(command, cwd)
    }

    fn is_file(&self, path: &Path) -> bool {
        self.files.iter().any(|f| f == path)
    }

    fn prepend_path(&self, dir: &Path) {
        self.path_prepends.borrow_mut().push(dir.to_path_buf());
    }

    fn is_elevated(&self) -> bool {
        self.elevated
    }

    fn home_dir(&self) -> Option<PathBuf> {
        self.home.clone()
    }

    fn env_var(&self, key: &str) -> Option<String> {
        self.env.get(key).cloned()
    }
}
