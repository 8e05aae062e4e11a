//! Shell command execution.

use crate::error::{BootstrapError, Result};
use std::collections::HashMap;
use std::io::Read;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

/// How often a timed probe checks whether its child has exited.
const PROBE_POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Result of executing a shell command.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal or timed out).
    pub exit_code: Option<i32>,

    /// Standard output.
    pub stdout: String,

    /// Standard error.
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether command succeeded (exit code 0).
    pub success: bool,
}

impl CommandResult {
    /// Create a success result.
    pub fn success(stdout: String, stderr: String, duration: Duration) -> Self {
        Self {
            exit_code: Some(0),
            stdout,
            stderr,
            duration,
            success: true,
        }
    }

    /// Create a failure result.
    pub fn failure(
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
        duration: Duration,
    ) -> Self {
        Self {
            exit_code,
            stdout,
            stderr,
            duration,
            success: false,
        }
    }

    /// Describe the exit for diagnostics ("exited with code 2", "was terminated").
    pub fn describe_exit(&self) -> String {
        match self.exit_code {
            Some(code) => format!("exited with code {}", code),
            None => "was terminated before finishing".to_string(),
        }
    }
}

/// Options for command execution.
#[derive(Debug, Clone, Default)]
pub struct CommandOptions {
    /// Working directory.
    pub cwd: Option<PathBuf>,

    /// Environment variables (merged with system env).
    pub env: HashMap<String, String>,

    /// Capture stdout (if false, inherits from parent).
    pub capture_stdout: bool,

    /// Capture stderr (if false, inherits from parent).
    pub capture_stderr: bool,
}

/// Execute a command line through the platform shell.
///
/// Pipelines such as `curl -LsSf <url> | sh` are passed through verbatim,
/// so the command must be written for `sh` on Unix and `cmd.exe` on Windows.
pub fn execute(command: &str, options: &CommandOptions) -> Result<CommandResult> {
    let start = Instant::now();

    let (shell, flag) = shell_invocation();
    let mut cmd = Command::new(&shell);
    cmd.arg(flag);
    cmd.arg(command);

    if let Some(cwd) = &options.cwd {
        cmd.current_dir(cwd);
    }

    for (key, value) in &options.env {
        cmd.env(key, value);
    }

    // `sudo` and interactive installers may need to read from the terminal.
    cmd.stdin(Stdio::inherit());

    if options.capture_stdout {
        cmd.stdout(Stdio::piped());
    } else {
        cmd.stdout(Stdio::inherit());
    }

    if options.capture_stderr {
        cmd.stderr(Stdio::piped());
    } else {
        cmd.stderr(Stdio::inherit());
    }

    tracing::debug!("Executing `{}` via {}", command, shell);

    let output = cmd.output().map_err(|_| BootstrapError::CommandFailed {
        command: command.to_string(),
        code: None,
    })?;

    let duration = start.elapsed();

    let stdout = if options.capture_stdout {
        String::from_utf8_lossy(&output.stdout).to_string()
    } else {
        String::new()
    };

    let stderr = if options.capture_stderr {
        String::from_utf8_lossy(&output.stderr).to_string()
    } else {
        String::new()
    };

    if output.status.success() {
        Ok(CommandResult::success(stdout, stderr, duration))
    } else {
        Ok(CommandResult::failure(
            output.status.code(),
            stdout,
            stderr,
            duration,
        ))
    }
}

/// Run a program directly (no shell) with a deadline, capturing its output.
///
/// Used for version queries like `ffmpeg -version`. Returns `None` when the
/// program cannot be spawned at all (usually: not on PATH). A probe that
/// outlives `timeout` is killed and reported as a failure without exit code.
pub fn probe_program(program: &str, args: &[&str], timeout: Duration) -> Option<CommandResult> {
    let start = Instant::now();

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .ok()?;

    let mut stdout_pipe = child.stdout.take()?;
    let mut stderr_pipe = child.stderr.take()?;

    // Drain pipes on helper threads so a chatty child can't block on a full pipe.
    let stdout_handle = thread::spawn(move || {
        let mut buf = String::new();
        let _ = stdout_pipe.read_to_string(&mut buf);
        buf
    });
    let stderr_handle = thread::spawn(move || {
        let mut buf = String::new();
        let _ = stderr_pipe.read_to_string(&mut buf);
        buf
    });

    let status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break Some(status),
            Ok(None) if start.elapsed() >= timeout => {
                tracing::warn!("`{}` did not answer within {:?}", program, timeout);
                let _ = child.kill();
                let _ = child.wait();
                break None;
            }
            Ok(None) => thread::sleep(PROBE_POLL_INTERVAL),
            Err(_) => break None,
        }
    };

    let stdout = stdout_handle.join().unwrap_or_default();
    let stderr = stderr_handle.join().unwrap_or_default();
    let duration = start.elapsed();

    match status {
        Some(status) if status.success() => Some(CommandResult::success(stdout, stderr, duration)),
        Some(status) => Some(CommandResult::failure(
            status.code(),
            stdout,
            stderr,
            duration,
        )),
        None => Some(CommandResult::failure(None, stdout, stderr, duration)),
    }
}

/// Shell executable and the flag that passes it a command string.
///
/// Always `/bin/sh -c` on Unix rather than `$SHELL`: install pipelines are
/// POSIX sh and must not be interpreted by fish or nushell.
fn shell_invocation() -> (String, &'static str) {
    if cfg!(target_os = "windows") {
        (
            std::env::var("COMSPEC").unwrap_or_else(|_| "cmd.exe".to_string()),
            "/C",
        )
    } else {
        ("/bin/sh".to_string(), "-c")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn quiet(command: &str, cwd: Option<&Path>) -> Result<CommandResult> {
        let options = CommandOptions {
            cwd: cwd.map(Path::to_path_buf),
            capture_stdout: true,
            capture_stderr: true,
            ..Default::default()
        };
        execute(command, &options)
    }

    #[test]
    fn execute_successful_command() {
        let options = CommandOptions {
            capture_stdout: true,
            capture_stderr: true,
            ..Default::default()
        };

        let result = execute("echo hello", &options).unwrap();

        assert!(result.success);
        assert_eq!(result.exit_code, Some(0));
        assert!(result.stdout.contains("hello"));
    }

    #[test]
    fn execute_failing_command() {
        let options = CommandOptions {
            capture_stdout: true,
            capture_stderr: true,
            ..Default::default()
        };

        let result = execute("exit 3", &options).unwrap();

        assert!(!result.success);
        assert_eq!(result.exit_code, Some(3));
        assert_eq!(result.describe_exit(), "exited with code 3");
    }

    #[test]
    fn execute_with_env() {
        let mut options = CommandOptions {
            capture_stdout: true,
            capture_stderr: true,
            ..Default::default()
        };
        options
            .env
            .insert("MY_VAR".to_string(), "my_value".to_string());

        let cmd = if cfg!(target_os = "windows") {
            "echo %MY_VAR%"
        } else {
            "echo $MY_VAR"
        };

        let result = execute(cmd, &options).unwrap();

        assert!(result.success);
        assert!(result.stdout.contains("my_value"));
    }

    #[test]
    fn execute_with_cwd() {
        let temp = tempfile::TempDir::new().unwrap();
        std::fs::write(temp.path().join("marker.txt"), "").unwrap();

        let cmd = if cfg!(target_os = "windows") {
            "dir /b"
        } else {
            "ls"
        };

        let result = quiet(cmd, Some(temp.path())).unwrap();

        assert!(result.success);
        assert!(result.stdout.contains("marker.txt"));
    }

    #[test]
    fn execute_supports_pipelines() {
        let result = quiet("echo piped | sort", None).unwrap();
        assert!(result.success);
        assert!(result.stdout.contains("piped"));
    }

    #[test]
    fn probe_program_missing_binary_is_none() {
        let result = probe_program(
            "this-command-does-not-exist-12345",
            &["--version"],
            Duration::from_secs(5),
        );
        assert!(result.is_none());
    }

    #[cfg(unix)]
    #[test]
    fn probe_program_captures_stdout() {
        let result = probe_program("echo", &["v1.2.3"], Duration::from_secs(5)).unwrap();
        assert!(result.success);
        assert!(result.stdout.contains("v1.2.3"));
    }

    #[cfg(unix)]
    #[test]
    fn probe_program_kills_on_timeout() {
        let result = probe_program("sleep", &["5"], Duration::from_millis(100)).unwrap();
        assert!(!result.success);
        assert!(result.exit_code.is_none());
        assert!(result.duration < Duration::from_secs(5));
    }

    #[test]
    fn describe_exit_without_code() {
        let result = CommandResult::failure(None, String::new(), String::new(), Duration::ZERO);
        assert!(result.describe_exit().contains("terminated"));
    }
}
