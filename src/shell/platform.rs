//! Process environment helpers: CI detection, privilege level, PATH edits.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Check if running in a CI environment.
///
/// Used to force non-interactive mode in `main()`. Checks common CI
/// environment variables: `CI`, `GITHUB_ACTIONS`, `GITLAB_CI`, `CIRCLECI`,
/// `TRAVIS`, `JENKINS_URL`.
pub fn is_ci() -> bool {
    std::env::var("CI").is_ok()
        || std::env::var("GITHUB_ACTIONS").is_ok()
        || std::env::var("GITLAB_CI").is_ok()
        || std::env::var("CIRCLECI").is_ok()
        || std::env::var("TRAVIS").is_ok()
        || std::env::var("JENKINS_URL").is_ok()
}

/// Check if running as root/admin.
///
/// Linux package installs are prefixed with `sudo` unless this is true.
pub fn is_elevated() -> bool {
    #[cfg(unix)]
    {
        // SAFETY: geteuid() is a simple syscall that returns the effective user ID
        unsafe { libc::geteuid() == 0 }
    }

    #[cfg(windows)]
    {
        std::env::var("ADMIN").is_ok()
    }

    #[cfg(not(any(unix, windows)))]
    {
        false
    }
}

/// Parse the process PATH into a list of directories.
pub fn path_entries() -> Vec<PathBuf> {
    std::env::var_os("PATH")
        .map(|path| std::env::split_paths(&path).collect())
        .unwrap_or_default()
}

/// Build a PATH value with `dir` in front of `current`, without duplicating it.
pub fn prepended_path(dir: &Path, current: &[PathBuf]) -> Option<OsString> {
    let mut entries = vec![dir.to_path_buf()];
    entries.extend(current.iter().filter(|p| p.as_path() != dir).cloned());
    std::env::join_paths(entries).ok()
}

/// Prepend a directory to this process's PATH.
///
/// Child processes spawned afterwards (version probes, `uv sync`, the app
/// itself) inherit the new value. The parent terminal is not affected.
pub fn prepend_to_path(dir: &Path) {
    if path_entries().first().map(|p| p.as_path()) == Some(dir) {
        return;
    }
    if let Some(joined) = prepended_path(dir, &path_entries()) {
        tracing::debug!("Prepending {} to PATH", dir.display());
        std::env::set_var("PATH", joined);
    }
}
