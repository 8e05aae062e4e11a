//! Compile-time defaults.

use std::time::Duration;

/// Project manifest that `uv sync` resolves.
pub const MANIFEST_FILE: &str = "pyproject.toml";

/// Directory, relative to the project, holding locally installed media tools.
pub const BIN_DIR_NAME: &str = "bin";

/// Transient directory for archive downloads and extraction.
pub const STAGING_DIR_NAME: &str = ".ffmpeg-download";

/// Application entry point, relative to the project.
pub const APP_ENTRY: &str = "src/main.py";

/// uv installer pipeline for Unix shells.
pub const UV_INSTALL_UNIX: &str = "curl -LsSf https://astral.sh/uv/install.sh | sh";

/// uv installer pipeline for Unix shells without curl.
pub const UV_INSTALL_UNIX_WGET: &str = "wget -qO- https://astral.sh/uv/install.sh | sh";

/// uv installer for Windows PowerShell.
pub const UV_INSTALL_WINDOWS: &str =
    "powershell -ExecutionPolicy ByPass -c \"irm https://astral.sh/uv/install.ps1 | iex\"";

/// Fixed python.org installer used when Windows has no package manager.
pub const PYTHON_WINDOWS_INSTALLER_URL: &str =
    "https://www.python.org/ftp/python/3.12.8/python-3.12.8-amd64.exe";

/// File name of the downloaded Python installer inside the staging directory.
pub const PYTHON_INSTALLER_FILE: &str = "python-installer.exe";

/// Silent per-user install that puts Python on PATH.
pub const PYTHON_WINDOWS_INSTALLER_ARGS: &str =
    "/quiet InstallAllUsers=0 PrependPath=1 Include_test=0";

/// Static FFmpeg build for Windows.
pub const FFMPEG_WINDOWS_ARCHIVE_URL: &str =
    "https://github.com/BtbN/FFmpeg-Builds/releases/download/latest/ffmpeg-master-latest-win64-gpl.zip";

/// Checksum listing published next to the Windows build.
pub const FFMPEG_WINDOWS_CHECKSUMS_URL: &str =
    "https://github.com/BtbN/FFmpeg-Builds/releases/download/latest/checksums.sha256";

/// Deadline for a single version query.
pub const VERSION_QUERY_TIMEOUT: Duration = Duration::from_secs(15);

/// Deadline for a whole archive or installer download.
pub const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(30 * 60);

/// Environment variable prefix for prompt overrides in non-interactive runs.
pub const PROMPT_ENV_PREFIX: &str = "YTDL_BOOTSTRAP_PROMPT_";
