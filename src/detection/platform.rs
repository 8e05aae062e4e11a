//! Operating system detection.

use serde::Serialize;
use std::fmt;

/// The operating system family the bootstrap is running on.
///
/// Determined once at startup; every install branch keys off this value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformKind {
    Linux,
    #[serde(rename = "macos")]
    MacOs,
    Windows,
    Unknown,
}

impl PlatformKind {
    /// Detect the platform this binary was built for.
    pub fn detect() -> Self {
        Self::from_os(std::env::consts::OS)
    }

    /// Map an OS identifier (as in `std::env::consts::OS`) to a platform.
    pub fn from_os(os: &str) -> Self {
        match os {
            "linux" => Self::Linux,
            "macos" => Self::MacOs,
            "windows" => Self::Windows,
            _ => Self::Unknown,
        }
    }

    /// Executable file name for a tool on this platform.
    pub fn executable_name(&self, tool: &str) -> String {
        match self {
            Self::Windows => format!("{}.exe", tool),
            _ => tool.to_string(),
        }
    }

    /// Whether installs are automated on this platform at all.
    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

impl fmt::Display for PlatformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Linux => "Linux",
            Self::MacOs => "macOS",
            Self::Windows => "Windows",
            Self::Unknown => "an unknown platform",
        };
        f.write_str(name)
    }
}
