//! System package managers.

use serde::Serialize;
use std::fmt;

use super::candidate::Candidate;
use super::platform::PlatformKind;
use super::tool::VersionQuery;
use crate::host::Host;

/// What a package manager is asked to install.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Package {
    /// Python 3.
    Runtime,
    /// FFmpeg, including ffprobe.
    MediaTool,
}

/// A system package manager the bootstrap knows how to drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SystemPackageManager {
    Apt,
    Dnf,
    Pacman,
    Homebrew,
    Winget,
    Chocolatey,
}

impl SystemPackageManager {
    /// Managers usable on a platform, highest priority first.
    pub fn candidates_for(platform: PlatformKind) -> &'static [Self] {
        match platform {
            PlatformKind::Linux => &[Self::Apt, Self::Dnf, Self::Pacman],
            PlatformKind::MacOs => &[Self::Homebrew],
            PlatformKind::Windows => &[Self::Winget, Self::Chocolatey],
            PlatformKind::Unknown => &[],
        }
    }

    /// Command-line name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Apt => "apt",
            Self::Dnf => "dnf",
            Self::Pacman => "pacman",
            Self::Homebrew => "brew",
            Self::Winget => "winget",
            Self::Chocolatey => "choco",
        }
    }

    /// Query that succeeds when the manager is installed.
    pub fn probe(&self) -> VersionQuery {
        match self {
            Self::Apt => VersionQuery::new("apt-get", &["--version"]),
            Self::Dnf => VersionQuery::new("dnf", &["--version"]),
            Self::Pacman => VersionQuery::new("pacman", &["--version"]),
            Self::Homebrew => VersionQuery::new("brew", &["--version"]),
            Self::Winget => VersionQuery::new("winget", &["--version"]),
            Self::Chocolatey => VersionQuery::new("choco", &["--version"]),
        }
    }

    /// Whether installs need root (Linux managers only).
    pub fn needs_sudo(&self) -> bool {
        matches!(self, Self::Apt | Self::Dnf | Self::Pacman)
    }

    /// Package identifier for what is being installed.
    pub fn package_name(&self, package: Package) -> &'static str {
        match (self, package) {
            (Self::Apt | Self::Dnf, Package::Runtime) => "python3",
            (Self::Pacman | Self::Homebrew | Self::Chocolatey, Package::Runtime) => "python",
            (Self::Winget, Package::Runtime) => "Python.Python.3.12",
            (Self::Dnf, Package::MediaTool) => "ffmpeg-free",
            (Self::Winget, Package::MediaTool) => "Gyan.FFmpeg",
            (_, Package::MediaTool) => "ffmpeg",
        }
    }

    /// Shell command that installs `package` non-interactively.
    ///
    /// Linux managers get a `sudo` prefix unless `elevated` is set.
    pub fn install_command(&self, package: Package, elevated: bool) -> String {
        let name = self.package_name(package);
        let sudo = if self.needs_sudo() && !elevated {
            "sudo "
        } else {
            ""
        };

        match self {
            Self::Apt => format!(
                "{sudo}apt-get update && {sudo}apt-get install -y {name}",
                sudo = sudo,
                name = name
            ),
            Self::Dnf => format!("{}dnf install -y {}", sudo, name),
            Self::Pacman => format!("{}pacman -S --noconfirm --needed {}", sudo, name),
            Self::Homebrew => format!("brew install {}", name),
            Self::Winget => format!(
                "winget install --id {} -e --accept-source-agreements --accept-package-agreements",
                name
            ),
            Self::Chocolatey => format!("choco install {} -y", name),
        }
    }
}

impl fmt::Display for SystemPackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Candidate for SystemPackageManager {
    fn label(&self) -> String {
        self.name().to_string()
    }

    fn is_available(&self, host: &dyn Host) -> bool {
        let probe = self.probe();
        host.query(probe.program, probe.args)
            .map(|result| result.success)
            .unwrap_or(false)
    }
}
