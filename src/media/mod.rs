//! FFmpeg discovery and archive installs.
//!
//! The media tool counts as present when `ffmpeg -version` answers, when a
//! copy sits in the project's bin directory, or when one is installed in a
//! well-known location that may not be on PATH.

pub mod archive;
pub mod checksum;
pub mod install;
pub mod locate;

pub use archive::{ArchiveFormat, ArchiveSource, ChecksumSource};
pub use install::{install_from_archive, ArchiveInstall};

use std::path::{Path, PathBuf};

use crate::detection::{detect_tool, first_available, PlatformKind, ToolAvailability, VersionQuery};
use crate::host::Host;

/// Binaries that make up the media tool.
pub const MEDIA_TOOLS: [&str; 2] = ["ffmpeg", "ffprobe"];

const FFMPEG_QUERY: &[VersionQuery] = &[VersionQuery::new("ffmpeg", &["-version"])];

/// How the media tool was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaLocation {
    /// Answered `ffmpeg -version` from PATH.
    OnPath,
    /// In the project's bin directory.
    LocalBin(PathBuf),
    /// In a well-known install directory.
    WellKnown(PathBuf),
}

/// Result of looking for the media tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaDiscovery {
    pub availability: ToolAvailability,
    pub location: Option<MediaLocation>,
}

/// Look for FFmpeg without installing anything.
pub fn find_media_tool(host: &dyn Host, bin_dir: &Path) -> MediaDiscovery {
    let platform = host.platform();

    let local = bin_dir.join(platform.executable_name("ffmpeg"));
    if local.is_file() {
        return MediaDiscovery {
            availability: ToolAvailability::at_path("ffmpeg", &local),
            location: Some(MediaLocation::LocalBin(local)),
        };
    }

    let on_path = detect_tool(host, "ffmpeg", FFMPEG_QUERY);
    if on_path.found {
        return MediaDiscovery {
            availability: on_path,
            location: Some(MediaLocation::OnPath),
        };
    }

    let candidates = well_known_locations(host);
    match first_available(&candidates, host) {
        Some(path) => MediaDiscovery {
            availability: ToolAvailability::at_path("ffmpeg", path),
            location: Some(MediaLocation::WellKnown(path.clone())),
        },
        None => MediaDiscovery {
            availability: ToolAvailability::missing("ffmpeg"),
            location: None,
        },
    }
}

/// Common FFmpeg install paths for the host platform.
pub fn well_known_locations(host: &dyn Host) -> Vec<PathBuf> {
    match host.platform() {
        PlatformKind::Windows => {
            let mut dirs: Vec<PathBuf> = Vec::new();
            for (var, suffix) in [
                ("ProgramFiles", r"ffmpeg\bin"),
                ("ProgramFiles(x86)", r"ffmpeg\bin"),
                ("LOCALAPPDATA", r"Programs\ffmpeg\bin"),
                ("USERPROFILE", r"scoop\apps\ffmpeg\current\bin"),
            ] {
                if let Some(base) = host.env_var(var) {
                    dirs.push(PathBuf::from(base).join(suffix));
                }
            }
            dirs.push(PathBuf::from(r"C:\ffmpeg\bin"));
            dirs.into_iter().map(|d| d.join("ffmpeg.exe")).collect()
        }
        _ => ["/usr/bin", "/usr/local/bin", "/snap/bin", "/opt/homebrew/bin"]
            .iter()
            .map(|dir| Path::new(dir).join("ffmpeg"))
            .collect(),
    }
}
