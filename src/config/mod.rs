//! Run configuration.
//!
//! There is no configuration file. A [`BootstrapConfig`] is assembled from
//! command-line flags and environment variables, with fallbacks from
//! [`defaults`].

pub mod defaults;

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::detection::PlatformKind;
use crate::media::{ArchiveFormat, ArchiveSource, ChecksumSource};

/// How the media tool prompt is answered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaAnswer {
    /// Ask the user (default no).
    #[default]
    Ask,
    /// Install without asking.
    Yes,
    /// Skip without asking.
    No,
}

/// What to do when a freshly installed tool is not visible to this process.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RestartPolicy {
    /// Locate the binary, patch PATH and keep going.
    #[default]
    Continue,
    /// Always stop and ask for a fresh terminal.
    Always,
}

/// Resolved settings for one bootstrap run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BootstrapConfig {
    /// Project root containing the manifest.
    pub project_dir: PathBuf,
    /// Where media tool binaries are copied.
    pub bin_dir: PathBuf,
    /// Media prompt answer.
    pub media_answer: MediaAnswer,
    /// Restart behavior after installing the package manager.
    pub restart_policy: RestartPolicy,
    /// Archive to use for the media tool instead of the platform default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_archive: Option<ArchiveSource>,
    /// Start the application after a successful bootstrap.
    pub launch: bool,
    /// Installer fetched when Windows has no package manager for Python.
    pub python_installer_url: String,
}

impl BootstrapConfig {
    /// Default configuration for a project directory.
    pub fn new(project_dir: impl Into<PathBuf>) -> Self {
        let project_dir = project_dir.into();
        let bin_dir = project_dir.join(defaults::BIN_DIR_NAME);
        Self {
            project_dir,
            bin_dir,
            media_answer: MediaAnswer::default(),
            restart_policy: RestartPolicy::default(),
            media_archive: None,
            launch: false,
            python_installer_url: defaults::PYTHON_WINDOWS_INSTALLER_URL.to_string(),
        }
    }

    /// Use a different bin directory. Relative paths resolve against the project.
    pub fn with_bin_dir(mut self, dir: &Path) -> Self {
        self.bin_dir = if dir.is_absolute() {
            dir.to_path_buf()
        } else {
            self.project_dir.join(dir)
        };
        self
    }

    /// Path of the project manifest.
    pub fn manifest_path(&self) -> PathBuf {
        self.project_dir.join(defaults::MANIFEST_FILE)
    }

    /// Staging directory for archive downloads.
    pub fn staging_dir(&self) -> PathBuf {
        self.project_dir.join(defaults::STAGING_DIR_NAME)
    }

    /// Archive to install the media tool from, if this platform uses one.
    ///
    /// A configured override applies everywhere; otherwise only Windows
    /// downloads an archive.
    pub fn media_archive_for(&self, platform: PlatformKind) -> Option<ArchiveSource> {
        if let Some(source) = &self.media_archive {
            return Some(source.clone());
        }
        match platform {
            PlatformKind::Windows => Some(ArchiveSource {
                url: defaults::FFMPEG_WINDOWS_ARCHIVE_URL.to_string(),
                format: ArchiveFormat::Zip,
                checksum: ChecksumSource::Manifest {
                    url: defaults::FFMPEG_WINDOWS_CHECKSUMS_URL.to_string(),
                },
            }),
            _ => None,
        }
    }
}
