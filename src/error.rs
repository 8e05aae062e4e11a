//! Error types for bootstrap operations.
//!
//! This module defines [`BootstrapError`], the primary error type used
//! throughout the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - The four provisioning failures map one-to-one onto the bootstrap stages
//! - [`BootstrapError::MediaToolDownloadFailure`] is recovered inside the
//!   media stage; every other variant aborts the run with exit code 1
//! - Use `anyhow::Error` (via `BootstrapError::Other`) for unexpected errors

use thiserror::Error;

/// Core error type for bootstrap operations.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// No supported system package manager (or other tooling) is available
    /// to install a missing tool on this platform.
    #[error("Cannot install {tool} on {platform}: {message}")]
    UnsupportedPlatformTooling {
        tool: String,
        platform: String,
        message: String,
    },

    /// A network-delivered install (script, installer, system package) failed.
    #[error("Failed to install {tool}: {message}")]
    NetworkInstallFailure { tool: String, message: String },

    /// The manifest sync exited non-zero or could not start.
    #[error("Dependency sync failed: {message}")]
    DependencySyncFailure { message: String },

    /// Downloading or unpacking the media tool failed.
    #[error("FFmpeg download failed: {message}")]
    MediaToolDownloadFailure { message: String },

    /// Shell command could not be spawned.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BootstrapError {
    /// Whether the sequencer may continue after this error.
    ///
    /// Only a failed media tool download is recoverable; the application
    /// offers the download again on its first run.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::MediaToolDownloadFailure { .. })
    }
}

/// Result type alias for bootstrap operations.
pub type Result<T> = std::result::Result<T, BootstrapError>;
