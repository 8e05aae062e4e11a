//! ytdl-bootstrap - zero-config provisioning for the ytdl desktop downloader.
//!
//! Running `ytdl-bootstrap` in the application's project directory makes
//! sure a Python runtime, the `uv` package manager, the project's Python
//! dependencies and (optionally) FFmpeg are present, installing whatever is
//! missing with the platform's own tooling.
//!
//! # Modules
//!
//! - [`bootstrap`] - The stage sequencer, status probe and app launcher
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Run configuration and compile-time defaults
//! - [`detection`] - Platform, tool and package manager detection
//! - [`error`] - Error types and result aliases
//! - [`fetch`] - HTTP downloads
//! - [`host`] - Side effects on the machine, real and mocked
//! - [`media`] - FFmpeg discovery and archive installs
//! - [`shell`] - Shell command execution
//! - [`ui`] - Interactive prompts, spinners, and terminal output
//!
//! # Example
//!
//! ```
//! use ytdl_bootstrap::bootstrap::{probe_all, Stage};
//! use ytdl_bootstrap::config::BootstrapConfig;
//! use ytdl_bootstrap::detection::PlatformKind;
//! use ytdl_bootstrap::host::MockHost;
//!
//! let host = MockHost::new(PlatformKind::Linux)
//!     .with_tool("python3", "Python 3.12.3")
//!     .with_tool("uv", "uv 0.5.11");
//! let report = probe_all(&host, &BootstrapConfig::new("/work/app"));
//!
//! assert!(report.ready);
//! assert_eq!(
//!     report.status_of(Stage::Runtime).unwrap().version.as_deref(),
//!     Some("3.12.3")
//! );
//! ```

pub mod bootstrap;
pub mod cli;
pub mod config;
pub mod detection;
pub mod error;
pub mod fetch;
pub mod host;
pub mod media;
pub mod shell;
pub mod ui;

pub use error::{BootstrapError, Result};
