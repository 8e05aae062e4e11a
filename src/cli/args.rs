//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Prepare this machine to run the ytdl desktop downloader.
#[derive(Debug, Parser)]
#[command(name = "ytdl-bootstrap")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to project root (overrides current directory)
    #[arg(short, long, global = true, env = "YTDL_BOOTSTRAP_PROJECT")]
    pub project: Option<PathBuf>,

    /// Show verbose output, including installer output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Install whatever is missing (default if no command specified)
    Run(RunArgs),

    /// Report what is installed without changing anything
    Check(CheckArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `run` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct RunArgs {
    /// Install FFmpeg without asking
    #[arg(short, long, conflicts_with = "no_media")]
    pub yes: bool,

    /// Skip FFmpeg without asking
    #[arg(long)]
    pub no_media: bool,

    /// Use defaults, no prompts
    #[arg(long)]
    pub non_interactive: bool,

    /// Start the application when everything is ready
    #[arg(long)]
    pub launch: bool,

    /// Stop after installing uv instead of patching PATH
    #[arg(long)]
    pub restart_after_install: bool,

    /// FFmpeg archive to download instead of the platform default
    #[arg(long, value_name = "URL", env = "YTDL_BOOTSTRAP_FFMPEG_URL")]
    pub ffmpeg_url: Option<String>,

    /// Expected SHA-256 of the FFmpeg archive
    #[arg(long, value_name = "HEX", env = "YTDL_BOOTSTRAP_FFMPEG_SHA256")]
    pub ffmpeg_sha256: Option<String>,

    /// Where to put FFmpeg binaries (relative to the project)
    #[arg(long, value_name = "DIR", env = "YTDL_BOOTSTRAP_BIN_DIR")]
    pub bin_dir: Option<PathBuf>,
}

/// Arguments for the `check` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CheckArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Where FFmpeg binaries are looked for (relative to the project)
    #[arg(long, value_name = "DIR", env = "YTDL_BOOTSTRAP_BIN_DIR")]
    pub bin_dir: Option<PathBuf>,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
