//! Stage 4: FFmpeg and FFprobe.
//!
//! The media tool is optional for the bootstrap. The user is asked before
//! anything is downloaded (default no), and a failed download only defers
//! the install to the application's first run.

use super::{failure_detail, unsupported, StageContext, StageFlow, StageStatus};
use crate::config::MediaAnswer;
use crate::detection::{first_available, Candidate, Package, PlatformKind, SystemPackageManager};
use crate::error::{BootstrapError, Result};
use crate::media::{find_media_tool, install_from_archive, ArchiveInstall, ArchiveSource, MediaLocation};
use crate::ui::{Prompt, UserInterface};

const TOOL: &str = "FFmpeg";

/// Prompt key; overridable with `YTDL_BOOTSTRAP_PROMPT_INSTALL_FFMPEG`.
pub const INSTALL_PROMPT_KEY: &str = "install_ffmpeg";

const DEFERRED_NOTICE: &str =
    "FFmpeg is not installed; the application will offer the download on first run";

/// Make sure `ffmpeg` and `ffprobe` are available, or tell the user they
/// will be fetched later.
pub fn ensure_media_tool(ctx: &StageContext<'_>, ui: &mut dyn UserInterface) -> Result<StageFlow> {
    let platform = ctx.platform();
    let discovery = find_media_tool(ctx.host, &ctx.config.bin_dir);
    if discovery.availability.found {
        if let Some(MediaLocation::LocalBin(_)) = &discovery.location {
            ctx.host.prepend_path(&ctx.config.bin_dir);
        }
        tracing::info!("FFmpeg already installed ({})", discovery.availability.describe());
        ui.success(&format!("FFmpeg {}", discovery.availability.describe()));
        return Ok(StageFlow::Continue(StageStatus::AlreadyPresent {
            version: discovery.availability.version,
        }));
    }

    if !wants_install(ctx.config.media_answer, ui)? {
        tracing::info!("FFmpeg install declined");
        ui.warning(DEFERRED_NOTICE);
        return Ok(StageFlow::Continue(StageStatus::Declined));
    }

    let attempt = match ctx.config.media_archive_for(platform) {
        Some(source) => install_archive(ctx, ui, &source),
        None => match platform {
            PlatformKind::Linux | PlatformKind::MacOs => install_with_manager(ctx, ui),
            _ => {
                ui.warning(&format!(
                    "Automatic FFmpeg installs are not supported on {}",
                    platform
                ));
                ui.warning(DEFERRED_NOTICE);
                return Ok(StageFlow::Continue(StageStatus::Deferred {
                    reason: format!("unsupported platform: {}", platform),
                }));
            }
        },
    };

    match attempt {
        Ok(status) => Ok(StageFlow::Continue(status)),
        Err(e) if e.is_recoverable() => {
            tracing::warn!("{}", e);
            ui.warning(&e.to_string());
            ui.warning(DEFERRED_NOTICE);
            Ok(StageFlow::Continue(StageStatus::Deferred {
                reason: e.to_string(),
            }))
        }
        Err(e) => Err(e),
    }
}

fn wants_install(answer: MediaAnswer, ui: &mut dyn UserInterface) -> Result<bool> {
    match answer {
        MediaAnswer::Yes => Ok(true),
        MediaAnswer::No => Ok(false),
        MediaAnswer::Ask => ui.confirm(&Prompt::new(
            INSTALL_PROMPT_KEY,
            "FFmpeg was not found. Install FFmpeg now?",
            false,
        )),
    }
}

fn install_archive(
    ctx: &StageContext<'_>,
    ui: &mut dyn UserInterface,
    source: &ArchiveSource,
) -> Result<StageStatus> {
    let staging_dir = ctx.config.staging_dir();
    let install = ArchiveInstall {
        source,
        staging_dir: &staging_dir,
        bin_dir: &ctx.config.bin_dir,
        platform: ctx.platform(),
    };

    let mut spinner = ui.start_spinner(&format!("Downloading {}", source.asset_name()));
    let installed = install_from_archive(&install, ctx.fetcher, ctx.host, &mut |done, total| {
        spinner.set_progress(done, total)
    });
    let installed = match installed {
        Ok(installed) => installed,
        Err(e) => {
            spinner.finish_error("FFmpeg download failed");
            return Err(e);
        }
    };

    spinner.finish_success(&format!(
        "FFmpeg installed to {}",
        ctx.config.bin_dir.display()
    ));
    tracing::debug!("Installed {:?}", installed);
    ctx.host.prepend_path(&ctx.config.bin_dir);
    Ok(StageStatus::Installed {
        via: "archive download".to_string(),
    })
}

fn install_with_manager(ctx: &StageContext<'_>, ui: &mut dyn UserInterface) -> Result<StageStatus> {
    let platform = ctx.platform();
    let managers = SystemPackageManager::candidates_for(platform);
    let manager = first_available(managers, ctx.host)
        .ok_or_else(|| unsupported(TOOL, platform, managers))?;

    let elevated = ctx.host.is_elevated();
    let command = manager.install_command(Package::MediaTool, elevated);
    if manager.needs_sudo() && !elevated {
        ui.message("Installing FFmpeg needs administrator rights; sudo may ask for your password.");
    }

    tracing::info!("Installing FFmpeg with {}", manager.label());
    let mut spinner = ui.start_spinner(&format!("Installing FFmpeg with {}", manager));
    let result = ctx.host.run(&command, None)?;
    if !result.success {
        spinner.finish_error("FFmpeg install failed");
        return Err(BootstrapError::MediaToolDownloadFailure {
            message: failure_detail(&command, &result),
        });
    }

    spinner.finish_success("FFmpeg installed");
    Ok(StageStatus::Installed {
        via: manager.to_string(),
    })
}
