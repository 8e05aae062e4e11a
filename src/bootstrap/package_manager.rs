//! Stage 2: the `uv` package manager.

use std::path::PathBuf;

use super::{failure_detail, unsupported, StageContext, StageFlow, StageStatus};
use crate::config::defaults::{UV_INSTALL_UNIX, UV_INSTALL_UNIX_WGET, UV_INSTALL_WINDOWS};
use crate::config::RestartPolicy;
use crate::detection::{
    detect_tool, first_available, Candidate, PlatformKind, ToolAvailability, VersionQuery,
};
use crate::error::{BootstrapError, Result};
use crate::host::Host;
use crate::ui::UserInterface;

const TOOL: &str = "uv";

const UV_QUERY: &[VersionQuery] = &[VersionQuery::new("uv", &["--version"])];

/// Probe for `uv` without installing anything.
pub fn probe_uv(host: &dyn Host) -> ToolAvailability {
    detect_tool(host, TOOL, UV_QUERY)
}

/// How the uv install script is fetched and run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UvInstaller {
    Curl,
    Wget,
    PowerShell,
}

impl UvInstaller {
    pub fn candidates_for(platform: PlatformKind) -> &'static [Self] {
        match platform {
            PlatformKind::Windows => &[Self::PowerShell],
            _ => &[Self::Curl, Self::Wget],
        }
    }

    pub fn command(&self) -> &'static str {
        match self {
            Self::Curl => UV_INSTALL_UNIX,
            Self::Wget => UV_INSTALL_UNIX_WGET,
            Self::PowerShell => UV_INSTALL_WINDOWS,
        }
    }
}

impl Candidate for UvInstaller {
    fn label(&self) -> String {
        match self {
            Self::Curl => "curl".to_string(),
            Self::Wget => "wget".to_string(),
            Self::PowerShell => "powershell".to_string(),
        }
    }

    fn is_available(&self, host: &dyn Host) -> bool {
        match self {
            Self::Curl => host.query("curl", &["--version"]).is_some_and(|r| r.success),
            Self::Wget => host.query("wget", &["--version"]).is_some_and(|r| r.success),
            Self::PowerShell => true,
        }
    }
}

/// Directories the uv install script may write to, in lookup order.
pub fn uv_install_dirs(host: &dyn Host) -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    if let Some(xdg) = host.env_var("XDG_BIN_HOME").filter(|v| !v.is_empty()) {
        dirs.push(PathBuf::from(xdg));
    }
    if let Some(home) = host.home_dir() {
        dirs.push(home.join(".local").join("bin"));
        dirs.push(home.join(".cargo").join("bin"));
    }
    dirs
}

/// Make sure `uv` is installed and reachable from this process.
pub fn ensure_package_manager(
    ctx: &StageContext<'_>,
    ui: &mut dyn UserInterface,
) -> Result<StageFlow> {
    let platform = ctx.platform();
    let found = probe_uv(ctx.host);
    if found.found {
        tracing::info!("uv already installed ({})", found.describe());
        ui.success(&format!("uv {}", found.describe()));
        return Ok(StageFlow::Continue(StageStatus::AlreadyPresent {
            version: found.version,
        }));
    }

    let installers = UvInstaller::candidates_for(platform);
    let installer = first_available(installers, ctx.host)
        .ok_or_else(|| unsupported(TOOL, platform, installers))?;
    let command = installer.command();

    tracing::info!("Installing uv via {}", installer.label());
    let mut spinner = ui.start_spinner("Installing uv");
    let result = ctx.host.run(command, None)?;
    if !result.success {
        spinner.finish_error("uv install failed");
        return Err(BootstrapError::NetworkInstallFailure {
            tool: TOOL.to_string(),
            message: failure_detail(command, &result),
        });
    }
    spinner.finish_success("uv installed");

    let status = StageStatus::Installed {
        via: "install script".to_string(),
    };

    if ctx.config.restart_policy == RestartPolicy::Always {
        return Ok(StageFlow::Restart {
            status,
            reason: "uv was installed; a new terminal picks up the updated PATH".to_string(),
        });
    }

    if probe_uv(ctx.host).found {
        return Ok(StageFlow::Continue(status));
    }

    let binaries: Vec<PathBuf> = uv_install_dirs(ctx.host)
        .into_iter()
        .map(|dir| dir.join(platform.executable_name(TOOL)))
        .collect();
    let Some(dir) = first_available(&binaries, ctx.host).and_then(|bin| bin.parent()) else {
        return Ok(StageFlow::Restart {
            status,
            reason: "uv was installed but is not visible to this terminal yet".to_string(),
        });
    };

    tracing::debug!("Adding {} to PATH", dir.display());
    ctx.host.prepend_path(dir);
    ui.message(&format!("Added {} to PATH for this run", dir.display()));
    Ok(StageFlow::Continue(status))
}
