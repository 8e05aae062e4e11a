//! Stage 1: the Python runtime.

use super::{failure_detail, unsupported, StageContext, StageFlow, StageStatus};
use crate::config::defaults::{PYTHON_INSTALLER_FILE, PYTHON_WINDOWS_INSTALLER_ARGS};
use crate::detection::{
    detect_tool_where, first_available, Candidate, Package, PlatformKind, SystemPackageManager,
    ToolAvailability, VersionQuery,
};
use crate::error::{BootstrapError, Result};
use crate::host::Host;
use crate::ui::UserInterface;

const TOOL: &str = "Python";

const UNIX_QUERIES: &[VersionQuery] = &[
    VersionQuery::new("python3", &["--version"]),
    VersionQuery::new("python", &["--version"]),
];

const WINDOWS_QUERIES: &[VersionQuery] = &[
    VersionQuery::new("python3", &["--version"]),
    VersionQuery::new("python", &["--version"]),
    VersionQuery::new("py", &["-3", "--version"]),
];

/// Version queries for the runtime, in the order they are tried.
///
/// The `py -3` launcher exists only on Windows.
pub fn runtime_queries(platform: PlatformKind) -> &'static [VersionQuery] {
    match platform {
        PlatformKind::Windows => WINDOWS_QUERIES,
        _ => UNIX_QUERIES,
    }
}

/// Probe for Python 3 without installing anything.
///
/// A `python` that reports 2.x, or no parseable version, does not count.
pub fn probe_runtime(host: &dyn Host) -> ToolAvailability {
    detect_tool_where(host, TOOL, runtime_queries(host.platform()), is_python3)
}

fn is_python3(version: Option<&str>) -> bool {
    version.is_some_and(|v| v.split('.').next() == Some("3"))
}

/// A way to get Python onto the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuntimeInstaller {
    /// A system package manager.
    Manager(SystemPackageManager),
    /// The python.org installer (Windows only).
    PythonOrg,
}

impl RuntimeInstaller {
    /// Installers for a platform, highest priority first.
    pub fn candidates_for(platform: PlatformKind) -> Vec<Self> {
        let mut installers: Vec<Self> = SystemPackageManager::candidates_for(platform)
            .iter()
            .copied()
            .map(Self::Manager)
            .collect();
        if platform == PlatformKind::Windows {
            installers.push(Self::PythonOrg);
        }
        installers
    }
}

impl Candidate for RuntimeInstaller {
    fn label(&self) -> String {
        match self {
            Self::Manager(manager) => manager.label(),
            Self::PythonOrg => "python.org installer".to_string(),
        }
    }

    fn is_available(&self, host: &dyn Host) -> bool {
        match self {
            Self::Manager(manager) => manager.is_available(host),
            Self::PythonOrg => true,
        }
    }
}

/// Make sure a Python 3 runtime answers on PATH.
pub fn ensure_runtime(ctx: &StageContext<'_>, ui: &mut dyn UserInterface) -> Result<StageFlow> {
    let platform = ctx.platform();
    let found = probe_runtime(ctx.host);
    if found.found {
        tracing::info!("Python already installed ({})", found.describe());
        ui.success(&format!("Python {}", found.describe()));
        return Ok(StageFlow::Continue(StageStatus::AlreadyPresent {
            version: found.version,
        }));
    }

    let installers = RuntimeInstaller::candidates_for(platform);
    let installer = first_available(&installers, ctx.host)
        .copied()
        .ok_or_else(|| unsupported(TOOL, platform, &installers))?;

    tracing::info!("Installing Python with {}", installer.label());
    match installer {
        RuntimeInstaller::Manager(manager) => install_with_manager(ctx, ui, manager),
        RuntimeInstaller::PythonOrg => install_from_python_org(ctx, ui),
    }
}

fn install_with_manager(
    ctx: &StageContext<'_>,
    ui: &mut dyn UserInterface,
    manager: SystemPackageManager,
) -> Result<StageFlow> {
    let elevated = ctx.host.is_elevated();
    let command = manager.install_command(Package::Runtime, elevated);
    if manager.needs_sudo() && !elevated {
        ui.message("Installing Python needs administrator rights; sudo may ask for your password.");
    }

    let mut spinner = ui.start_spinner(&format!("Installing Python with {}", manager));
    let result = ctx.host.run(&command, None)?;
    if !result.success {
        spinner.finish_error("Python install failed");
        return Err(BootstrapError::NetworkInstallFailure {
            tool: TOOL.to_string(),
            message: failure_detail(&command, &result),
        });
    }

    let status = StageStatus::Installed {
        via: manager.to_string(),
    };
    let found = probe_runtime(ctx.host);
    if found.found {
        spinner.finish_success(&format!("Python {} installed", found.describe()));
        return Ok(StageFlow::Continue(status));
    }

    // Windows installers edit the user PATH, which this process never sees.
    if ctx.platform() == PlatformKind::Windows {
        spinner.finish_success("Python installed");
        return Ok(StageFlow::Restart {
            status,
            reason: "Python was installed but is not visible to this terminal yet".to_string(),
        });
    }

    spinner.finish_error("Python is still not on PATH");
    Err(BootstrapError::NetworkInstallFailure {
        tool: TOOL.to_string(),
        message: format!("`{}` succeeded but Python is still not on PATH", command),
    })
}

fn install_from_python_org(
    ctx: &StageContext<'_>,
    ui: &mut dyn UserInterface,
) -> Result<StageFlow> {
    let staging = ctx.config.staging_dir();
    std::fs::create_dir_all(&staging)?;
    let installer_path = staging.join(PYTHON_INSTALLER_FILE);

    let mut spinner = ui.start_spinner("Downloading the Python installer");
    let downloaded = ctx.fetcher.download_to_file(
        &ctx.config.python_installer_url,
        &installer_path,
        &mut |done, total| spinner.set_progress(done, total),
    );
    if let Err(e) = downloaded {
        spinner.finish_error("Python installer download failed");
        remove_staging(&staging);
        return Err(BootstrapError::NetworkInstallFailure {
            tool: TOOL.to_string(),
            message: format!("{:#}", e),
        });
    }

    spinner.set_message("Running the Python installer");
    let command = format!(
        "\"{}\" {}",
        installer_path.display(),
        PYTHON_WINDOWS_INSTALLER_ARGS
    );
    let result = ctx.host.run(&command, None);
    remove_staging(&staging);
    let result = result?;
    if !result.success {
        spinner.finish_error("Python installer failed");
        return Err(BootstrapError::NetworkInstallFailure {
            tool: TOOL.to_string(),
            message: failure_detail(&command, &result),
        });
    }

    spinner.finish_success("Python installed");
    Ok(StageFlow::Restart {
        status: StageStatus::Installed {
            via: "python.org installer".to_string(),
        },
        reason: "Python was installed and needs a new terminal to appear on PATH".to_string(),
    })
}

fn remove_staging(staging: &std::path::Path) {
    if let Err(e) = std::fs::remove_dir_all(staging) {
        tracing::warn!("Could not remove {}: {}", staging.display(), e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BootstrapConfig;
    use crate::host::MockHost;
    use crate::ui::MockUI;
    use httpmock::prelude::*;
    use tempfile::TempDir;

    fn run(host: &MockHost) -> (Result<StageFlow>, MockUI) {
        run_with(host, &BootstrapConfig::new("/work/app"))
    }

    fn run_with(host: &MockHost, config: &BootstrapConfig) -> (Result<StageFlow>, MockUI) {
        let fetcher = crate::fetch::HttpFetcher::new().unwrap();
        let ctx = StageContext {
            host,
            config,
            fetcher: &fetcher,
        };
        let mut ui = MockUI::new();
        let flow = ensure_runtime(&ctx, &mut ui);
        (flow, ui)
    }

    #[test]
    fn py_launcher_only_on_windows() {
        assert!(runtime_queries(PlatformKind::Windows)
            .iter()
            .any(|q| q.program == "py"));
        assert!(!runtime_queries(PlatformKind::Linux)
            .iter()
            .any(|q| q.program == "py"));
    }

    #[test]
    fn present_runtime_runs_nothing() {
        let host = MockHost::new(PlatformKind::Linux).with_tool("python3", "Python 3.12.3");
        let (flow, _) = run(&host);

        assert_eq!(
            flow.unwrap(),
            StageFlow::Continue(StageStatus::AlreadyPresent {
                version: Some("3.12.3".into())
            })
        );
        assert!(host.commands().is_empty());
    }

    #[test]
    fn windows_py_launcher_counts() {
        let host = MockHost::new(PlatformKind::Windows).with_tool("py", "Python 3.11.9");
        let (flow, _) = run(&host);
        assert!(matches!(
            flow.unwrap(),
            StageFlow::Continue(StageStatus::AlreadyPresent { .. })
        ));
    }

    #[test]
    fn linux_installs_with_first_available_manager() {
        let host = MockHost::new(PlatformKind::Linux)
            .with_tool("dnf", "4.18.0")
            .with_tool("pacman", "Pacman v6.1.0")
            .with_install_effect("dnf install -y python3", "python3", "Python 3.12.3");
        let (flow, ui) = run(&host);

        assert_eq!(
            flow.unwrap(),
            StageFlow::Continue(StageStatus::Installed { via: "dnf".into() })
        );
        assert_eq!(host.commands(), vec!["sudo dnf install -y python3"]);
        assert!(ui.has_message("sudo"));
    }

    #[test]
    fn elevated_install_skips_sudo() {
        let host = MockHost::new(PlatformKind::Linux)
            .with_elevated(true)
            .with_tool("pacman", "Pacman v6.1.0")
            .with_install_effect("pacman -S", "python", "Python 3.12.3");
        let (flow, ui) = run(&host);

        assert!(flow.is_ok());
        assert_eq!(
            host.commands(),
            vec!["pacman -S --noconfirm --needed python"]
        );
        assert!(!ui.has_message("sudo"));
    }

    #[test]
    fn linux_without_manager_is_unsupported() {
        let host = MockHost::new(PlatformKind::Linux);
        let (flow, _) = run(&host);

        let err = flow.unwrap_err();
        assert!(matches!(
            err,
            BootstrapError::UnsupportedPlatformTooling { .. }
        ));
        assert!(host.commands().is_empty());
    }

    #[test]
    fn macos_without_homebrew_is_unsupported() {
        let host = MockHost::new(PlatformKind::MacOs);
        let (flow, _) = run(&host);
        let err = flow.unwrap_err();
        assert!(err.to_string().contains("brew"));
    }

    #[test]
    fn unknown_platform_is_unsupported() {
        let host = MockHost::new(PlatformKind::Unknown);
        let (flow, _) = run(&host);
        assert!(matches!(
            flow.unwrap_err(),
            BootstrapError::UnsupportedPlatformTooling { .. }
        ));
    }

    #[test]
    fn failed_install_is_network_failure() {
        let host = MockHost::new(PlatformKind::MacOs)
            .with_tool("brew", "Homebrew 4.4.0")
            .with_failing_command("brew install python");
        let (flow, _) = run(&host);

        let err = flow.unwrap_err();
        assert!(matches!(err, BootstrapError::NetworkInstallFailure { .. }));
        assert!(err.to_string().contains("brew install python"));
    }

    #[test]
    fn invisible_install_on_linux_is_failure() {
        let host = MockHost::new(PlatformKind::Linux).with_tool("apt-get", "apt 2.7.14");
        let (flow, _) = run(&host);
        assert!(matches!(
            flow.unwrap_err(),
            BootstrapError::NetworkInstallFailure { .. }
        ));
    }

    #[test]
    fn invisible_install_on_windows_requests_restart() {
        let host = MockHost::new(PlatformKind::Windows).with_tool("winget", "v1.9.25200");
        let (flow, _) = run(&host);

        match flow.unwrap() {
            StageFlow::Restart { status, .. } => assert_eq!(
                status,
                StageStatus::Installed {
                    via: "winget".into()
                }
            ),
            other => panic!("expected restart, got {:?}", other),
        }
        assert!(host.ran("winget install --id Python.Python.3.12"));
    }

    #[test]
    fn windows_chain_falls_back_to_choco() {
        let installers = RuntimeInstaller::candidates_for(PlatformKind::Windows);
        let host = MockHost::new(PlatformKind::Windows).with_tool("choco", "2.3.0");
        assert_eq!(
            first_available(&installers, &host),
            Some(&RuntimeInstaller::Manager(SystemPackageManager::Chocolatey))
        );

        let bare = MockHost::new(PlatformKind::Windows);
        assert_eq!(
            first_available(&installers, &bare),
            Some(&RuntimeInstaller::PythonOrg)
        );
    }

    #[test]
    fn python2_is_not_a_runtime() {
        let host = MockHost::new(PlatformKind::Linux)
            .with_tool("python", "Python 2.7.18")
            .with_tool("apt-get", "apt 2.7.14 (amd64)")
            .with_install_effect("apt-get install -y python3", "python3", "Python 3.12.3");
        let (flow, _) = run(&host);

        assert_eq!(
            flow.unwrap(),
            StageFlow::Continue(StageStatus::Installed {
                via: "apt".into()
            })
        );
        assert!(host.ran("apt-get install -y python3"));
    }

    #[test]
    fn python2_falls_through_to_next_query() {
        let host = MockHost::new(PlatformKind::Windows)
            .with_tool("python", "Python 2.7.18")
            .with_tool("py", "Python 3.12.8");
        let (flow, _) = run(&host);

        assert_eq!(
            flow.unwrap(),
            StageFlow::Continue(StageStatus::AlreadyPresent {
                version: Some("3.12.8".into())
            })
        );
        assert!(host.commands().is_empty());
    }

    #[test]
    fn unparseable_version_is_not_a_runtime() {
        let host = MockHost::new(PlatformKind::Linux).with_tool("python3", "");
        assert!(!probe_runtime(&host).found);
    }

    #[test]
    fn bare_windows_runs_python_org_installer() {
        let server = MockServer::start();
        let installer = server.mock(|when, then| {
            when.method(GET).path("/python-3.12.8-amd64.exe");
            then.status(200).body("MZ installer");
        });

        let temp = TempDir::new().unwrap();
        let mut config = BootstrapConfig::new(temp.path());
        config.python_installer_url = server.url("/python-3.12.8-amd64.exe");
        let host = MockHost::new(PlatformKind::Windows);
        let (flow, _) = run_with(&host, &config);

        installer.assert();
        match flow.unwrap() {
            StageFlow::Restart { status, .. } => assert_eq!(
                status,
                StageStatus::Installed {
                    via: "python.org installer".into()
                }
            ),
            other => panic!("expected restart, got {:?}", other),
        }
        let commands = host.commands();
        assert_eq!(commands.len(), 1);
        assert!(commands[0].starts_with('"'));
        assert!(commands[0].contains(PYTHON_INSTALLER_FILE));
        assert!(commands[0].ends_with("\" /quiet InstallAllUsers=0 PrependPath=1 Include_test=0"));
        assert!(!config.staging_dir().exists());
    }

    #[test]
    fn missing_python_org_installer_is_network_failure() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/python-3.12.8-amd64.exe");
            then.status(404);
        });

        let temp = TempDir::new().unwrap();
        let mut config = BootstrapConfig::new(temp.path());
        config.python_installer_url = server.url("/python-3.12.8-amd64.exe");
        let host = MockHost::new(PlatformKind::Windows);
        let (flow, _) = run_with(&host, &config);

        let err = flow.unwrap_err();
        assert!(matches!(err, BootstrapError::NetworkInstallFailure { .. }));
        assert!(err.to_string().contains("404"));
        assert!(host.commands().is_empty());
        assert!(!config.staging_dir().exists());
    }

    #[test]
    fn failing_python_org_installer_is_network_failure() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/python.exe");
            then.status(200).body("MZ");
        });

        let temp = TempDir::new().unwrap();
        let mut config = BootstrapConfig::new(temp.path());
        config.python_installer_url = server.url("/python.exe");
        let host = MockHost::new(PlatformKind::Windows).with_failing_command("/quiet");
        let (flow, _) = run_with(&host, &config);

        assert!(matches!(
            flow.unwrap_err(),
            BootstrapError::NetworkInstallFailure { .. }
        ));
    }
}
