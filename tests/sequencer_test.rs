//! End-to-end bootstrap runs against a simulated machine.

use httpmock::prelude::*;
use std::fs;
use std::io::{Cursor, Write};
use tempfile::TempDir;
use ytdl_bootstrap::bootstrap::media::INSTALL_PROMPT_KEY;
use ytdl_bootstrap::bootstrap::{Outcome, Sequencer, Stage, StageStatus};
use ytdl_bootstrap::config::{BootstrapConfig, MediaAnswer};
use ytdl_bootstrap::detection::PlatformKind;
use ytdl_bootstrap::host::{Host, MockHost};
use ytdl_bootstrap::media::{ArchiveFormat, ArchiveSource, ChecksumSource};
use ytdl_bootstrap::ui::MockUI;
use ytdl_bootstrap::BootstrapError;

fn project() -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::write(
        temp.path().join("pyproject.toml"),
        "[project]\nname = \"ytdl\"\nversion = \"0.1.0\"\ndependencies = [\"yt-dlp\"]\n",
    )
    .unwrap();
    temp
}

/// Commands that install something, as opposed to `uv sync`.
fn install_commands(host: &MockHost) -> Vec<String> {
    host.commands()
        .into_iter()
        .filter(|c| c != "uv sync")
        .collect()
}

#[test]
fn everything_present_runs_no_installs() {
    let hosts = [
        MockHost::new(PlatformKind::Linux)
            .with_tool("python3", "Python 3.12.3")
            .with_tool("uv", "uv 0.5.11")
            .with_tool("ffmpeg", "ffmpeg version 6.1.1-3ubuntu5"),
        MockHost::new(PlatformKind::MacOs)
            .with_tool("python3", "Python 3.13.1")
            .with_tool("uv", "uv 0.5.11 (Homebrew 2024-12-19)")
            .with_tool("ffmpeg", "ffmpeg version 7.1 Copyright (c) 2000-2024"),
        MockHost::new(PlatformKind::Windows)
            .with_tool("py", "Python 3.12.8")
            .with_tool("uv", "uv 0.5.11 (c4d0caaee 2024-12-19)")
            .with_tool("ffmpeg", "ffmpeg version 2024-12-19-git-494c961379-full_build"),
    ];

    for host in &hosts {
        let temp = project();
        let sequencer = Sequencer::new(host, BootstrapConfig::new(temp.path())).unwrap();
        let mut ui = MockUI::new();

        let report = sequencer.run(&mut ui).unwrap();

        assert_eq!(report.outcome, Outcome::Completed, "{:?}", host.platform());
        assert!(install_commands(host).is_empty(), "{:?}", host.commands());
        assert_eq!(host.commands(), vec!["uv sync"]);
        assert!(ui.prompts_shown().is_empty());
        assert_eq!(report.stages.len(), 4);
    }
}

#[test]
fn linux_without_package_manager_is_unsupported_for_runtime() {
    let temp = project();
    let host = MockHost::new(PlatformKind::Linux);
    let sequencer = Sequencer::new(&host, BootstrapConfig::new(temp.path())).unwrap();
    let mut ui = MockUI::new();

    let err = sequencer.run(&mut ui).unwrap_err();

    assert!(matches!(
        err,
        BootstrapError::UnsupportedPlatformTooling { .. }
    ));
    assert!(!host.ran("uv sync"));
    assert!(host.commands().is_empty());
}

#[test]
fn linux_without_package_manager_is_unsupported_for_ffmpeg() {
    let temp = project();
    let host = MockHost::new(PlatformKind::Linux)
        .with_tool("python3", "Python 3.12.3")
        .with_tool("uv", "uv 0.5.11");
    let mut config = BootstrapConfig::new(temp.path());
    config.media_answer = MediaAnswer::Yes;
    let sequencer = Sequencer::new(&host, config).unwrap();
    let mut ui = MockUI::new();

    let err = sequencer.run(&mut ui).unwrap_err();

    assert!(matches!(
        err,
        BootstrapError::UnsupportedPlatformTooling { .. }
    ));
    assert!(err.to_string().contains("FFmpeg"));
}

#[test]
fn non_affirmative_answers_leave_bin_untouched() {
    for answer in ["n", "no", "", "maybe", "later"] {
        let temp = project();
        let host = MockHost::new(PlatformKind::Linux)
            .with_tool("python3", "Python 3.12.3")
            .with_tool("uv", "uv 0.5.11")
            .with_tool("apt-get", "apt 2.7.14 (amd64)");
        let config = BootstrapConfig::new(temp.path());
        let bin_dir = config.bin_dir.clone();
        let sequencer = Sequencer::new(&host, config).unwrap();
        let mut ui = MockUI::new();
        ui.set_prompt_response(INSTALL_PROMPT_KEY, answer);

        let report = sequencer.run(&mut ui).unwrap();

        assert!(report.is_completed());
        assert_eq!(
            report.status_of(Stage::MediaTool),
            Some(&StageStatus::Declined),
            "answer {:?}",
            answer
        );
        assert!(!bin_dir.exists());
        assert!(!host.ran("ffmpeg"));
        assert!(ui.has_warning("first run"));
    }
}

#[test]
fn affirmative_answer_with_served_archive_populates_bin() {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    for name in ["build/bin/ffmpeg", "build/bin/ffprobe", "build/LICENSE"] {
        writer
            .start_file(name, zip::write::SimpleFileOptions::default())
            .unwrap();
        writer.write_all(b"binary").unwrap();
    }
    let body = writer.finish().unwrap().into_inner();

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/ffmpeg.zip");
        then.status(200).body(body.clone());
    });

    let temp = project();
    let host = MockHost::new(PlatformKind::Linux)
        .with_tool("python3", "Python 3.12.3")
        .with_tool("uv", "uv 0.5.11");
    let mut config = BootstrapConfig::new(temp.path());
    config.media_archive = Some(ArchiveSource {
        url: server.url("/ffmpeg.zip"),
        format: ArchiveFormat::Zip,
        checksum: ChecksumSource::None,
    });
    let bin_dir = config.bin_dir.clone();
    let staging_dir = config.staging_dir();
    let sequencer = Sequencer::new(&host, config).unwrap();
    let mut ui = MockUI::new();
    ui.set_prompt_response(INSTALL_PROMPT_KEY, "Y");

    let report = sequencer.run(&mut ui).unwrap();

    assert!(report.is_completed());
    let mut installed: Vec<String> = fs::read_dir(&bin_dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    installed.sort();
    assert_eq!(installed, vec!["ffmpeg", "ffprobe"]);
    assert!(!staging_dir.exists());
}

#[test]
fn sync_failure_stops_before_media_prompt() {
    let temp = project();
    let host = MockHost::new(PlatformKind::MacOs)
        .with_tool("python3", "Python 3.13.1")
        .with_tool("uv", "uv 0.5.11")
        .with_failing_command("uv sync");
    let sequencer = Sequencer::new(&host, BootstrapConfig::new(temp.path())).unwrap();
    let mut ui = MockUI::new();

    let err = sequencer.run(&mut ui).unwrap_err();

    assert!(matches!(err, BootstrapError::DependencySyncFailure { .. }));
    assert!(ui.prompts_shown().is_empty());
    assert_eq!(ui.stages().len(), 3);
}

#[test]
fn fresh_linux_machine_installs_in_order() {
    let temp = project();
    let host = MockHost::new(PlatformKind::Linux)
        .with_tool("apt-get", "apt 2.7.14 (amd64)")
        .with_tool("curl", "curl 8.5.0")
        .with_install_effect("apt-get install -y python3", "python3", "Python 3.12.3")
        .with_install_effect("astral.sh/uv/install.sh", "uv", "uv 0.5.11")
        .with_install_effect("apt-get install -y ffmpeg", "ffmpeg", "ffmpeg version 6.1.1");
    let mut config = BootstrapConfig::new(temp.path());
    config.media_answer = MediaAnswer::Yes;
    let sequencer = Sequencer::new(&host, config).unwrap();
    let mut ui = MockUI::new();

    let report = sequencer.run(&mut ui).unwrap();

    assert!(report.is_completed());
    assert!(report.made_changes());
    assert_eq!(
        host.commands(),
        vec![
            "sudo apt-get update && sudo apt-get install -y python3",
            "curl -LsSf https://astral.sh/uv/install.sh | sh",
            "uv sync",
            "sudo apt-get update && sudo apt-get install -y ffmpeg",
        ]
    );
}

#[test]
fn windows_uv_install_outside_path_requests_restart() {
    let temp = project();
    let host = MockHost::new(PlatformKind::Windows)
        .with_tool("python", "Python 3.12.8")
        .with_home(std::path::Path::new(r"C:\Users\me"));
    let sequencer = Sequencer::new(&host, BootstrapConfig::new(temp.path())).unwrap();
    let mut ui = MockUI::new();

    let report = sequencer.run(&mut ui).unwrap();

    assert!(matches!(report.outcome, Outcome::RestartRequired { .. }));
    assert!(!host.ran("uv sync"));
}
