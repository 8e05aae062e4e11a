//! Installing FFmpeg from a downloaded archive.

use anyhow::{bail, Context};
use std::fs;
use std::path::{Path, PathBuf};

use super::archive::{self, ArchiveSource, ChecksumSource};
use super::checksum;
use super::locate::find_binary;
use super::MEDIA_TOOLS;
use crate::detection::PlatformKind;
use crate::error::{BootstrapError, Result};
use crate::fetch::HttpFetcher;
use crate::host::Host;

/// Where to stage and install an archive.
#[derive(Debug, Clone)]
pub struct ArchiveInstall<'a> {
    pub source: &'a ArchiveSource,
    pub staging_dir: &'a Path,
    pub bin_dir: &'a Path,
    pub platform: PlatformKind,
}

/// Download, verify and unpack an archive, copying `ffmpeg` and `ffprobe`
/// into the bin directory.
///
/// Returns the installed binaries. Every failure is reported as
/// [`BootstrapError::MediaToolDownloadFailure`]. The staging directory is
/// removed only when the install succeeds.
pub fn install_from_archive(
    install: &ArchiveInstall<'_>,
    fetcher: &HttpFetcher,
    host: &dyn Host,
    on_progress: &mut dyn FnMut(u64, Option<u64>),
) -> Result<Vec<PathBuf>> {
    let installed = run_install(install, fetcher, host, on_progress).map_err(|e| {
        BootstrapError::MediaToolDownloadFailure {
            message: format!("{:#}", e),
        }
    })?;

    fs::remove_dir_all(install.staging_dir).map_err(|e| {
        BootstrapError::MediaToolDownloadFailure {
            message: format!(
                "Installed FFmpeg but could not remove {}: {}",
                install.staging_dir.display(),
                e
            ),
        }
    })?;

    Ok(installed)
}

fn run_install(
    install: &ArchiveInstall<'_>,
    fetcher: &HttpFetcher,
    host: &dyn Host,
    on_progress: &mut dyn FnMut(u64, Option<u64>),
) -> anyhow::Result<Vec<PathBuf>> {
    let source = install.source;

    if install.staging_dir.exists() {
        fs::remove_dir_all(install.staging_dir).with_context(|| {
            format!("Failed to clear {}", install.staging_dir.display())
        })?;
    }
    fs::create_dir_all(install.staging_dir)
        .with_context(|| format!("Failed to create {}", install.staging_dir.display()))?;

    let archive_path = install.staging_dir.join(source.asset_name());
    tracing::info!("Downloading {}", source.url);
    fetcher.download_to_file(&source.url, &archive_path, on_progress)?;

    verify_archive(source, &archive_path, fetcher)?;

    let extracted = install.staging_dir.join("extracted");
    archive::extract(&archive_path, source.format, &extracted, host)?;

    let mut found = Vec::with_capacity(MEDIA_TOOLS.len());
    for tool in MEDIA_TOOLS {
        let file_name = install.platform.executable_name(tool);
        match find_binary(&extracted, &file_name) {
            Some(path) => found.push((file_name, path)),
            None => bail!("{} was not found in {}", file_name, source.asset_name()),
        }
    }

    fs::create_dir_all(install.bin_dir)
        .with_context(|| format!("Failed to create {}", install.bin_dir.display()))?;

    let mut installed = Vec::with_capacity(found.len());
    for (file_name, path) in found {
        let target = install.bin_dir.join(&file_name);
        fs::copy(&path, &target)
            .with_context(|| format!("Failed to copy {} to {}", file_name, target.display()))?;
        make_executable(&target)?;
        tracing::debug!("Installed {}", target.display());
        installed.push(target);
    }

    Ok(installed)
}

fn verify_archive(
    source: &ArchiveSource,
    archive_path: &Path,
    fetcher: &HttpFetcher,
) -> anyhow::Result<()> {
    let expected = match &source.checksum {
        ChecksumSource::None => {
            tracing::warn!("No checksum configured for {}; skipping verification", source.url);
            return Ok(());
        }
        ChecksumSource::Sha256(digest) => digest.clone(),
        ChecksumSource::Manifest { url } => {
            let listing = fetcher.fetch_text(url)?;
            match checksum::parse_sha256_for_asset(&listing, source.asset_name()) {
                Some(digest) => digest,
                None => bail!("{} is not listed in {}", source.asset_name(), url),
            }
        }
    };

    checksum::verify(archive_path, &expected)?;
    tracing::debug!("Checksum verified for {}", source.asset_name());
    Ok(())
}

#[cfg(unix)]
fn make_executable(path: &Path) -> anyhow::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o755))
        .with_context(|| format!("Failed to mark {} executable", path.display()))
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> anyhow::Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MockHost;
    use crate::media::ArchiveFormat;
    use httpmock::prelude::*;
    use std::io::{Cursor, Write};
    use tempfile::TempDir;
    use zip::write::SimpleFileOptions;

    fn zip_with(entries: &[&str]) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default();
        for name in entries {
            writer.start_file(*name, options).unwrap();
            writer.write_all(b"\x7fELF").unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    fn source(url: String, checksum: ChecksumSource) -> ArchiveSource {
        ArchiveSource {
            url,
            format: ArchiveFormat::Zip,
            checksum,
        }
    }

    #[test]
    fn installs_both_binaries_and_cleans_up() {
        let server = MockServer::start();
        let body = zip_with(&["ffmpeg-build/bin/ffmpeg", "ffmpeg-build/bin/ffprobe"]);
        let digest = hex::encode(<sha2::Sha256 as sha2::Digest>::digest(&body));
        server.mock(|when, then| {
            when.method(GET).path("/ffmpeg.zip");
            then.status(200).body(body.clone());
        });

        let temp = TempDir::new().unwrap();
        let staging = temp.path().join(".ffmpeg-download");
        let bin = temp.path().join("bin");
        let src = source(server.url("/ffmpeg.zip"), ChecksumSource::Sha256(digest));
        let install = ArchiveInstall {
            source: &src,
            staging_dir: &staging,
            bin_dir: &bin,
            platform: PlatformKind::Linux,
        };

        let fetcher = HttpFetcher::new().unwrap();
        let host = MockHost::new(PlatformKind::Linux);
        let installed = install_from_archive(&install, &fetcher, &host, &mut |_, _| {}).unwrap();

        assert_eq!(installed, vec![bin.join("ffmpeg"), bin.join("ffprobe")]);
        assert!(!staging.exists());
    }

    #[test]
    fn manifest_checksum_is_fetched_and_checked() {
        let server = MockServer::start();
        let body = zip_with(&["bin/ffmpeg", "bin/ffprobe"]);
        server.mock(|when, then| {
            when.method(GET).path("/ffmpeg.zip");
            then.status(200).body(body.clone());
        });
        server.mock(|when, then| {
            when.method(GET).path("/checksums.sha256");
            then.status(200)
                .body(format!("{}  ffmpeg.zip\n", "0".repeat(64)));
        });

        let temp = TempDir::new().unwrap();
        let staging = temp.path().join(".ffmpeg-download");
        let bin = temp.path().join("bin");
        let src = source(
            server.url("/ffmpeg.zip"),
            ChecksumSource::Manifest {
                url: server.url("/checksums.sha256"),
            },
        );
        let install = ArchiveInstall {
            source: &src,
            staging_dir: &staging,
            bin_dir: &bin,
            platform: PlatformKind::Linux,
        };

        let fetcher = HttpFetcher::new().unwrap();
        let host = MockHost::new(PlatformKind::Linux);
        let err = install_from_archive(&install, &fetcher, &host, &mut |_, _| {}).unwrap_err();

        assert!(matches!(err, BootstrapError::MediaToolDownloadFailure { .. }));
        assert!(err.to_string().contains("mismatch"));
        assert!(!bin.exists());
    }

    #[test]
    fn archive_without_ffprobe_is_a_failure() {
        let server = MockServer::start();
        let body = zip_with(&["bin/ffmpeg.exe"]);
        server.mock(|when, then| {
            when.method(GET).path("/ffmpeg.zip");
            then.status(200).body(body.clone());
        });

        let temp = TempDir::new().unwrap();
        let staging = temp.path().join(".ffmpeg-download");
        let bin = temp.path().join("bin");
        let src = source(server.url("/ffmpeg.zip"), ChecksumSource::None);
        let install = ArchiveInstall {
            source: &src,
            staging_dir: &staging,
            bin_dir: &bin,
            platform: PlatformKind::Windows,
        };

        let fetcher = HttpFetcher::new().unwrap();
        let host = MockHost::new(PlatformKind::Windows);
        let err = install_from_archive(&install, &fetcher, &host, &mut |_, _| {}).unwrap_err();

        assert!(err.to_string().contains("ffprobe.exe"));
        assert!(!bin.exists());
    }

    #[cfg(unix)]
    #[test]
    fn installed_binaries_are_executable() {
        use std::os::unix::fs::PermissionsExt;

        let server = MockServer::start();
        let body = zip_with(&["bin/ffmpeg", "bin/ffprobe"]);
        server.mock(|when, then| {
            when.method(GET).path("/ffmpeg.zip");
            then.status(200).body(body.clone());
        });

        let temp = TempDir::new().unwrap();
        let staging = temp.path().join(".ffmpeg-download");
        let bin = temp.path().join("bin");
        let src = source(server.url("/ffmpeg.zip"), ChecksumSource::None);
        let install = ArchiveInstall {
            source: &src,
            staging_dir: &staging,
            bin_dir: &bin,
            platform: PlatformKind::Linux,
        };

        let fetcher = HttpFetcher::new().unwrap();
        let host = MockHost::new(PlatformKind::Linux);
        install_from_archive(&install, &fetcher, &host, &mut |_, _| {}).unwrap();

        let mode = fs::metadata(bin.join("ffmpeg")).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
    }
}
