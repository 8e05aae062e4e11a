//! Media tool archives.

use anyhow::{anyhow, bail, Context, Result};
use serde::Serialize;
use std::fs::File;
use std::path::Path;
use zip::ZipArchive;

use crate::host::Host;

/// Container format of a downloaded archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArchiveFormat {
    Zip,
    TarXz,
    TarGz,
}

impl ArchiveFormat {
    /// Infer the format from a URL or file name.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.split(['?', '#']).next().unwrap_or(name).to_ascii_lowercase();
        if name.ends_with(".zip") {
            Some(Self::Zip)
        } else if name.ends_with(".tar.xz") || name.ends_with(".txz") {
            Some(Self::TarXz)
        } else if name.ends_with(".tar.gz") || name.ends_with(".tgz") {
            Some(Self::TarGz)
        } else {
            None
        }
    }
}

/// Where the expected digest of an archive comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChecksumSource {
    /// No verification.
    None,
    /// A known hex digest.
    Sha256(String),
    /// A `sha256sum`-style listing published alongside the archive.
    Manifest { url: String },
}

/// A downloadable media tool archive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArchiveSource {
    pub url: String,
    pub format: ArchiveFormat,
    pub checksum: ChecksumSource,
}

impl ArchiveSource {
    /// Build a source from a user-supplied URL and optional digest.
    pub fn from_url(url: &str, sha256: Option<&str>) -> Result<Self> {
        let format = ArchiveFormat::from_name(url).ok_or_else(|| {
            anyhow!(
                "Cannot tell the archive format of {} (expected .zip, .tar.xz or .tar.gz)",
                url
            )
        })?;
        let checksum = match sha256 {
            Some(digest) => ChecksumSource::Sha256(digest.trim().to_ascii_lowercase()),
            None => ChecksumSource::None,
        };
        Ok(Self {
            url: url.to_string(),
            format,
            checksum,
        })
    }

    /// File name of the archive, as listed in checksum manifests.
    pub fn asset_name(&self) -> &str {
        let path = self.url.split(['?', '#']).next().unwrap_or(&self.url);
        path.rsplit('/')
            .find(|segment| !segment.is_empty())
            .unwrap_or("ffmpeg-archive")
    }
}

/// Unpack `archive` into `dest`.
///
/// Zip files are read in-process; tarballs are handed to the system `tar`,
/// which ships with every supported platform including Windows 10+.
pub fn extract(archive: &Path, format: ArchiveFormat, dest: &Path, host: &dyn Host) -> Result<()> {
    std::fs::create_dir_all(dest)
        .with_context(|| format!("Failed to create {}", dest.display()))?;

    match format {
        ArchiveFormat::Zip => {
            let file = File::open(archive)
                .with_context(|| format!("Failed to open {}", archive.display()))?;
            let mut zip = ZipArchive::new(file).context("Failed to read zip archive")?;
            zip.extract(dest).context("Failed to extract zip archive")?;
        }
        ArchiveFormat::TarXz | ArchiveFormat::TarGz => {
            let command = format!(
                "tar -xf \"{}\" -C \"{}\"",
                archive.display(),
                dest.display()
            );
            let result = host.run(&command, None)?;
            if !result.success {
                bail!("tar {}: {}", result.describe_exit(), result.stderr.trim());
            }
        }
    }

    tracing::debug!("Extracted {} into {}", archive.display(), dest.display());
    Ok(())
}
