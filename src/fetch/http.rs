//! HTTP downloads.
//!
//! Installers, checksum listings and FFmpeg archives are fetched with a
//! blocking client. Large files are streamed to disk with a progress
//! callback rather than buffered in memory.

use anyhow::{bail, Context, Result};
use reqwest::blocking::Client;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use std::time::Duration;

use crate::config::defaults::DOWNLOAD_TIMEOUT;

/// Read buffer for streamed downloads.
const CHUNK_SIZE: usize = 64 * 1024;

/// Fetches text and files over HTTP/HTTPS.
pub struct HttpFetcher {
    client: Client,
    timeout: Duration,
}

impl HttpFetcher {
    /// Create a fetcher with the default download timeout.
    pub fn new() -> Result<Self> {
        Self::with_timeout(DOWNLOAD_TIMEOUT)
    }

    /// Create a fetcher with a custom timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("ytdl-bootstrap/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client, timeout })
    }

    /// Get the configured timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Fetch a small text document, such as a checksum listing.
    pub fn fetch_text(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send()?;

        if !response.status().is_success() {
            bail!("HTTP {} fetching {}", response.status(), url);
        }

        Ok(response.text()?)
    }

    /// Stream `url` into `dest`, returning the number of bytes written.
    ///
    /// `on_progress` receives the running byte count and the total size when
    /// the server reports one.
    pub fn download_to_file(
        &self,
        url: &str,
        dest: &Path,
        on_progress: &mut dyn FnMut(u64, Option<u64>),
    ) -> Result<u64> {
        let mut response = self.client.get(url).send()?;

        if !response.status().is_success() {
            bail!("HTTP {} downloading {}", response.status(), url);
        }

        let total = response.content_length();
        let mut file = File::create(dest)
            .with_context(|| format!("Failed to create {}", dest.display()))?;

        let mut downloaded = 0_u64;
        let mut buffer = vec![0_u8; CHUNK_SIZE];
        loop {
            let read = response
                .read(&mut buffer)
                .context("Failed to read download stream")?;
            if read == 0 {
                break;
            }
            file.write_all(&buffer[..read])
                .with_context(|| format!("Failed to write {}", dest.display()))?;
            downloaded += read as u64;
            on_progress(downloaded, total);
        }
        file.flush()?;

        if let Some(expected) = total {
            if downloaded != expected {
                bail!(
                    "Download of {} ended early ({} of {} bytes)",
                    url,
                    downloaded,
                    expected
                );
            }
        }

        tracing::debug!("Downloaded {} bytes from {}", downloaded, url);
        Ok(downloaded)
    }
}
