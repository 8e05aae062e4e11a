//! SHA-256 verification for downloaded archives.

use anyhow::{bail, Context, Result};
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::Read;
use std::path::Path;

fn is_sha256_hex(value: &str) -> bool {
    value.len() == 64 && value.chars().all(|ch| ch.is_ascii_hexdigit())
}

/// Hex-encoded SHA-256 of a file.
pub fn sha256_file(path: &Path) -> Result<String> {
    let mut file =
        File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let mut hasher = Sha256::new();
    let mut buffer = [0_u8; 64 * 1024];
    loop {
        let read = file.read(&mut buffer)?;
        if read == 0 {
            break;
        }
        hasher.update(&buffer[..read]);
    }
    Ok(hex::encode(hasher.finalize()))
}

/// Find the digest for `asset_name` in a `sha256sum`-style listing.
///
/// Accepts both `<hash>  <name>` and the binary-mode `<hash> *<name>` forms;
/// blank lines and `#` comments are skipped.
pub fn parse_sha256_for_asset(listing: &str, asset_name: &str) -> Option<String> {
    listing.lines().find_map(|line| {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return None;
        }
        let mut parts = line.split_whitespace();
        let hash = parts.next()?;
        let name = parts.next_back()?;
        let name = name.trim_start_matches('*').trim_start_matches("./");
        (name.eq_ignore_ascii_case(asset_name) && is_sha256_hex(hash))
            .then(|| hash.to_ascii_lowercase())
    })
}

/// Check a file against an expected hex digest.
pub fn verify(path: &Path, expected: &str) -> Result<()> {
    let expected = expected.trim().to_ascii_lowercase();
    if !is_sha256_hex(&expected) {
        bail!("Invalid SHA-256 digest: {}", expected);
    }
    let actual = sha256_file(path)?;
    if actual != expected {
        bail!("Checksum mismatch: expected {}, got {}", expected, actual);
    }
    Ok(())
}
