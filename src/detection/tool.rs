//! Tool availability probing.

use regex::Regex;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use crate::host::Host;

/// Version patterns, tried in order against probe output.
static VERSION_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [r"(\d+\.\d+\.\d+)", r"version\s+(\d+\.\d+)", r"v(\d+\.\d+)", r"(\d+\.\d+)"]
        .iter()
        .filter_map(|p| Regex::new(p).ok())
        .collect()
});

/// A version query: a program and the arguments that make it print its version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionQuery {
    pub program: &'static str,
    pub args: &'static [&'static str],
}

impl VersionQuery {
    /// Create a version query.
    pub const fn new(program: &'static str, args: &'static [&'static str]) -> Self {
        Self { program, args }
    }
}

/// Whether a tool was found, and which version answered.
///
/// Derived fresh on every probe; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolAvailability {
    /// Tool name as shown to the user.
    pub tool_name: String,
    /// Whether the tool is usable.
    pub found: bool,
    /// Version parsed from the probe output, if any.
    pub version: Option<String>,
    /// Where the tool was found, when located by path rather than by query.
    pub location: Option<PathBuf>,
}

impl ToolAvailability {
    /// A tool that was not found.
    pub fn missing(tool_name: &str) -> Self {
        Self {
            tool_name: tool_name.to_string(),
            found: false,
            version: None,
            location: None,
        }
    }

    /// A tool that answered a version query.
    pub fn found(tool_name: &str, version: Option<String>) -> Self {
        Self {
            tool_name: tool_name.to_string(),
            found: true,
            version,
            location: None,
        }
    }

    /// A tool located on disk.
    pub fn at_path(tool_name: &str, path: &Path) -> Self {
        Self {
            tool_name: tool_name.to_string(),
            found: true,
            version: None,
            location: Some(path.to_path_buf()),
        }
    }

    /// One-line description for status output.
    pub fn describe(&self) -> String {
        match (&self.version, &self.location) {
            _ if !self.found => "not found".to_string(),
            (Some(v), _) => v.clone(),
            (None, Some(path)) => format!("found at {}", path.display()),
            (None, None) => "found".to_string(),
        }
    }
}

/// Probe a tool by trying each version query in order.
///
/// The first query that exits successfully wins. Some tools print their
/// version to stderr, so both streams are searched.
pub fn detect_tool(host: &dyn Host, tool_name: &str, queries: &[VersionQuery]) -> ToolAvailability {
    detect_tool_where(host, tool_name, queries, |_| true)
}

/// Like [`detect_tool`], but a query only counts when the parsed version
/// satisfies `accept`. Rejected answers fall through to the next query.
pub fn detect_tool_where(
    host: &dyn Host,
    tool_name: &str,
    queries: &[VersionQuery],
    accept: impl Fn(Option<&str>) -> bool,
) -> ToolAvailability {
    let answer = queries.iter().find_map(|query| {
        let result = host
            .query(query.program, query.args)
            .filter(|result| result.success)?;
        let version = extract_version(&result.stdout).or_else(|| extract_version(&result.stderr));
        if !accept(version.as_deref()) {
            tracing::debug!(
                "Ignoring `{}` for {} ({})",
                query.program,
                tool_name,
                version.as_deref().unwrap_or("unknown version")
            );
            return None;
        }
        Some((query, version))
    });

    match answer {
        Some((query, version)) => {
            tracing::debug!(
                "{} found via `{}` ({})",
                tool_name,
                query.program,
                version.as_deref().unwrap_or("unknown version")
            );
            ToolAvailability::found(tool_name, version)
        }
        None => {
            tracing::debug!("{} not found", tool_name);
            ToolAvailability::missing(tool_name)
        }
    }
}

/// Extract a version number from command output.
pub fn extract_version(output: &str) -> Option<String> {
    VERSION_PATTERNS.iter().find_map(|re| {
        re.captures(output)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    })
}
