//! Locating binaries inside an extracted archive.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// How deep to descend into an extracted archive.
const MAX_SEARCH_DEPTH: usize = 8;

/// Recursively search `root` for a file named `file_name`.
///
/// Names are compared case-insensitively. When several matches exist, one
/// sitting in a `bin` directory is preferred.
pub fn find_binary(root: &Path, file_name: &str) -> Option<PathBuf> {
    let matches: Vec<PathBuf> = WalkDir::new(root)
        .max_depth(MAX_SEARCH_DEPTH)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .flatten()
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            entry
                .file_name()
                .to_str()
                .is_some_and(|name| name.eq_ignore_ascii_case(file_name))
        })
        .map(|entry| entry.into_path())
        .collect();

    let in_bin = matches.iter().find(|path| {
        path.parent()
            .and_then(Path::file_name)
            .is_some_and(|dir| dir.eq_ignore_ascii_case("bin"))
    });

    in_bin.or_else(|| matches.first()).cloned()
}
