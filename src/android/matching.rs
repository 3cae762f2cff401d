//! Picking an SDK component directory by version range.

use std::path::Path;

use crate::sys::FileSystem;
use crate::version::{extract_version_token, Version, VersionRange};

/// Name of the subdirectory of `dir` holding the highest version in `range`.
///
/// Each entry name is scanned for an `X.Y.Z` token. When several entries
/// carry the winning version, the first one in listing order is returned.
pub fn matching_dir(fs: &dyn FileSystem, dir: &Path, range: &VersionRange) -> Option<String> {
    let entries = match fs.list_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::debug!("Cannot list {}: {}", dir.display(), e);
            return None;
        }
    };

    let versions: Vec<(String, Version)> = entries
        .into_iter()
        .filter_map(|name| extract_version_token(&name).map(|v| (name, v)))
        .collect();

    let best = range.max_satisfying(versions.iter().map(|(_, v)| v))?;
    tracing::debug!("Best match in {} for '{}': {}", dir.display(), range, best);

    versions
        .into_iter()
        .find(|(_, v)| *v == best)
        .map(|(name, _)| name)
}
