//! Page discovery.
//!
//! Walks the build output directory to find rendered pages, applying the configured extension
//! and exclude patterns and skipping hidden entries and symlinks.

use std::{
    ffi::OsStr,
    path::{Path, PathBuf},
};

use sift_config::ExcludePatterns;
use sift_document::route_for;
use tracing::warn;
use walkdir::WalkDir;

use crate::ExtractError;

/// A page discovered for extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredPage {
    /// Absolute path to the file.
    pub abs_path: PathBuf,
    /// Path relative to the output directory.
    pub rel_path: PathBuf,
    /// Site-relative route derived from the path.
    pub route: String,
}

/// Discovers every page under `output_dir` with the given extension.
///
/// Pages are returned sorted by path. The extension is compared case-insensitively and without
/// a leading dot. Entries that cannot be read during the walk are logged and skipped.
pub fn discover_pages(
    output_dir: &Path,
    extension: &str,
    excludes: &ExcludePatterns,
) -> Result<Vec<DiscoveredPage>, ExtractError> {
    if !output_dir.is_dir() {
        return Err(ExtractError::OutputDirMissing {
            path: output_dir.to_path_buf(),
        });
    }

    let extension = extension.trim_start_matches('.');
    let mut pages = Vec::new();

    for entry in WalkDir::new(output_dir)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e.file_name()))
    {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!(error = %e, "skipping unreadable entry");
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let abs_path = entry.path().to_path_buf();
        if !has_extension(&abs_path, extension) {
            continue;
        }

        let Ok(rel_path) = abs_path.strip_prefix(output_dir).map(Path::to_path_buf) else {
            continue;
        };
        if excludes.is_excluded(&rel_path) {
            continue;
        }

        let Some(route) = route_for(&abs_path, output_dir) else {
            continue;
        };

        pages.push(DiscoveredPage {
            abs_path,
            rel_path,
            route,
        });
    }

    Ok(pages)
}

/// Checks if a filename represents a hidden entry (starts with '.').
fn is_hidden(name: &OsStr) -> bool {
    name.to_str().is_some_and(|s| s.starts_with('.'))
}

/// Checks a path's extension, ignoring ASCII case.
fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(extension))
}
