//! Path resolution for the output directory.

use std::path::{Path, PathBuf};

use directories::BaseDirs;

use crate::ConfigError;

/// Resolves the configured output directory against a site root.
///
/// Handles three cases:
/// - Tilde paths (`~/site/out`) - expanded to home directory
/// - Relative paths (`.next/server/app`) - joined onto `site_root`
/// - Absolute paths - returned as-is
///
/// The directory is not required to exist; discovery reports a missing directory.
pub fn resolve_output_dir(output_dir: &str, site_root: &Path) -> Result<PathBuf, ConfigError> {
    let expanded = expand_tilde(output_dir)?;

    if expanded.is_absolute() {
        Ok(expanded)
    } else {
        Ok(site_root.join(expanded))
    }
}

/// Expands a tilde prefix to the home directory.
///
/// - `~` alone becomes the home directory
/// - `~/foo` becomes home directory joined with `foo`
/// - Paths not starting with `~` are returned unchanged
fn expand_tilde(path: &str) -> Result<PathBuf, ConfigError> {
    if path == "~" {
        return home_dir();
    }

    if let Some(rest) = path.strip_prefix("~/") {
        let home = home_dir()?;
        return Ok(home.join(rest));
    }

    Ok(PathBuf::from(path))
}

/// Returns the home directory.
fn home_dir() -> Result<PathBuf, ConfigError> {
    BaseDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .ok_or(ConfigError::NoHomeDirectory)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TestDir;

    #[test]
    fn test_resolve_relative_path() {
        let test_dir = TestDir::new();
        let resolved = resolve_output_dir(".next/server/app", test_dir.path()).unwrap();
        assert_eq!(resolved, test_dir.path().join(".next/server/app"));
    }

    #[test]
    fn test_resolve_absolute_path() {
        let test_dir = TestDir::new();
        let out = test_dir.create_dir("out");
        let resolved = resolve_output_dir(out.to_str().unwrap(), Path::new("/elsewhere")).unwrap();
        assert_eq!(resolved, out);
    }

    #[test]
    fn test_resolve_missing_dir_is_not_an_error() {
        let resolved = resolve_output_dir("dist", Path::new("/nonexistent/site")).unwrap();
        assert_eq!(resolved, PathBuf::from("/nonexistent/site/dist"));
    }

    #[test]
    fn test_expand_tilde() {
        let home = home_dir().unwrap();
        assert_eq!(expand_tilde("~").unwrap(), home);
        assert_eq!(expand_tilde("~/site/out").unwrap(), home.join("site/out"));
        assert_eq!(expand_tilde("out/~x").unwrap(), PathBuf::from("out/~x"));
    }
}
