//! Exclude pattern compilation and matching.
//!
//! Compiles the `[source] exclude` globs into a single matcher used during discovery.

use std::path::Path;

use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::ConfigError;

/// Compiled exclude globs. Paths are matched relative to the output directory.
#[derive(Debug, Clone)]
pub struct ExcludePatterns {
    /// Combined matcher for all patterns.
    set: GlobSet,
}

impl ExcludePatterns {
    /// Compiles exclude patterns into an efficient matcher.
    pub fn compile(patterns: &[String]) -> Result<Self, ConfigError> {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            builder.add(compile_glob(pattern)?);
        }
        let set = builder.build().map_err(|e| ConfigError::InvalidPattern {
            pattern: "<combined exclude patterns>".to_string(),
            source: e,
        })?;
        Ok(Self { set })
    }

    /// Returns a matcher that excludes nothing.
    pub fn empty() -> Self {
        Self {
            set: GlobSet::empty(),
        }
    }

    /// Checks whether a path relative to the output directory is excluded.
    pub fn is_excluded(&self, rel_path: &Path) -> bool {
        self.set.is_match(rel_path)
    }

    /// Returns true if no patterns were compiled.
    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }
}

impl Default for ExcludePatterns {
    fn default() -> Self {
        Self::empty()
    }
}

/// Compiles a single glob pattern.
pub fn compile_glob(pattern: &str) -> Result<Glob, ConfigError> {
    Glob::new(pattern).map_err(|e| ConfigError::InvalidPattern {
        pattern: pattern.to_string(),
        source: e,
    })
}
