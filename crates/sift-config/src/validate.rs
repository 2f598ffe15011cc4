//! Configuration validation.
//!
//! Validates a loaded configuration against a site root and reports warnings for potential
//! issues.

use std::{fmt, fs, path::Path};

use globset::GlobMatcher;

use crate::{Config, patterns::compile_glob, resolve::resolve_output_dir};

/// A non-fatal warning about the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// The output directory does not exist.
    OutputDirMissing {
        /// Resolved output directory.
        path: String,
    },
    /// The output directory exists but is not a directory.
    OutputDirNotDirectory {
        /// Resolved output directory.
        path: String,
    },
    /// The output directory could not be resolved.
    OutputDirUnresolved {
        /// Configured output directory.
        path: String,
    },
    /// No file extension is configured, so nothing will be extracted.
    EmptyExtension,
    /// The content-root selector is empty.
    EmptyContentRoot,
    /// An exclude pattern is invalid.
    InvalidExcludePattern {
        /// The pattern.
        pattern: String,
    },
    /// An exclude pattern doesn't match any files.
    ExcludePatternMatchesNothing {
        /// The pattern.
        pattern: String,
    },
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutputDirMissing { path } => {
                write!(f, "output directory does not exist: {path}")
            }
            Self::OutputDirNotDirectory { path } => {
                write!(f, "output directory is not a directory: {path}")
            }
            Self::OutputDirUnresolved { path } => {
                write!(f, "output directory could not be resolved: {path}")
            }
            Self::EmptyExtension => write!(f, "no file extension configured"),
            Self::EmptyContentRoot => write!(f, "content root selector is empty"),
            Self::InvalidExcludePattern { pattern } => {
                write!(f, "exclude pattern '{pattern}' is not a valid glob")
            }
            Self::ExcludePatternMatchesNothing { pattern } => {
                write!(f, "exclude pattern '{pattern}' matches no files")
            }
        }
    }
}

/// Validates the configuration for a site root and returns any warnings.
pub fn validate_config(config: &Config, site_root: &Path) -> Vec<ConfigWarning> {
    let mut warnings = Vec::new();

    if config.source.extension.trim().is_empty() {
        warnings.push(ConfigWarning::EmptyExtension);
    }
    if config.extract.content_root.trim().is_empty() {
        warnings.push(ConfigWarning::EmptyContentRoot);
    }

    let Ok(output_dir) = resolve_output_dir(&config.source.output_dir, site_root) else {
        warnings.push(ConfigWarning::OutputDirUnresolved {
            path: config.source.output_dir.clone(),
        });
        return warnings;
    };

    if !output_dir.exists() {
        warnings.push(ConfigWarning::OutputDirMissing {
            path: output_dir.display().to_string(),
        });
        return warnings; // Can't validate patterns if the directory doesn't exist
    }
    if !output_dir.is_dir() {
        warnings.push(ConfigWarning::OutputDirNotDirectory {
            path: output_dir.display().to_string(),
        });
        return warnings;
    }

    for pattern in &config.source.exclude {
        let Ok(glob) = compile_glob(pattern) else {
            warnings.push(ConfigWarning::InvalidExcludePattern {
                pattern: pattern.clone(),
            });
            continue;
        };
        if !walk_and_match(&output_dir, &output_dir, &glob.compile_matcher()) {
            warnings.push(ConfigWarning::ExcludePatternMatchesNothing {
                pattern: pattern.clone(),
            });
        }
    }

    warnings
}

/// Recursively walks a directory and checks if any file matches the pattern.
fn walk_and_match(root: &Path, current: &Path, matcher: &GlobMatcher) -> bool {
    let Ok(entries) = fs::read_dir(current) else {
        return false;
    };

    for entry in entries.flatten() {
        let path = entry.path();

        let Ok(relative) = path.strip_prefix(root) else {
            continue;
        };

        if path.is_file() && matcher.is_match(relative) {
            return true;
        }

        if path.is_dir() && walk_and_match(root, &path, matcher) {
            return true;
        }
    }

    false
}
