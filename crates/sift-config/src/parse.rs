//! Configuration file parsing.
//!
//! Parses individual `.sift.toml` files into intermediate `RawConfig` structures
//! that preserve the optional nature of all fields before merging.

use std::{collections::BTreeMap, fs, path::Path};

use serde::Deserialize;
use serde_with::{OneOrMany, serde_as};
#[cfg(test)]
use toml::de::Error as TomlError;

use crate::ConfigError;

/// Raw configuration as parsed directly from a TOML file.
///
/// All fields are optional to support partial configs that will be merged.
/// This mirrors the TOML schema exactly.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// When true, stop discovery here - ignore parent and global configs.
    pub root: Option<bool>,
    /// Where pages are found.
    pub source: Option<RawSourceSettings>,
    /// How pages are segmented.
    pub extract: Option<RawExtractSettings>,
    /// How markup is modelled.
    pub parse: Option<RawParseSettings>,
    /// Batch behavior.
    pub batch: Option<RawBatchSettings>,
}

/// Raw `[source]` section.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawSourceSettings {
    /// Build output directory relative to the site root.
    pub output_dir: Option<String>,
    /// File extension to extract.
    pub extension: Option<String>,
    /// Exclude globs relative to the output directory. A single string or a list.
    #[serde_as(as = "Option<OneOrMany<_>>")]
    pub exclude: Option<Vec<String>>,
}

/// Raw `[extract]` section.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawExtractSettings {
    /// CSS selector for the content root.
    pub content_root: Option<String>,
    /// Ignored tags. A single string or a list.
    #[serde_as(as = "Option<OneOrMany<_>>")]
    pub ignore: Option<Vec<String>>,
}

/// Raw `[parse]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawParseSettings {
    /// Whether comments are modelled as nodes.
    pub comments: Option<bool>,
    /// Per-tag opaque text rules.
    pub block_text: Option<BTreeMap<String, bool>>,
}

/// Raw `[batch]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawBatchSettings {
    /// Abort on the first failing file.
    pub fail_fast: Option<bool>,
}

/// Parses a configuration file from disk.
///
/// Returns a `RawConfig` with all fields as optionals, ready for merging.
pub fn parse_config_file(path: &Path) -> Result<RawConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config_str(&contents, path)
}

/// Parses configuration from a TOML string.
///
/// The `path` parameter is used for error reporting.
pub fn parse_config_str(contents: &str, path: &Path) -> Result<RawConfig, ConfigError> {
    toml::from_str(contents).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

/// Parses configuration from a TOML string without path context (tests only).
#[cfg(test)]
pub fn parse_config(contents: &str) -> Result<RawConfig, TomlError> {
    toml::from_str(contents)
}

/// Checks if a config file has `root = true` set.
///
/// Returns false if the file cannot be read or parsed.
pub fn is_root_config(path: &Path) -> bool {
    let Ok(contents) = fs::read_to_string(path) else {
        return false;
    };
    let Ok(config) = toml::from_str::<RawConfig>(&contents) else {
        return false;
    };
    config.root == Some(true)
}
