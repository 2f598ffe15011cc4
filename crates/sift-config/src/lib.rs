//! Configuration system for sift.
//!
//! sift uses TOML configuration files named `.sift.toml`. Configuration is resolved by walking
//! up the directory tree from the current working directory, collecting any `.sift.toml` files
//! found, then loading `~/.sift.toml` as the global config with lowest precedence. Every setting
//! has a default, so running without any configuration file is fine.

#![warn(missing_docs)]

mod discovery;
mod error;
mod merge;
mod parse;
mod patterns;
mod resolve;
mod templates;
#[cfg(test)]
mod test_support;
mod validate;

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

pub use discovery::{CONFIG_FILENAME, discover_config_files, global_config_path, is_global_config};
pub use error::ConfigError;
pub use merge::{ParsedConfig, merge_configs};
pub use parse::{
    RawBatchSettings, RawConfig, RawExtractSettings, RawParseSettings, RawSourceSettings,
    parse_config_file, parse_config_str,
};
pub use patterns::ExcludePatterns;
pub use resolve::resolve_output_dir;
use serde::{Deserialize, Serialize};
pub use templates::config_template;
pub use validate::ConfigWarning;
use validate::validate_config;

/// Top-level merged configuration for sift.
///
/// This represents the fully resolved configuration after merging all discovered
/// `.sift.toml` files according to precedence rules.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Where pages are found.
    pub source: SourceSettings,
    /// How pages are segmented.
    pub extract: ExtractSettings,
    /// How markup is modelled.
    pub parse: ParseSettings,
    /// Batch behavior.
    pub batch: BatchSettings,
    /// Directory containing the most specific config file.
    pub config_root: Option<PathBuf>,
}

impl Config {
    /// Loads configuration by discovering and merging all relevant `.sift.toml` files.
    ///
    /// Returns `Ok(Config::default())` if no configuration files are found.
    pub fn load(cwd: &Path) -> Result<Self, ConfigError> {
        let config_files = discover_config_files(cwd);
        Self::load_from_files(&config_files)
    }

    /// Loads configuration from a specific list of config file paths.
    ///
    /// Files should be provided in precedence order: highest precedence first.
    pub fn load_from_files(files: &[PathBuf]) -> Result<Self, ConfigError> {
        let parsed = files
            .iter()
            .map(|path| {
                let config = parse_config_file(path)?;
                Ok(ParsedConfig {
                    path: path.clone(),
                    config,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        Ok(merge_configs(&parsed))
    }

    /// Resolves the output directory against a site root.
    pub fn output_dir(&self, site_root: &Path) -> Result<PathBuf, ConfigError> {
        resolve_output_dir(&self.source.output_dir, site_root)
    }

    /// Compiles the exclude patterns.
    pub fn compile_excludes(&self) -> Result<ExcludePatterns, ConfigError> {
        ExcludePatterns::compile(&self.source.exclude)
    }

    /// Validates the configuration against a site root and returns any warnings.
    ///
    /// This checks for:
    /// - An output directory that doesn't exist or isn't a directory
    /// - Empty extension or content-root selector
    /// - Exclude patterns that are invalid or match no files
    pub fn validate(&self, site_root: &Path) -> Vec<ConfigWarning> {
        validate_config(self, site_root)
    }

    /// Serializes the effective settings to TOML format.
    ///
    /// The output uses the same layout as a `.sift.toml` file.
    pub fn settings_to_toml(&self) -> Result<String, toml::ser::Error> {
        let serializable = SerializableSettings {
            source: &self.source,
            extract: &self.extract,
            parse: &self.parse,
            batch: &self.batch,
        };
        toml::to_string_pretty(&serializable)
    }
}

/// Settings for locating pages.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SourceSettings {
    /// Build output directory, relative to the site root.
    pub output_dir: String,
    /// Extension of files to extract, without the dot.
    pub extension: String,
    /// Exclude globs relative to the output directory.
    pub exclude: Vec<String>,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            output_dir: String::from(".next/server/app"),
            extension: String::from("html"),
            exclude: Vec::new(),
        }
    }
}

/// Settings for segmenting pages.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ExtractSettings {
    /// CSS selector for the content root.
    pub content_root: String,
    /// Tags whose subtrees are skipped.
    pub ignore: Vec<String>,
}

impl Default for ExtractSettings {
    fn default() -> Self {
        Self {
            content_root: String::from("main"),
            ignore: vec![String::from("code"), String::from("nav")],
        }
    }
}

/// Settings for modelling parsed markup.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ParseSettings {
    /// Whether comments are modelled as nodes.
    pub comments: bool,
    /// Tags whose children are opaque: `true` keeps their text, `false` drops it.
    pub block_text: BTreeMap<String, bool>,
}

impl Default for ParseSettings {
    fn default() -> Self {
        Self {
            comments: false,
            block_text: BTreeMap::from([
                (String::from("script"), false),
                (String::from("style"), false),
            ]),
        }
    }
}

/// Settings for a batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct BatchSettings {
    /// Abort the batch on the first file that cannot be read.
    pub fail_fast: bool,
}

/// Internal struct for TOML serialization of settings.
#[derive(Serialize)]
struct SerializableSettings<'a> {
    /// Source settings.
    source: &'a SourceSettings,
    /// Extract settings.
    extract: &'a ExtractSettings,
    /// Parse settings.
    parse: &'a ParseSettings,
    /// Batch settings.
    batch: &'a BatchSettings,
}
