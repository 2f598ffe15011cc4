//! Configuration merging.
//!
//! Merges multiple `RawConfig` files into a single resolved `Config`, applying precedence rules.

use std::path::PathBuf;

use crate::{
    BatchSettings, Config, ExtractSettings, ParseSettings, SourceSettings,
    parse::{RawBatchSettings, RawConfig, RawExtractSettings, RawParseSettings, RawSourceSettings},
};

/// A parsed config file with its source path.
pub struct ParsedConfig {
    /// Path to the config file.
    pub path: PathBuf,
    /// Parsed raw configuration.
    pub config: RawConfig,
}

/// Merges multiple configuration files into a single resolved `Config`.
///
/// Configs should be provided in precedence order: highest precedence first (closest to CWD),
/// lowest precedence last (global config).
///
/// Merge rules:
/// - Scalar settings: first defined value wins (highest precedence)
/// - Lists (`exclude`, `ignore`): first defined list wins completely
/// - `block_text`: merged per tag, first definition for each tag wins
pub fn merge_configs(configs: &[ParsedConfig]) -> Config {
    let mut config = Config::default();

    // Iterate in reverse (lowest precedence first) so higher precedence overwrites
    for parsed in configs.iter().rev() {
        let raw = &parsed.config;
        if let Some(ref source) = raw.source {
            apply_raw_source(&mut config.source, source);
        }
        if let Some(ref extract) = raw.extract {
            apply_raw_extract(&mut config.extract, extract);
        }
        if let Some(ref parse) = raw.parse {
            apply_raw_parse(&mut config.parse, parse);
        }
        if let Some(ref batch) = raw.batch {
            apply_raw_batch(&mut config.batch, batch);
        }
    }

    config.config_root = configs
        .first()
        .and_then(|c| c.path.parent())
        .map(PathBuf::from);

    config
}

/// Applies raw source settings, overwriting any present values.
fn apply_raw_source(result: &mut SourceSettings, raw: &RawSourceSettings) {
    if let Some(ref v) = raw.output_dir {
        result.output_dir.clone_from(v);
    }
    if let Some(ref v) = raw.extension {
        result.extension = v.trim_start_matches('.').to_string();
    }
    if let Some(ref v) = raw.exclude {
        result.exclude.clone_from(v);
    }
}

/// Applies raw extract settings.
fn apply_raw_extract(result: &mut ExtractSettings, raw: &RawExtractSettings) {
    if let Some(ref v) = raw.content_root {
        result.content_root.clone_from(v);
    }
    if let Some(ref v) = raw.ignore {
        result.ignore.clone_from(v);
    }
}

/// Applies raw parse settings. Block-text rules are merged tag by tag.
fn apply_raw_parse(result: &mut ParseSettings, raw: &RawParseSettings) {
    if let Some(v) = raw.comments {
        result.comments = v;
    }
    if let Some(ref rules) = raw.block_text {
        for (tag, keep) in rules {
            result.block_text.insert(tag.to_ascii_lowercase(), *keep);
        }
    }
}

/// Applies raw batch settings.
fn apply_raw_batch(result: &mut BatchSettings, raw: &RawBatchSettings) {
    if let Some(v) = raw.fail_fast {
        result.fail_fast = v;
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::parse::parse_config_str;

    fn parsed(path: &str, toml: &str) -> ParsedConfig {
        ParsedConfig {
            path: PathBuf::from(path),
            config: parse_config_str(toml, Path::new(path)).unwrap(),
        }
    }

    #[test]
    fn test_merge_empty_configs() {
        let config = merge_configs(&[]);
        assert_eq!(config.source.output_dir, ".next/server/app");
        assert!(config.config_root.is_none());
    }

    #[test]
    fn test_merge_single_config() {
        let configs = [parsed(
            "/site/.sift.toml",
            "[extract]\ncontent_root = \"article\"\n",
        )];
        let config = merge_configs(&configs);

        assert_eq!(config.extract.content_root, "article");
        assert_eq!(config.extract.ignore, vec!["code", "nav"]);
        assert_eq!(config.config_root, Some(PathBuf::from("/site")));
    }

    #[test]
    fn test_merge_scalar_override() {
        let configs = [
            parsed("/site/docs/.sift.toml", "[source]\nextension = \".htm\"\n"),
            parsed(
                "/site/.sift.toml",
                "[source]\nextension = \"html\"\noutput_dir = \"dist\"\n[batch]\nfail_fast = true\n",
            ),
        ];
        let config = merge_configs(&configs);

        // Closest wins, lower precedence fills the gaps
        assert_eq!(config.source.extension, "htm");
        assert_eq!(config.source.output_dir, "dist");
        assert!(config.batch.fail_fast);
        assert_eq!(config.config_root, Some(PathBuf::from("/site/docs")));
    }

    #[test]
    fn test_merge_lists_replace() {
        let configs = [
            parsed("/a/b/.sift.toml", "[extract]\nignore = [\"aside\"]\n"),
            parsed("/a/.sift.toml", "[extract]\nignore = [\"nav\", \"footer\"]\n"),
        ];
        let config = merge_configs(&configs);
        assert_eq!(config.extract.ignore, vec!["aside"]);
    }

    #[test]
    fn test_merge_block_text_per_tag() {
        let configs = [
            parsed("/a/b/.sift.toml", "[parse.block_text]\nscript = true\n"),
            parsed(
                "/a/.sift.toml",
                "[parse]\ncomments = true\n[parse.block_text]\nscript = false\nPRE = true\n",
            ),
        ];
        let config = merge_configs(&configs);

        assert!(config.parse.comments);
        assert_eq!(config.parse.block_text.get("script"), Some(&true));
        assert_eq!(config.parse.block_text.get("pre"), Some(&true));
        assert_eq!(config.parse.block_text.get("style"), Some(&false));
    }
}
