//! Site description for a batch run.

use std::path::{Path, PathBuf};

use sift_config::{Config, ExcludePatterns};
use sift_document::{ExtractOptions, ParseOptions};

use crate::ExtractError;

/// Everything a batch run needs to know about a site.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Absolute build output directory.
    pub output_dir: PathBuf,
    /// Page file extension, without the dot.
    pub extension: String,
    /// Compiled exclude globs.
    pub excludes: ExcludePatterns,
    /// Per-page extraction options.
    pub extract: ExtractOptions,
    /// Abort on the first page that cannot be read.
    pub fail_fast: bool,
}

impl SiteConfig {
    /// Creates a site description with default settings for an output directory.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            extension: String::from("html"),
            excludes: ExcludePatterns::empty(),
            extract: ExtractOptions::default(),
            fail_fast: false,
        }
    }

    /// Builds a site description from loaded configuration.
    ///
    /// The configured output directory is resolved against `site_root`.
    pub fn from_config(config: &Config, site_root: &Path) -> Result<Self, ExtractError> {
        Ok(Self {
            output_dir: config.output_dir(site_root)?,
            extension: config.source.extension.clone(),
            excludes: config.compile_excludes()?,
            extract: extract_options(config),
            fail_fast: config.batch.fail_fast,
        })
    }
}

/// Builds per-page extraction options from loaded configuration.
pub fn extract_options(config: &Config) -> ExtractOptions {
    ExtractOptions {
        content_root: config.extract.content_root.clone(),
        ignore: config.extract.ignore.clone(),
        parse: ParseOptions {
            comments: config.parse.comments,
            block_text: config.parse.block_text.clone(),
        },
    }
}

#[cfg(test)]
mod tests {
    use sift_config::{ParsedConfig, merge_configs, parse_config_str};

    use super::*;

    #[test]
    fn test_new_uses_defaults() {
        let site = SiteConfig::new("/site/out");
        assert_eq!(site.output_dir, PathBuf::from("/site/out"));
        assert_eq!(site.extension, "html");
        assert!(site.excludes.is_empty());
        assert_eq!(site.extract, ExtractOptions::default());
        assert!(!site.fail_fast);
    }

    #[test]
    fn test_from_config() {
        let path = Path::new("/site/.sift.toml");
        let raw = parse_config_str(
            r#"
[source]
output_dir = "dist"
exclude = "404.html"

[extract]
content_root = "article"
ignore = ["aside"]

[parse]
comments = true

[batch]
fail_fast = true
"#,
            path,
        )
        .unwrap();
        let config = merge_configs(&[ParsedConfig {
            path: path.to_path_buf(),
            config: raw,
        }]);

        let site = SiteConfig::from_config(&config, Path::new("/site")).unwrap();

        assert_eq!(site.output_dir, PathBuf::from("/site/dist"));
        assert!(site.excludes.is_excluded(Path::new("404.html")));
        assert_eq!(site.extract.content_root, "article");
        assert_eq!(site.extract.ignore, vec!["aside"]);
        assert!(site.extract.parse.comments);
        assert_eq!(site.extract.parse.block_text.get("script"), Some(&false));
        assert!(site.fail_fast);
    }

    #[test]
    fn test_extract_options_from_default_config() {
        assert_eq!(extract_options(&Config::default()), ExtractOptions::default());
    }

    #[test]
    fn test_from_config_rejects_bad_exclude() {
        let mut config = Config::default();
        config.source.exclude = vec!["[".to_string()];
        let err = SiteConfig::from_config(&config, Path::new("/site")).unwrap_err();
        assert!(matches!(err, ExtractError::Config(_)));
    }
}
