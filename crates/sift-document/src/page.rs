//! Per-page extraction.
//!
//! A [`PageExtractor`] turns one rendered HTML page into a [`PageRecord`]: it locates the
//! content root, reads the page title from the first `h1`, and segments the content root.

use std::path::{Component, Path};

use scraper::Selector;
use tracing::debug;

use crate::{
    DocumentError, PageRecord,
    normalize::normalize_whitespace,
    parse::{ParseOptions, parse_document, to_node},
    segment::{DEFAULT_IGNORED_TAGS, IgnoreSet, segment},
};

/// Default CSS selector for the content root.
pub const DEFAULT_CONTENT_ROOT: &str = "main";

/// Options for building a [`PageExtractor`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractOptions {
    /// CSS selector for the content root. The first match is used.
    pub content_root: String,
    /// Tags whose subtrees are skipped during segmentation.
    pub ignore: Vec<String>,
    /// How the content root is modelled.
    pub parse: ParseOptions,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            content_root: DEFAULT_CONTENT_ROOT.to_string(),
            ignore: DEFAULT_IGNORED_TAGS.iter().map(ToString::to_string).collect(),
            parse: ParseOptions::default(),
        }
    }
}

/// Extracts page records from HTML source.
#[derive(Debug)]
pub struct PageExtractor {
    /// Compiled content-root selector.
    content_root: Selector,
    /// Source text of the content-root selector, for diagnostics.
    content_root_source: String,
    /// Tags pruned during segmentation.
    ignore: IgnoreSet,
    /// Parse options.
    parse: ParseOptions,
}

impl PageExtractor {
    /// Compiles an extractor from options.
    ///
    /// Fails if the content-root selector is empty or is not valid CSS.
    pub fn new(options: &ExtractOptions) -> Result<Self, DocumentError> {
        let source = options.content_root.trim();
        if source.is_empty() {
            return Err(DocumentError::InvalidSelector {
                selector: options.content_root.clone(),
                message: "selector is empty".to_string(),
            });
        }
        let content_root =
            Selector::parse(source).map_err(|e| DocumentError::InvalidSelector {
                selector: source.to_string(),
                message: e.to_string(),
            })?;

        Ok(Self {
            content_root,
            content_root_source: source.to_string(),
            ignore: IgnoreSet::new(&options.ignore),
            parse: options.parse.clone(),
        })
    }

    /// Returns the content-root selector as written.
    pub fn content_root(&self) -> &str {
        &self.content_root_source
    }

    /// Extracts a page from HTML source.
    ///
    /// Returns `None` when the document has no content root; the caller decides how to report
    /// the skip.
    pub fn extract(&self, html: &str, route: impl Into<String>) -> Option<PageRecord> {
        let document = parse_document(html);
        let root_ref = document.select(&self.content_root).next()?;
        let root = to_node(root_ref, &self.parse);

        let title = root
            .find_first("h1")
            .map(|h1| normalize_whitespace(&h1.text()))
            .unwrap_or_default();
        let sections = segment(&root, &self.ignore);
        let route = route.into();

        debug!(route = %route, sections = sections.len(), "extracted page");

        Some(PageRecord {
            route,
            title,
            sections,
        })
    }
}

/// Derives a site-relative route from a file path.
///
/// The `output_dir` prefix and the file extension are removed and the remaining components are
/// joined with `/`, so `<out>/guide/intro.html` becomes `/guide/intro`. Returns `None` when
/// `path` does not live under `output_dir`.
pub fn route_for(path: &Path, output_dir: &Path) -> Option<String> {
    let rel = path.strip_prefix(output_dir).ok()?.with_extension("");

    let mut route = String::new();
    for component in rel.components() {
        if let Component::Normal(part) = component {
            route.push('/');
            route.push_str(&part.to_string_lossy());
        }
    }

    if route.is_empty() {
        None
    } else {
        Some(route)
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn extractor() -> PageExtractor {
        PageExtractor::new(&ExtractOptions::default()).unwrap()
    }

    #[test]
    fn test_extracts_title_and_sections() {
        let html = r##"
            <html><head><title>ignored</title></head>
            <body>
              <nav><a href="/">Home</a></nav>
              <main>
                <h1>
                  Getting   Started
                </h1>
                <p>Welcome.</p>
                <div><a href="#install">#</a><h2>Install</h2></div>
                <p>Run the <code>installer</code> twice.</p>
                <h3>Verify</h3>
                <pre><code>sift --version</code></pre>
                <p>Check the output.</p>
              </main>
            </body></html>
        "##;
        let page = extractor().extract(html, "/guide/start").unwrap();

        assert_eq!(page.route, "/guide/start");
        assert_eq!(page.title, "Getting Started");
        assert_eq!(page.sections.len(), 3);

        let orphan = &page.sections[0];
        assert_eq!(orphan.title, None);
        assert_eq!(orphan.content, "Getting Started Welcome. #");

        let install = &page.sections[1];
        assert_eq!(install.title.as_deref(), Some("Install"));
        assert_eq!(install.href, "#install");
        assert_eq!(install.content, "Run the twice.");

        // The first anchor anywhere under <main> is the one beside "Install"
        let verify = &page.sections[2];
        assert_eq!(verify.title.as_deref(), Some("Verify"));
        assert_eq!(verify.href, "#install");
        assert_eq!(verify.content, "Check the output.");
    }

    #[test]
    fn test_missing_content_root_is_skipped() {
        let html = "<html><body><article><h2>Nope</h2></article></body></html>";
        assert!(extractor().extract(html, "/x").is_none());
    }

    #[test]
    fn test_missing_title_is_empty() {
        let html = "<main><h2>Only</h2><p>text</p></main>";
        let page = extractor().extract(html, "/only").unwrap();
        assert_eq!(page.title, "");
        assert_eq!(page.sections.len(), 1);
    }

    #[test]
    fn test_empty_content_root() {
        let page = extractor().extract("<main></main>", "/empty").unwrap();
        assert_eq!(page.title, "");
        assert!(page.sections.is_empty());
    }

    #[test]
    fn test_first_content_root_wins() {
        let html = "<main><p>first</p></main><main><p>second</p></main>";
        let page = extractor().extract(html, "/two").unwrap();
        assert_eq!(page.sections[0].content, "first");
    }

    #[test]
    fn test_custom_content_root_selector() {
        let options = ExtractOptions {
            content_root: "article.docs".into(),
            ..ExtractOptions::default()
        };
        let extractor = PageExtractor::new(&options).unwrap();
        let html = r#"<article>skip</article><article class="docs"><h1>T</h1><p>x</p></article>"#;
        let page = extractor.extract(html, "/a").unwrap();
        assert_eq!(page.title, "T");
        assert_eq!(page.sections[0].content, "T x");
        assert_eq!(extractor.content_root(), "article.docs");
    }

    #[test]
    fn test_script_text_is_dropped_by_default() {
        let html = "<main><p>prose</p><script>console.log(1)</script></main>";
        let page = extractor().extract(html, "/s").unwrap();
        assert_eq!(page.sections[0].content, "prose");
    }

    #[test]
    fn test_invalid_selector() {
        let options = ExtractOptions {
            content_root: "main[".into(),
            ..ExtractOptions::default()
        };
        let err = PageExtractor::new(&options).unwrap_err();
        assert!(matches!(err, DocumentError::InvalidSelector { .. }));

        let options = ExtractOptions {
            content_root: "  ".into(),
            ..ExtractOptions::default()
        };
        assert!(PageExtractor::new(&options).is_err());
    }

    #[test]
    fn test_route_for() {
        let out = PathBuf::from("/site/.next/server/app");
        assert_eq!(
            route_for(&out.join("guide/intro.html"), &out).as_deref(),
            Some("/guide/intro")
        );
        assert_eq!(
            route_for(&out.join("index.html"), &out).as_deref(),
            Some("/index")
        );
        assert_eq!(
            route_for(&out.join("v1.2/notes.html"), &out).as_deref(),
            Some("/v1.2/notes")
        );
        assert_eq!(route_for(Path::new("/elsewhere/a.html"), &out), None);
        assert_eq!(route_for(&out, &out), None);
    }

    #[test]
    fn test_deeply_nested_page() {
        let depth = 20_000;
        let html = format!(
            "<main><h2>Deep</h2>{}<p>bottom</p>{}</main>",
            "<div>".repeat(depth),
            "</div>".repeat(depth)
        );
        let page = extractor().extract(&html, "/deep").unwrap();

        assert_eq!(page.sections.len(), 1);
        assert_eq!(page.sections[0].title.as_deref(), Some("Deep"));
        assert_eq!(page.sections[0].content, "bottom");
    }
}
