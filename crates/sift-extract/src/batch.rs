//! Batch extraction over a whole site.
//!
//! Pages are read concurrently and processed in completion order. A page without a content
//! root is skipped with a warning; a page that cannot be read is recorded as a failure and the
//! batch continues, unless the run is fail-fast.

use std::path::PathBuf;

use futures::stream::{FuturesUnordered, StreamExt};
use sift_document::{PageExtractor, PageRecord};
use tokio::fs;
use tracing::{debug, error, warn};

use crate::{DiscoveredPage, ExtractError, SiteConfig, discover_pages};

/// Upper bound on pages read at the same time.
pub const MAX_IN_FLIGHT: usize = 64;

/// A page that could not be processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFailure {
    /// Path to the page.
    pub path: PathBuf,
    /// Error message.
    pub message: String,
}

/// Outcome of a batch run.
#[derive(Debug, Clone, Default)]
pub struct ExtractReport {
    /// Extracted pages, in completion order.
    pub pages: Vec<PageRecord>,
    /// Pages that had no content root.
    pub skipped: Vec<PathBuf>,
    /// Pages that could not be read.
    pub failures: Vec<FileFailure>,
}

impl ExtractReport {
    /// Returns true if no page failed.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Returns the total number of sections across all pages.
    pub fn section_count(&self) -> usize {
        self.pages.iter().map(|p| p.sections.len()).sum()
    }

    /// Sorts pages by route and the skipped and failed lists by path.
    pub fn sort_by_route(&mut self) {
        self.pages.sort_by(|a, b| a.route.cmp(&b.route));
        self.skipped.sort();
        self.failures.sort_by(|a, b| a.path.cmp(&b.path));
    }
}

/// Discovers and extracts every page of a site.
pub async fn extract_site(site: &SiteConfig) -> Result<ExtractReport, ExtractError> {
    let extractor = PageExtractor::new(&site.extract)?;
    let pages = discover_pages(&site.output_dir, &site.extension, &site.excludes)?;
    debug!(
        output_dir = %site.output_dir.display(),
        pages = pages.len(),
        "discovered pages"
    );

    extract_pages(&extractor, pages, site.fail_fast).await
}

/// Extracts a set of discovered pages.
///
/// With `fail_fast`, the first read error aborts the batch and is returned.
pub async fn extract_pages(
    extractor: &PageExtractor,
    pages: Vec<DiscoveredPage>,
    fail_fast: bool,
) -> Result<ExtractReport, ExtractError> {
    let mut report = ExtractReport::default();
    let mut pending = pages.into_iter();
    let mut in_flight = FuturesUnordered::new();

    loop {
        while in_flight.len() < MAX_IN_FLIGHT {
            let Some(page) = pending.next() else {
                break;
            };
            in_flight.push(async move {
                let bytes = fs::read(&page.abs_path).await;
                (page, bytes)
            });
        }

        let Some((page, bytes)) = in_flight.next().await else {
            break;
        };

        // Invalid UTF-8 is replaced, not treated as a failure
        let bytes = match bytes {
            Ok(bytes) => bytes,
            Err(source) => {
                if fail_fast {
                    return Err(ExtractError::ReadFile {
                        path: page.abs_path,
                        source,
                    });
                }
                error!(path = %page.abs_path.display(), error = %source, "failed to read page");
                report.failures.push(FileFailure {
                    path: page.abs_path,
                    message: source.to_string(),
                });
                continue;
            }
        };

        let html = String::from_utf8_lossy(&bytes);
        match extractor.extract(&html, page.route) {
            Some(record) => report.pages.push(record),
            None => {
                warn!(
                    path = %page.abs_path.display(),
                    "no <{}> element found, this page won't be included in the search results",
                    extractor.content_root()
                );
                report.skipped.push(page.abs_path);
            }
        }
    }

    debug!(
        pages = report.pages.len(),
        skipped = report.skipped.len(),
        failed = report.failures.len(),
        "batch complete"
    );

    Ok(report)
}
