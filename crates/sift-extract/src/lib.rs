//! Site-wide page extraction for sift.
//!
//! This crate drives extraction across a whole build output directory:
//! - Discovering pages by extension, honoring exclude globs
//! - Deriving each page's route from its path
//! - Reading pages concurrently and extracting them with `sift-document`
//! - Isolating per-page failures, or aborting on the first one in fail-fast mode
//!
//! # Example
//!
//! ```no_run
//! use sift_extract::{SiteConfig, extract_site};
//!
//! # async fn run() -> Result<(), sift_extract::ExtractError> {
//! let site = SiteConfig::new(".next/server/app");
//! let mut report = extract_site(&site).await?;
//! report.sort_by_route();
//! for page in &report.pages {
//!     println!("{} ({} sections)", page.route, page.sections.len());
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod batch;
mod discovery;
mod error;
mod site;

pub use batch::{ExtractReport, FileFailure, MAX_IN_FLIGHT, extract_pages, extract_site};
pub use discovery::{DiscoveredPage, discover_pages};
pub use error::ExtractError;
pub use site::{SiteConfig, extract_options};
