//! sift: searchable sections from a rendered site
//!
//! sift walks the HTML output of a statically rendered site, finds each page's content root,
//! and splits it into flat sections at `h2`..`h6` boundaries. Each section carries its heading,
//! the anchor next to the heading, and the plain text beneath it, ready to be fed to a search
//! index.

#![warn(missing_docs)]

pub mod cli;
