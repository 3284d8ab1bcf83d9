//! Static site building for gocden.
//!
//! This crate provides:
//! - [`Site`]: full builds, single-file rebuilds and the shared site snapshot
//! - [`Navigation`]: pages grouped into sections in discovery order
//! - [`PageTemplate`]: the HTML page template
//! - [`Sitemap`]: `sitemap.xml` generation
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::path::Path;
//! use gocden_config::Config;
//! use gocden_site::{Site, SiteConfig};
//!
//! let cwd = Path::new(".");
//! let config = Config::load_or_create(cwd)?;
//! let site = Site::new(SiteConfig::from_config(&config, cwd))?;
//!
//! let report = site.build()?;
//! println!("{} pages", report.pages);
//! # Ok(())
//! # }
//! ```

mod builder;
mod config;
mod doc_file;
mod error;
mod navigation;
pub mod paths;
mod site;
mod sitemap;
mod template;

pub use config::{SiteConfig, SiteMetadata};
pub use doc_file::DocFile;
pub use error::{BuildError, FileError, RenderError};
pub use navigation::{NavPage, NavSection, Navigation};
pub use site::{BuildReport, RebuildOutcome, SITEMAP_FILENAME, Site, SiteSnapshot};
pub use sitemap::{Sitemap, SitemapEntry};
pub use template::{PageContext, PageLink, PageTemplate};
