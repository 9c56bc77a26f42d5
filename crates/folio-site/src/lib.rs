//! Site build pipeline for folio.
//!
//! This crate provides:
//! - [`read_versions_metadata`]: every version of the configured plugin
//! - [`SiteBuilder`]: documents, sidebars and linkified contents per version
//! - [`write_site`]: the JSON output consumed by renderers
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::path::Path;
//!
//! use folio_config::Config;
//! use folio_site::{build_site, write_site};
//!
//! let config = Config::load(None, None)?;
//! let site = build_site(&config, false)?;
//! for link in &site.broken_links {
//!     eprintln!("{link}");
//! }
//! write_site(Path::new("build"), &site)?;
//! # Ok(())
//! # }
//! ```

mod builder;
mod error;
mod output;
mod versions;

pub use builder::{BrokenLink, DocContent, SiteBuild, SiteBuilder, VersionBuild, build_site};
pub use error::SiteError;
pub use output::{
    BROKEN_LINKS_FILE, CONTENT_DIR, DOCS_FILE, SIDEBARS_FILE, SOURCE_TO_PERMALINK_FILE,
    version_output_dir, write_site,
};
pub use versions::{CURRENT_VERSION_LABEL, read_versions_metadata};
