//! Versioned snapshots for folio.
//!
//! This crate provides:
//! - [`validate_version_name`]: version name rules
//! - [`VersionsLog`]: the ordered list of versions persisted in `versions.json`
//! - [`VersionedLayout`]: where snapshots, sidebars and localized copies live
//! - [`create_version`]: snapshot the current content as a new version
//!
//! # Example
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use folio_content::SidebarFile;
//! use folio_sidebar::SidebarOptions;
//! use folio_versioning::{CreateVersionOptions, DEFAULT_PLUGIN_ID, VersionedLayout, create_version};
//!
//! let options = CreateVersionOptions {
//!     layout: VersionedLayout::new("website", DEFAULT_PLUGIN_ID),
//!     docs_dir: "website/docs".into(),
//!     sidebar: SidebarFile::Path("website/sidebars.yaml".into()),
//!     sidebar_options: SidebarOptions::default(),
//!     i18n_dir: "website/i18n".into(),
//!     locales: vec!["en".to_owned(), "fr".to_owned()],
//!     default_locale: "en".to_owned(),
//! };
//! let report = create_version(Some("1.0.0"), &options)?;
//! assert_eq!(report.versions[0], "1.0.0");
//! # Ok(())
//! # }
//! ```

mod create;
mod error;
mod layout;
mod name;
mod versions_log;

pub use create::{CreateVersionOptions, VersionReport, create_version};
pub use error::{VersionNameError, VersioningError};
pub use layout::{DEFAULT_PLUGIN_ID, VersionedLayout};
pub use name::{MAX_VERSION_NAME_LEN, validate_version_name, validate_version_value};
pub use versions_log::VersionsLog;
