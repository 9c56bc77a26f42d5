//! Sidebars for folio.
//!
//! This crate provides:
//! - [`load_sidebars`]: read a JSON/YAML sidebar file and expand its shorthands
//! - [`default_sidebar_items_generator`]: build items from a directory layout
//! - [`SidebarProcessor`]: replace autogenerated placeholders and fix up categories
//! - [`validate_sidebars`]: check that every referenced document exists
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::path::PathBuf;
//!
//! use folio_content::{
//!     DefaultNumberPrefixParser, SidebarFile, VersionMetadata, default_is_category_index,
//! };
//! use folio_sidebar::{
//!     DefaultSidebarItemsGenerator, SidebarOptions, SidebarProcessor, load_sidebars,
//!     validate_sidebars,
//! };
//! use folio_storage::CategoryMetadataMap;
//!
//! let options = SidebarOptions::default();
//! let sidebars = load_sidebars(&SidebarFile::Path(PathBuf::from("sidebars.yaml")), &options)?;
//!
//! let version = VersionMetadata::new("current", "docs");
//! let docs: Vec<folio_content::DocMetadataBase> = Vec::new();
//! let processor = SidebarProcessor {
//!     generator: &DefaultSidebarItemsGenerator,
//!     docs: &docs,
//!     version: &version,
//!     number_prefix_parser: &DefaultNumberPrefixParser,
//!     is_category_index: default_is_category_index,
//!     categories_metadata: &CategoryMetadataMap::new(),
//!     options,
//! };
//! let sidebars = processor.process_sidebars(&sidebars)?;
//! validate_sidebars(&sidebars, &docs, "sidebars.yaml".as_ref())?;
//! # Ok(())
//! # }
//! ```

mod error;
mod generator;
mod loader;
mod processor;
mod types;
mod validate;

pub use error::SidebarError;
pub use generator::{
    DefaultGenerator, DefaultSidebarItemsGenerator, SidebarItemsGenerator,
    SidebarItemsGeneratorArgs, default_sidebar_items_generator,
};
pub use loader::{
    DEFAULT_SIDEBAR_NAME, default_sidebars, load_sidebars, load_sidebars_file, normalize_sidebars,
};
pub use processor::{SidebarProcessor, transform_sidebar_items};
pub use types::{
    NormalizedSidebar, NormalizedSidebarItem, NormalizedSidebars, Sidebar, SidebarCategory,
    SidebarItem, SidebarItemAutogenerated, SidebarItemDoc, SidebarItemLink, SidebarOptions,
    Sidebars,
};
pub use validate::{collect_sidebar_doc_ids, validate_sidebars};
