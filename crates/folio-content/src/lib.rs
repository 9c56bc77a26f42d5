//! Document metadata for folio.
//!
//! Turns raw content files into the document model the rest of the pipeline
//! consumes:
//!
//! - [`parse_file_name`]: date, text and slug of a content path
//! - [`process_doc_metadata`]: [`DocMetadataBase`] from a file, its front
//!   matter and its version
//! - [`source_to_permalink`]: map used to resolve links between documents
//! - [`Linkifier`]: rewrites relative `.md`/`.mdx` links to permalinks
//! - [`truncate`]: cuts content at the excerpt marker
//!
//! # Example
//!
//! ```
//! use std::path::PathBuf;
//!
//! use folio_content::{MetadataOptions, VersionMetadata, process_doc_metadata};
//! use folio_storage::{DocFile, LastUpdate};
//!
//! let doc = DocFile {
//!     source: "01-guides/setup.md".to_owned(),
//!     content: "# Setup\n\nInstall the tool.\n".to_owned(),
//!     content_path: PathBuf::from("/site/docs"),
//!     file_path: PathBuf::from("/site/docs/01-guides/setup.md"),
//!     last_update: LastUpdate::default(),
//! };
//! let mut version = VersionMetadata::new("current", "/site/docs");
//! version.version_path = "/docs".to_owned();
//!
//! let meta = process_doc_metadata(&doc, &version, &MetadataOptions::new("/site")).unwrap();
//! assert_eq!(meta.id, "guides/setup");
//! assert_eq!(meta.permalink, "/docs/guides/setup");
//! assert_eq!(meta.title, "Setup");
//! ```

mod edit_url;
mod error;
mod filename;
mod front_matter;
mod linkify;
mod markdown;
mod metadata;
mod number_prefix;
mod permalink;
mod slug;
mod version;

pub use edit_url::{EditUrl, EditUrlFn, EditUrlParams, get_edit_url};
pub use error::{DocProcessingError, DuplicateId, MetadataError};
pub use filename::{
    IsCategoryIndex, ParsedFileName, ancestor_directories, default_is_category_index,
    is_index_name, parse_file_name,
};
pub use front_matter::{DocFrontMatter, parse_front_matter, split_front_matter};
pub use linkify::{BrokenMarkdownLink, ContentPaths, Linkifier, TRUNCATE_MARKER, truncate};
pub use markdown::{ParsedMarkdown, parse_markdown_string};
pub use metadata::{DocMetadataBase, MetadataOptions, check_duplicate_ids, process_doc_metadata};
pub use number_prefix::{
    DefaultNumberPrefixParser, DisabledNumberPrefixParser, NumberPrefix, NumberPrefixParser,
    number_prefix_parser, strip_path_number_prefixes,
};
pub use permalink::{
    SITE_ALIAS, SourceToPermalink, aliased_site_path, normalize_path, normalize_url, posix_path,
    relative_path, source_to_permalink,
};
pub use slug::{SlugParams, get_slug, is_valid_pathname};
pub use version::{CURRENT_VERSION_NAME, SidebarFile, VersionBanner, VersionMetadata};
