//! Site build error types.

use std::path::{Path, PathBuf};

use folio_config::ConfigError;
use folio_content::{DocProcessingError, MetadataError};
use folio_sidebar::SidebarError;
use folio_storage::StorageError;
use folio_versioning::VersioningError;

use crate::builder::BrokenLink;

/// Error building or writing a site.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    /// Versions do not match the configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The versions file could not be read.
    #[error(transparent)]
    Versioning(#[from] VersioningError),

    /// Content could not be scanned or read.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// A document's metadata could not be computed.
    #[error(transparent)]
    Doc(#[from] DocProcessingError),

    /// Documents of a version are inconsistent.
    #[error("Invalid docs of version \"{version}\": {source}")]
    Version {
        /// Version name.
        version: String,
        /// Underlying error.
        #[source]
        source: MetadataError,
    },

    /// Sidebars could not be loaded or processed.
    #[error(transparent)]
    Sidebar(#[from] SidebarError),

    /// Unresolved content links in strict mode.
    #[error("{}", format_broken_links(.0))]
    BrokenLinks(Vec<BrokenLink>),

    /// Output could not be written.
    #[error("Failed to write {}: {source}", path.display())]
    Io {
        /// Path being written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Output could not be serialized.
    #[error("Failed to serialize {}: {source}", path.display())]
    Serialize {
        /// Path being written.
        path: PathBuf,
        /// Underlying serialization error.
        #[source]
        source: serde_json::Error,
    },
}

impl SiteError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

fn format_broken_links(links: &[BrokenLink]) -> String {
    let mut message = format!("Found {} broken markdown link(s):", links.len());
    for link in links {
        message.push_str("\n- ");
        message.push_str(&link.to_string());
    }
    message
}
