//! Sidebar error types.

use std::path::PathBuf;

/// Error loading, generating or validating sidebars.
#[derive(Debug, thiserror::Error)]
pub enum SidebarError {
    /// A category link points to a document id that does not exist.
    #[error("Can't find any doc with id={id}.\nAvailable doc ids:\n- {}", available.join("\n- "))]
    UnknownDocId {
        /// Requested id.
        id: String,
        /// Every known id, sorted.
        available: Vec<String>,
    },

    /// The sidebar file could not be read or parsed.
    #[error("Failed to load sidebars from {}: {message}", path.display())]
    Load {
        /// Sidebar file.
        path: PathBuf,
        /// Underlying error.
        message: String,
    },

    /// A sidebar item has an unexpected shape.
    #[error("Invalid sidebar item in sidebar \"{sidebar}\": {message}")]
    InvalidItem {
        /// Sidebar name.
        sidebar: String,
        /// What is wrong with the item.
        message: String,
    },

    /// Sidebars reference documents the version does not contain.
    #[error(
        "Invalid sidebar file at \"{}\".\nThese sidebar document ids do not exist:\n- {}\n\nAvailable document ids are:\n- {}",
        sidebar_path.display(),
        unknown.join("\n- "),
        available.join("\n- ")
    )]
    UnknownSidebarDocs {
        /// Sidebar file, or `<default>` for the generated sidebar.
        sidebar_path: PathBuf,
        /// Unknown ids, sorted.
        unknown: Vec<String>,
        /// Every known id, sorted.
        available: Vec<String>,
    },
}
