//! Versioning error types.

use std::path::PathBuf;

use folio_sidebar::SidebarError;

/// A version name that cannot be used.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VersionNameError {
    /// The name is missing or not a string.
    #[error("Versions should be strings. Found type \"{found_type}\" for version \"{value}\".")]
    NotAString {
        /// Type name of the value found.
        found_type: &'static str,
        /// Value found, as written.
        value: String,
    },

    /// The name is empty or whitespace.
    #[error("Invalid version name \"{0}\": version name must contain at least one non-whitespace character.")]
    Blank(String),

    /// The name is longer than [`MAX_VERSION_NAME_LEN`](crate::MAX_VERSION_NAME_LEN).
    #[error("Invalid version name \"{0}\": version name cannot be longer than 32 characters.")]
    TooLong(String),

    /// The name is `.` or `..`.
    #[error("Invalid version name \"{0}\": version name should not be \".\" or \"..\".")]
    Reserved(String),

    /// The name contains `/` or `\`.
    #[error("Invalid version name \"{0}\": version name should not include slash (/) or backslash (\\).")]
    PathSeparator(String),

    /// The name contains characters not allowed in file names.
    #[error("Invalid version name \"{0}\": version name should be a valid file path.")]
    InvalidPath(String),
}

/// Error creating a version.
#[derive(Debug, thiserror::Error)]
pub enum VersioningError {
    /// The version name is invalid.
    #[error(transparent)]
    InvalidName(#[from] VersionNameError),

    /// The versions log already lists the name.
    #[error("[{plugin}]: this version already exists! Use a version tag that does not already exist.")]
    AlreadyExists {
        /// Plugin log prefix.
        plugin: String,
        /// Requested name.
        tag: String,
    },

    /// The current content directory is missing or empty.
    #[error("[{plugin}]: no docs found in \"{}\".", path.display())]
    NoDocs {
        /// Plugin log prefix.
        plugin: String,
        /// Content directory.
        path: PathBuf,
    },

    /// The versions file exists but is not an array of strings.
    #[error("Invalid versions file {}: {message}", path.display())]
    VersionsFile {
        /// Versions file.
        path: PathBuf,
        /// What is wrong with it.
        message: String,
    },

    /// Reading or writing the file system failed.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        /// Path being read or written.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Sidebars could not be loaded.
    #[error(transparent)]
    Sidebar(#[from] SidebarError),

    /// A file could not be serialized.
    #[error("Failed to serialize {}: {source}", path.display())]
    Serialize {
        /// Destination file.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },
}

impl VersioningError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_already_exists_message() {
        let err = VersioningError::AlreadyExists {
            plugin: "docs".to_owned(),
            tag: "1.0.0".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "[docs]: this version already exists! Use a version tag that does not already exist."
        );
    }

    #[test]
    fn test_no_docs_message_embeds_path() {
        let err = VersioningError::NoDocs {
            plugin: "community".to_owned(),
            path: PathBuf::from("/site/community"),
        };
        assert_eq!(err.to_string(), "[community]: no docs found in \"/site/community\".");
    }

    #[test]
    fn test_invalid_name_is_transparent() {
        let err = VersioningError::from(VersionNameError::Reserved("..".to_owned()));
        assert_eq!(
            err.to_string(),
            "Invalid version name \"..\": version name should not be \".\" or \"..\"."
        );
    }
}
