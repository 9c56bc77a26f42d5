//! Storage trait and error types.
//!
//! Provides the core [`Storage`] trait for abstracting content scanning and retrieval,
//! along with [`StorageError`] for unified error handling across backends.
//!
//! # Source Path Convention
//!
//! All path parameters in Storage methods are **source paths**: POSIX-style paths
//! relative to the content root of one version, including the extension:
//! - `"intro.md"` - top-level document
//! - `"guides/01-setup.mdx"` - nested document with a number prefix
//! - `"2021/05/12/release/index.md"` - date-split directory with an index file
//!
//! Storage implementations map source paths to their internal storage format and
//! decide which content root (localized or shared) a source resolves to.

use std::path::PathBuf;

use crate::metadata::CategoryMetadataMap;

/// Last-update information attached to a content file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LastUpdate {
    /// Seconds since Unix epoch.
    pub last_updated_at: Option<i64>,
    /// Author of the last change.
    pub last_updated_by: Option<String>,
}

/// A content file read from storage.
///
/// Ephemeral: read once per build and turned into document metadata.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocFile {
    /// Source path relative to the content root (e.g., `"guides/setup.md"`).
    pub source: String,
    /// Raw file content, front matter included.
    pub content: String,
    /// Content root the file was found in (localized root or shared root).
    pub content_path: PathBuf,
    /// Full path of the file (`content_path` joined with `source`).
    pub file_path: PathBuf,
    /// Last-update information, when the backend tracks it.
    pub last_update: LastUpdate,
}

/// Semantic error categories.
#[derive(Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum StorageErrorKind {
    /// Resource does not exist.
    NotFound,
    /// Permission denied.
    PermissionDenied,
    /// Resource already exists (for create operations).
    AlreadyExists,
    /// Invalid path or glob pattern.
    InvalidPath,
    /// Stored data could not be parsed (e.g., a broken category sidecar).
    InvalidData,
    /// Other/unknown error category.
    Other,
}

/// Storage error with semantic kind and backend-specific source.
#[derive(Debug)]
pub struct StorageError {
    /// Semantic error category.
    pub kind: StorageErrorKind,
    /// Path context (if applicable).
    pub path: Option<PathBuf>,
    /// Backend identifier (e.g., "Fs", "Mock").
    pub backend: Option<&'static str>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl StorageError {
    /// Create a new storage error.
    #[must_use]
    pub fn new(kind: StorageErrorKind) -> Self {
        Self {
            kind,
            path: None,
            backend: None,
            source: None,
        }
    }

    /// Attach path context.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Attach backend identifier.
    #[must_use]
    pub fn with_backend(mut self, backend: &'static str) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Attach the underlying error source.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Downcast the source error to a concrete type.
    #[must_use]
    pub fn downcast_source<E: std::error::Error + 'static>(&self) -> Option<&E> {
        self.source.as_ref()?.downcast_ref()
    }

    /// Create a not found error with path.
    #[must_use]
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::new(StorageErrorKind::NotFound).with_path(path)
    }

    /// Create an invalid data error for a file that failed to parse.
    #[must_use]
    pub fn invalid_data(
        path: impl Into<PathBuf>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::new(StorageErrorKind::InvalidData)
            .with_path(path)
            .with_source(source)
    }

    /// Create a storage error from an I/O error.
    #[must_use]
    pub fn io(err: std::io::Error, path: Option<PathBuf>) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => StorageErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied => StorageErrorKind::PermissionDenied,
            std::io::ErrorKind::AlreadyExists => StorageErrorKind::AlreadyExists,
            std::io::ErrorKind::InvalidData => StorageErrorKind::InvalidData,
            _ => StorageErrorKind::Other,
        };
        let mut error = Self::new(kind).with_source(err);
        if let Some(p) = path {
            error = error.with_path(p);
        }
        error
    }
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Format: "[Backend] Kind: message (path: /foo/bar)"
        if let Some(backend) = self.backend {
            write!(f, "[{backend}] ")?;
        }

        let kind_str = match self.kind {
            StorageErrorKind::NotFound => "Not found",
            StorageErrorKind::PermissionDenied => "Permission denied",
            StorageErrorKind::AlreadyExists => "Already exists",
            StorageErrorKind::InvalidPath => "Invalid path",
            StorageErrorKind::InvalidData => "Invalid data",
            StorageErrorKind::Other => "Error",
        };

        write!(f, "{kind_str}")?;

        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }

        if let Some(path) = &self.path {
            write!(f, " (path: {})", path.display())?;
        }

        Ok(())
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|s| s.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Storage abstraction for the content tree of one version.
///
/// Implementations handle backend-specific details like include/exclude
/// filtering, localized-first resolution, and sidecar parsing.
///
/// All path parameters are **source paths** (see module docs).
pub trait Storage: Send + Sync {
    /// Scan and return all content sources, sorted.
    ///
    /// Results are sorted so downstream processing sees a deterministic
    /// encounter order regardless of backend iteration order.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if scanning fails (e.g., content root missing,
    /// permission denied).
    fn scan(&self) -> Result<Vec<String>, StorageError>;

    /// Read a content file.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the source doesn't exist or can't be read.
    fn read(&self, source: &str) -> Result<DocFile, StorageError>;

    /// Load category sidecar metadata for every directory that has one.
    ///
    /// Keys are directory paths relative to the content root.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] on I/O error or sidecar parse error.
    fn category_metadata(&self) -> Result<CategoryMetadataMap, StorageError>;
}
