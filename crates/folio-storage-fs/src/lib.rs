//! Filesystem storage implementation for folio.
//!
//! This crate provides [`FsStorage`], a filesystem-based implementation of the
//! [`Storage`](folio_storage::Storage) trait. It handles:
//!
//! - Recursive directory scanning with include/exclude glob patterns
//! - Localized-first resolution when reading a content file
//! - Category sidecar (`_category_.{json,yml,yaml}`) loading
//!
//! # Example
//!
//! ```ignore
//! use std::path::PathBuf;
//! use folio_storage::Storage;
//! use folio_storage_fs::FsStorage;
//!
//! let storage = FsStorage::new(PathBuf::from("docs"))
//!     .with_localized_path(PathBuf::from("i18n/fr/docs/current"));
//! for source in storage.scan()? {
//!     let doc = storage.read(&source)?;
//!     println!("{} -> {}", doc.source, doc.file_path.display());
//! }
//! ```

mod scanner;
mod source;
mod yaml;

use std::collections::HashMap;
use std::fs;
use std::path::{Component, Path, PathBuf};
use std::time::UNIX_EPOCH;

use glob::Pattern;
use rayon::prelude::*;

use folio_storage::{
    CategoryMetadataMap, DocFile, LastUpdate, Storage, StorageError, StorageErrorKind,
};
use scanner::Scanner;
use source::{CATEGORY_FILENAMES, SourceFile, SourceKind};
use yaml::parse_category_metadata;

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// Default include patterns.
pub const DEFAULT_INCLUDE: [&str; 2] = ["**/*.md", "**/*.mdx"];

/// Default exclude patterns (partials and underscore directories).
pub const DEFAULT_EXCLUDE: [&str; 3] = ["**/_*.md", "**/_*.mdx", "**/_*/**"];

/// Filesystem storage implementation.
///
/// Scans one version's content root. When a localized root is configured,
/// reads prefer the localized copy of a file and fall back to the shared one.
pub struct FsStorage {
    /// Root directory of the version's content.
    content_path: PathBuf,
    /// Localized root checked first on reads.
    localized_path: Option<PathBuf>,
    /// Scanner for content discovery.
    scanner: Scanner,
    /// Whether to fill [`LastUpdate`] from file modification times.
    track_last_update: bool,
}

impl FsStorage {
    /// Create a new filesystem storage with default include/exclude patterns.
    ///
    /// # Panics
    ///
    /// Panics if the built-in glob patterns fail to compile.
    /// This should never happen as the patterns are compile-time constants.
    #[must_use]
    pub fn new(content_path: PathBuf) -> Self {
        let include = compile(&DEFAULT_INCLUDE).expect("invalid default include pattern");
        let exclude = compile(&DEFAULT_EXCLUDE).expect("invalid default exclude pattern");
        Self::from_patterns(content_path, include, exclude)
    }

    /// Create a new filesystem storage with custom include/exclude patterns.
    ///
    /// # Errors
    ///
    /// Returns [`StorageErrorKind::InvalidPath`] if a pattern is not a valid glob.
    pub fn with_patterns(
        content_path: PathBuf,
        include: &[impl AsRef<str>],
        exclude: &[impl AsRef<str>],
    ) -> Result<Self, StorageError> {
        let include = compile(include)?;
        let exclude = compile(exclude)?;
        Ok(Self::from_patterns(content_path, include, exclude))
    }

    fn from_patterns(content_path: PathBuf, include: Vec<Pattern>, exclude: Vec<Pattern>) -> Self {
        let scanner = Scanner::new(content_path.clone(), include, exclude);
        Self {
            content_path,
            localized_path: None,
            scanner,
            track_last_update: false,
        }
    }

    /// Set the localized content root checked before the shared root.
    #[must_use]
    pub fn with_localized_path(mut self, localized_path: PathBuf) -> Self {
        self.localized_path = Some(localized_path);
        self
    }

    /// Fill last-update information from file modification times.
    #[must_use]
    pub fn with_last_update(mut self, enabled: bool) -> Self {
        self.track_last_update = enabled;
        self
    }

    /// Root directory of the version's content.
    #[must_use]
    pub fn content_path(&self) -> &Path {
        &self.content_path
    }

    /// Validate that a source path stays inside the content root.
    ///
    /// Rejects absolute paths and paths containing `..` segments.
    fn validate_path(source: &str) -> Result<(), StorageError> {
        let escapes = Path::new(source)
            .components()
            .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
        if escapes {
            return Err(StorageError::new(StorageErrorKind::InvalidPath)
                .with_path(source)
                .with_backend(BACKEND));
        }
        Ok(())
    }

    /// Resolve a source path to the content root that holds it.
    ///
    /// Checks the localized root first, then the shared root.
    fn resolve(&self, source: &str) -> Option<(&Path, PathBuf)> {
        self.localized_path
            .iter()
            .chain(std::iter::once(&self.content_path))
            .map(|root| (root.as_path(), root.join(source)))
            .find(|(_, path)| path.is_file())
    }

    fn modified_secs(path: &Path, source: &str) -> Result<f64, StorageError> {
        let modified = fs::metadata(path)
            .and_then(|m| m.modified())
            .map_err(|e| StorageError::io(e, Some(PathBuf::from(source))).with_backend(BACKEND))?;
        Ok(modified
            .duration_since(UNIX_EPOCH)
            .map_or(0.0, |d| d.as_secs_f64()))
    }
}

/// Compile glob patterns, mapping failures to storage errors.
fn compile(globs: &[impl AsRef<str>]) -> Result<Vec<Pattern>, StorageError> {
    globs
        .iter()
        .map(|g| {
            Pattern::new(g.as_ref()).map_err(|e| {
                StorageError::new(StorageErrorKind::InvalidPath)
                    .with_path(g.as_ref())
                    .with_backend(BACKEND)
                    .with_source(e)
            })
        })
        .collect()
}

/// Pick one sidecar per directory, honoring [`CATEGORY_FILENAMES`] priority.
fn pick_sidecars(files: Vec<SourceFile>) -> Vec<(String, SourceFile)> {
    let mut by_dir: HashMap<String, SourceFile> = HashMap::new();
    let priority = |f: &SourceFile| {
        CATEGORY_FILENAMES
            .iter()
            .position(|name| f.rel_path.ends_with(name))
            .unwrap_or(usize::MAX)
    };

    for file in files.into_iter().filter(|f| f.kind == SourceKind::Category) {
        let dir = file.category_dir();
        match by_dir.get(&dir) {
            Some(existing) if priority(existing) <= priority(&file) => {
                tracing::warn!(
                    dir = %dir,
                    ignored = %file.rel_path,
                    "Multiple category files in one directory, ignoring"
                );
            }
            _ => {
                by_dir.insert(dir, file);
            }
        }
    }

    by_dir.into_iter().collect()
}

impl Storage for FsStorage {
    fn scan(&self) -> Result<Vec<String>, StorageError> {
        if !self.content_path.is_dir() {
            return Err(StorageError::not_found(&self.content_path).with_backend(BACKEND));
        }

        Ok(self
            .scanner
            .scan()
            .into_iter()
            .filter(|f| f.kind == SourceKind::Content)
            .map(|f| f.rel_path)
            .collect())
    }

    fn read(&self, source: &str) -> Result<DocFile, StorageError> {
        Self::validate_path(source)?;
        let (root, file_path) = self
            .resolve(source)
            .ok_or_else(|| StorageError::not_found(source).with_backend(BACKEND))?;
        let content = fs::read_to_string(&file_path)
            .map_err(|e| StorageError::io(e, Some(file_path.clone())).with_backend(BACKEND))?;

        let last_update = if self.track_last_update {
            #[allow(clippy::cast_possible_truncation)]
            let at = Self::modified_secs(&file_path, source)? as i64;
            LastUpdate {
                last_updated_at: Some(at),
                last_updated_by: None,
            }
        } else {
            LastUpdate::default()
        };

        Ok(DocFile {
            source: source.to_owned(),
            content,
            content_path: root.to_path_buf(),
            file_path,
            last_update,
        })
    }

    fn category_metadata(&self) -> Result<CategoryMetadataMap, StorageError> {
        let sidecars = pick_sidecars(self.scanner.scan());

        sidecars
            .par_iter()
            .map(|(dir, file)| {
                let path = self.content_path.join(&file.rel_path);
                let content = fs::read_to_string(&path)
                    .map_err(|e| StorageError::io(e, Some(path.clone())).with_backend(BACKEND))?;
                let meta = parse_category_metadata(&file.rel_path, &content).map_err(|e| {
                    StorageError::invalid_data(path.clone(), e).with_backend(BACKEND)
                })?;
                Ok((dir.clone(), meta))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_fs_storage_is_send_sync() {
        assert_send_sync::<FsStorage>();
    }

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_scan_missing_dir() {
        let storage = FsStorage::new(PathBuf::from("/nonexistent/docs"));

        let err = storage.scan().unwrap_err();

        assert_eq!(err.kind, StorageErrorKind::NotFound);
        assert_eq!(err.backend, Some("Fs"));
    }

    #[test]
    fn test_scan_returns_content_sources() {
        let temp_dir = tempfile::tempdir().unwrap();
        write(temp_dir.path(), "intro.md", "# Intro");
        write(temp_dir.path(), "guides/01-setup.mdx", "# Setup");
        write(temp_dir.path(), "guides/_category_.yml", "label: Guides");
        write(temp_dir.path(), "guides/_partial.mdx", "shared");

        let storage = FsStorage::new(temp_dir.path().to_path_buf());

        assert_eq!(
            storage.scan().unwrap(),
            vec!["guides/01-setup.mdx", "intro.md"]
        );
    }

    #[test]
    fn test_with_patterns_rejects_invalid_glob() {
        let result = FsStorage::with_patterns(PathBuf::from("docs"), &["**/[.md"], &[] as &[&str]);

        let Err(err) = result else {
            panic!("expected invalid pattern error");
        };
        assert_eq!(err.kind, StorageErrorKind::InvalidPath);
    }

    #[test]
    fn test_read_existing_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        write(temp_dir.path(), "guides/setup.md", "# Setup\n\nBody.");

        let storage = FsStorage::new(temp_dir.path().to_path_buf());
        let doc = storage.read("guides/setup.md").unwrap();

        assert_eq!(doc.source, "guides/setup.md");
        assert_eq!(doc.content, "# Setup\n\nBody.");
        assert_eq!(doc.content_path, temp_dir.path());
        assert_eq!(doc.file_path, temp_dir.path().join("guides/setup.md"));
        assert_eq!(doc.last_update, LastUpdate::default());
    }

    #[test]
    fn test_read_prefers_localized_copy() {
        let shared = tempfile::tempdir().unwrap();
        let localized = tempfile::tempdir().unwrap();
        write(shared.path(), "a.md", "shared a");
        write(shared.path(), "b.md", "shared b");
        write(localized.path(), "a.md", "localized a");

        let storage = FsStorage::new(shared.path().to_path_buf())
            .with_localized_path(localized.path().to_path_buf());

        let a = storage.read("a.md").unwrap();
        assert_eq!(a.content, "localized a");
        assert_eq!(a.content_path, localized.path());

        let b = storage.read("b.md").unwrap();
        assert_eq!(b.content, "shared b");
        assert_eq!(b.content_path, shared.path());
    }

    #[test]
    fn test_read_missing_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let storage = FsStorage::new(temp_dir.path().to_path_buf());

        let err = storage.read("missing.md").unwrap_err();

        assert_eq!(err.kind, StorageErrorKind::NotFound);
    }

    #[test]
    fn test_read_rejects_path_traversal() {
        let temp_dir = tempfile::tempdir().unwrap();
        let storage = FsStorage::new(temp_dir.path().to_path_buf());

        let err = storage.read("../secret.md").unwrap_err();

        assert_eq!(err.kind, StorageErrorKind::InvalidPath);
        let err = storage.read("a/../../secret.md").unwrap_err();
        assert_eq!(err.kind, StorageErrorKind::InvalidPath);
    }

    #[test]
    fn test_read_with_last_update() {
        let temp_dir = tempfile::tempdir().unwrap();
        write(temp_dir.path(), "doc.md", "");

        let storage = FsStorage::new(temp_dir.path().to_path_buf()).with_last_update(true);
        let doc = storage.read("doc.md").unwrap();

        assert!(doc.last_update.last_updated_at.is_some_and(|at| at > 0));
        assert!(doc.last_update.last_updated_by.is_none());
    }

    #[test]
    fn test_category_metadata() {
        let temp_dir = tempfile::tempdir().unwrap();
        write(temp_dir.path(), "guides/_category_.yml", "label: Guides\nposition: 2");
        write(
            temp_dir.path(),
            "guides/advanced/_category_.json",
            r#"{"label": "Advanced", "collapsed": false}"#,
        );
        write(temp_dir.path(), "guides/a.md", "");

        let storage = FsStorage::new(temp_dir.path().to_path_buf());
        let categories = storage.category_metadata().unwrap();

        assert_eq!(categories.len(), 2);
        assert_eq!(categories["guides"].label.as_deref(), Some("Guides"));
        assert_eq!(categories["guides"].position, Some(2.0));
        assert_eq!(categories["guides/advanced"].collapsed, Some(false));
    }

    #[test]
    fn test_category_metadata_prefers_json() {
        let temp_dir = tempfile::tempdir().unwrap();
        write(temp_dir.path(), "g/_category_.yml", "label: From YAML");
        write(temp_dir.path(), "g/_category_.json", r#"{"label": "From JSON"}"#);

        let storage = FsStorage::new(temp_dir.path().to_path_buf());
        let categories = storage.category_metadata().unwrap();

        assert_eq!(categories["g"].label.as_deref(), Some("From JSON"));
    }

    #[test]
    fn test_category_metadata_invalid_sidecar() {
        let temp_dir = tempfile::tempdir().unwrap();
        write(temp_dir.path(), "g/_category_.yml", "label: [broken");

        let storage = FsStorage::new(temp_dir.path().to_path_buf());
        let err = storage.category_metadata().unwrap_err();

        assert_eq!(err.kind, StorageErrorKind::InvalidData);
        assert!(err.to_string().contains("Invalid YAML"));
    }
}
