//! Mock storage implementation for testing.
//!
//! Provides [`MockStorage`] for unit testing without filesystem access.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::metadata::{CategoryMetadata, CategoryMetadataMap};
use crate::storage::{DocFile, LastUpdate, Storage, StorageError};

/// Mock storage for testing.
///
/// Stores content in memory. Use the builder methods to configure the mock
/// with test data. Files are returned by `scan()` in sorted order, as the
/// filesystem backend does.
///
/// # Example
///
/// ```ignore
/// use folio_storage::{MockStorage, Storage};
///
/// let storage = MockStorage::new()
///     .with_file("guides/setup.md", "# Setup\n\nContent.");
///
/// let sources = storage.scan().unwrap();
/// let doc = storage.read("guides/setup.md").unwrap();
/// ```
#[derive(Debug)]
pub struct MockStorage {
    content_path: PathBuf,
    contents: RwLock<HashMap<String, String>>,
    updates: RwLock<HashMap<String, LastUpdate>>,
    categories: RwLock<CategoryMetadataMap>,
}

impl Default for MockStorage {
    fn default() -> Self {
        Self {
            content_path: PathBuf::from("docs"),
            contents: RwLock::new(HashMap::new()),
            updates: RwLock::new(HashMap::new()),
            categories: RwLock::new(HashMap::new()),
        }
    }
}

impl MockStorage {
    /// Create a new empty mock storage rooted at `docs`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the content root reported in [`DocFile::content_path`].
    #[must_use]
    pub fn with_content_path(mut self, content_path: impl Into<PathBuf>) -> Self {
        self.content_path = content_path.into();
        self
    }

    /// Add a content file.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_file(self, source: impl Into<String>, content: impl Into<String>) -> Self {
        self.contents
            .write()
            .unwrap()
            .insert(source.into(), content.into());
        self
    }

    /// Set last-update information for a source.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_last_update(self, source: impl Into<String>, update: LastUpdate) -> Self {
        self.updates.write().unwrap().insert(source.into(), update);
        self
    }

    /// Add category metadata for a directory.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_category(self, dir: impl Into<String>, metadata: CategoryMetadata) -> Self {
        self.categories
            .write()
            .unwrap()
            .insert(dir.into(), metadata);
        self
    }
}

impl Storage for MockStorage {
    fn scan(&self) -> Result<Vec<String>, StorageError> {
        let mut sources: Vec<String> = self.contents.read().unwrap().keys().cloned().collect();
        sources.sort();
        Ok(sources)
    }

    fn read(&self, source: &str) -> Result<DocFile, StorageError> {
        let content = self
            .contents
            .read()
            .unwrap()
            .get(source)
            .cloned()
            .ok_or_else(|| StorageError::not_found(source).with_backend("Mock"))?;
        let last_update = self
            .updates
            .read()
            .unwrap()
            .get(source)
            .cloned()
            .unwrap_or_default();

        Ok(DocFile {
            source: source.to_owned(),
            content,
            content_path: self.content_path.clone(),
            file_path: self.content_path.join(source),
            last_update,
        })
    }

    fn category_metadata(&self) -> Result<CategoryMetadataMap, StorageError> {
        Ok(self.categories.read().unwrap().clone())
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::storage::StorageErrorKind;

    #[test]
    fn test_new_is_empty() {
        let storage = MockStorage::new();

        assert!(storage.scan().unwrap().is_empty());
        assert!(storage.category_metadata().unwrap().is_empty());
    }

    #[test]
    fn test_scan_is_sorted() {
        let storage = MockStorage::new()
            .with_file("z.md", "")
            .with_file("a/b.md", "")
            .with_file("a.md", "");

        assert_eq!(storage.scan().unwrap(), vec!["a.md", "a/b.md", "z.md"]);
    }

    #[test]
    fn test_read() {
        let storage = MockStorage::new()
            .with_content_path("website/docs")
            .with_file("guide.md", "# Guide");

        let doc = storage.read("guide.md").unwrap();

        assert_eq!(doc.source, "guide.md");
        assert_eq!(doc.content, "# Guide");
        assert_eq!(doc.content_path, Path::new("website/docs"));
        assert_eq!(doc.file_path, Path::new("website/docs/guide.md"));
        assert_eq!(doc.last_update, LastUpdate::default());
    }

    #[test]
    fn test_read_not_found() {
        let storage = MockStorage::new();

        let err = storage.read("missing.md").unwrap_err();

        assert_eq!(err.kind, StorageErrorKind::NotFound);
        assert_eq!(err.backend, Some("Mock"));
    }

    #[test]
    fn test_read_with_last_update() {
        let update = LastUpdate {
            last_updated_at: Some(1_539_502_055),
            last_updated_by: Some("Author".to_owned()),
        };
        let storage = MockStorage::new()
            .with_file("guide.md", "")
            .with_last_update("guide.md", update.clone());

        assert_eq!(storage.read("guide.md").unwrap().last_update, update);
    }

    #[test]
    fn test_category_metadata() {
        let meta = CategoryMetadata {
            label: Some("Guides".to_owned()),
            ..Default::default()
        };
        let storage = MockStorage::new().with_category("guides", meta.clone());

        let categories = storage.category_metadata().unwrap();

        assert_eq!(categories.get("guides"), Some(&meta));
    }
}
