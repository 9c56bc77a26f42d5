//! Source file classification for content discovery.
//!
//! This module classifies files discovered during scanning into content files
//! and category sidecar files.

use std::path::Path;

/// Extensions recognized as content files.
pub(crate) const CONTENT_EXTENSIONS: [&str; 2] = ["md", "mdx"];

/// Category sidecar file names, in lookup priority order.
pub(crate) const CATEGORY_FILENAMES: [&str; 3] =
    ["_category_.json", "_category_.yml", "_category_.yaml"];

/// The role a source file plays in a version's content tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SourceKind {
    /// Content file (.md / .mdx) - becomes a document
    Content,
    /// Category sidecar (`_category_.{json,yml,yaml}`) - configures its directory
    Category,
}

/// A source file discovered during scanning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SourceFile {
    /// Path relative to the content root, POSIX separators.
    pub rel_path: String,
    /// What kind of source this is
    pub kind: SourceKind,
}

impl SourceFile {
    /// Classify a path relative to the content root.
    ///
    /// Returns `None` for unrecognized file types.
    ///
    /// Note: This method assumes the caller has already filtered out
    /// hidden files and directories.
    pub fn classify(rel_path: &Path) -> Option<Self> {
        let filename = rel_path.file_name()?.to_string_lossy();
        let rel_path = to_posix(rel_path);

        if CATEGORY_FILENAMES.contains(&filename.as_ref()) {
            return Some(Self {
                rel_path,
                kind: SourceKind::Category,
            });
        }

        let is_content = Path::new(filename.as_ref())
            .extension()
            .is_some_and(|ext| CONTENT_EXTENSIONS.iter().any(|c| ext == *c));
        is_content.then_some(Self {
            rel_path,
            kind: SourceKind::Content,
        })
    }

    /// Directory key of a category sidecar (`"."` for the content root).
    pub fn category_dir(&self) -> String {
        match self.rel_path.rsplit_once('/') {
            Some((dir, _)) => dir.to_owned(),
            None => ".".to_owned(),
        }
    }
}

/// Convert a relative path to a POSIX string.
pub(crate) fn to_posix(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
