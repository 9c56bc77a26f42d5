//! Content discovery by filesystem walking.
//!
//! This module separates the discovery phase (finding files) from the reading
//! phase. The Scanner only identifies files that belong to a version's content
//! tree, returning lightweight references for `FsStorage` to process.

use std::fs;
use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};

use crate::source::{SourceFile, SourceKind};

/// `*` must not cross directory boundaries; `**` does.
const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Discovers content and category files by walking the filesystem.
///
/// Content files are kept when they match at least one include pattern and
/// no exclude pattern. Category sidecars are kept unless excluded.
pub(crate) struct Scanner {
    root: PathBuf,
    include: Vec<Pattern>,
    exclude: Vec<Pattern>,
}

impl Scanner {
    /// Create a new Scanner.
    pub fn new(root: PathBuf, include: Vec<Pattern>, exclude: Vec<Pattern>) -> Self {
        Self {
            root,
            include,
            exclude,
        }
    }

    /// Scan filesystem and return source files sorted by relative path.
    ///
    /// Returns an empty Vec if the root directory doesn't exist.
    pub fn scan(&self) -> Vec<SourceFile> {
        let mut files = Vec::new();
        if self.root.is_dir() {
            self.scan_directory(&self.root, &mut files);
        }
        files.sort_by(|a, b| a.rel_path.cmp(&b.rel_path));
        files
    }

    fn scan_directory(&self, dir_path: &Path, files: &mut Vec<SourceFile>) {
        let Ok(entries) = fs::read_dir(dir_path) else {
            tracing::debug!(path = %dir_path.display(), "Unreadable directory, skipping");
            return;
        };

        for entry in entries.filter_map(Result::ok) {
            // Skip hidden files/dirs
            if entry.file_name().to_string_lossy().starts_with('.') {
                continue;
            }

            let path = entry.path();
            if entry.file_type().is_ok_and(|t| t.is_dir()) {
                self.scan_directory(&path, files);
                continue;
            }

            let Ok(rel_path) = path.strip_prefix(&self.root) else {
                continue;
            };
            let Some(source) = SourceFile::classify(rel_path) else {
                continue;
            };
            if self.accepts(&source) {
                files.push(source);
            }
        }
    }

    fn accepts(&self, source: &SourceFile) -> bool {
        let matches = |p: &Pattern| p.matches_with(&source.rel_path, MATCH_OPTIONS);
        if self.exclude.iter().any(matches) {
            return false;
        }
        match source.kind {
            SourceKind::Content => self.include.iter().any(matches),
            SourceKind::Category => true,
        }
    }
}
