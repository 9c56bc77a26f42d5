//! Edit URL strategies.

use std::fmt;
use std::sync::Arc;

use crate::permalink::normalize_url;

/// Arguments passed to an [`EditUrl::Function`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditUrlParams {
    /// Version name (`current`, `1.0.0`, ...).
    pub version: String,
    /// Site-relative content root of the version (`versioned_docs/version-1.0.0`).
    pub version_docs_dir_path: String,
    /// Content-root-relative path of the document.
    pub doc_path: String,
    /// Permalink of the document.
    pub permalink: String,
    /// Active locale.
    pub locale: String,
}

/// Computes an edit URL from [`EditUrlParams`].
pub type EditUrlFn = dyn Fn(&EditUrlParams) -> Option<String> + Send + Sync;

/// How edit links are computed.
#[derive(Clone)]
pub enum EditUrl {
    /// Repository URL the site directory is published under.
    Template(String),
    /// Arbitrary function.
    Function(Arc<EditUrlFn>),
}

impl fmt::Debug for EditUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Template(base) => f.debug_tuple("Template").field(base).finish(),
            Self::Function(_) => f.write_str("Function(..)"),
        }
    }
}

impl EditUrl {
    /// Wrap a closure.
    pub fn function<F>(f: F) -> Self
    where
        F: Fn(&EditUrlParams) -> Option<String> + Send + Sync + 'static,
    {
        Self::Function(Arc::new(f))
    }
}

/// Join an edit URL base with a relative file path.
///
/// Returns `None` when there is no base.
pub fn get_edit_url(file_relative_path: &str, base: Option<&str>) -> Option<String> {
    base.map(|base| normalize_url(&[base, &file_relative_path.replace('\\', "/")]))
}
