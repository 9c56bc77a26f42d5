//! URL joining, aliased source paths and the source-to-permalink map.

use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::metadata::DocMetadataBase;

/// Aliased source path (`@site/docs/intro.md`) to permalink (`/docs/intro`).
pub type SourceToPermalink = BTreeMap<String, String>;

/// Prefix of site-relative source paths.
pub const SITE_ALIAS: &str = "@site";

static BARE_PROTOCOL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^/:]+:/*$").unwrap());
static PROTOCOL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^([^/:]+):/*").unwrap());
static SLASH_BEFORE_QUERY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/(\?|&|#[^!/])").unwrap());
static DUPLICATE_SLASH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([^:/]/)/+").unwrap());
static LEADING_SLASHES_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^/+").unwrap());

/// Join URL parts with exactly one slash between them.
///
/// Protocol slashes are preserved, a trailing slash on the last part is kept,
/// and slashes before `?` or `#` are dropped.
///
/// ```
/// use folio_content::normalize_url;
///
/// assert_eq!(normalize_url(&["/docs/", "/intro"]), "/docs/intro");
/// assert_eq!(normalize_url(&["/docs", "/"]), "/docs/");
/// assert_eq!(normalize_url(&["https://e.com/", "edit/", "a.md"]), "https://e.com/edit/a.md");
/// ```
pub fn normalize_url(parts: &[&str]) -> String {
    let mut urls: Vec<String> = parts.iter().map(|p| (*p).to_owned()).collect();
    if urls.is_empty() {
        return String::new();
    }

    if urls.len() > 1 && BARE_PROTOCOL_RE.is_match(&urls[0]) {
        let first = urls.remove(0);
        if first.starts_with("file:") && urls[0].starts_with('/') {
            urls[0] = format!("{first}//{}", urls[0]);
        } else {
            urls[0] = format!("{first}{}", urls[0]);
        }
    }

    let replacement = if urls[0].starts_with("file:///") {
        "$1:///"
    } else {
        "$1://"
    };
    urls[0] = PROTOCOL_RE.replace(&urls[0], replacement).into_owned();

    let last = urls.len() - 1;
    let mut has_ending_slash = false;
    let mut result: Vec<String> = Vec::with_capacity(urls.len());
    for (i, url) in urls.iter().enumerate() {
        if url.is_empty() {
            if i == last && has_ending_slash {
                result.push("/".to_owned());
            }
            continue;
        }

        let mut component = url.clone();
        if component != "/" {
            if i > 0 {
                let leading = if has_ending_slash { "" } else { "/" };
                component = LEADING_SLASHES_RE.replace(&component, leading).into_owned();
            }
            has_ending_slash = component.ends_with('/');
            let trimmed = component.trim_end_matches('/');
            component = if component.len() == trimmed.len() {
                component
            } else if i < last {
                trimmed.to_owned()
            } else {
                format!("{trimmed}/")
            };
        }
        result.push(component);
    }

    let joined = result.join("/");
    let joined = SLASH_BEFORE_QUERY_RE.replace_all(&joined, "$1");

    let mut query_parts = joined.split('?');
    let mut url = query_parts.next().unwrap_or_default().to_owned();
    let rest: Vec<&str> = query_parts.collect();
    if !rest.is_empty() {
        url.push('?');
        url.push_str(&rest.join("&"));
    }

    let url = DUPLICATE_SLASH_RE.replace_all(&url, "$1");
    LEADING_SLASHES_RE.replace(&url, "/").into_owned()
}

/// Resolve `.` and `..` components without touching the file system.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut result = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !result.pop() {
                    result.push("..");
                }
            }
            other => result.push(other.as_os_str()),
        }
    }
    result
}

/// Relative path from `base` to `path`, computed lexically.
pub fn relative_path(base: &Path, path: &Path) -> PathBuf {
    let base = normalize_path(base);
    let path = normalize_path(path);
    let base_components: Vec<Component<'_>> = base.components().collect();
    let path_components: Vec<Component<'_>> = path.components().collect();

    let common = base_components
        .iter()
        .zip(&path_components)
        .take_while(|(a, b)| a == b)
        .count();

    let mut result = PathBuf::new();
    for _ in common..base_components.len() {
        result.push("..");
    }
    for component in &path_components[common..] {
        result.push(component.as_os_str());
    }
    result
}

/// Path with `/` separators.
pub fn posix_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
        .replace("//", "/")
}

/// Site-relative alias of a file path (`@site/docs/intro.md`).
pub fn aliased_site_path(path: &Path, site_dir: &Path) -> String {
    format!("{SITE_ALIAS}/{}", posix_path(&relative_path(site_dir, path)))
}

/// Build the source-to-permalink map of a set of documents.
pub fn source_to_permalink<'a>(
    docs: impl IntoIterator<Item = &'a DocMetadataBase>,
) -> SourceToPermalink {
    docs.into_iter()
        .map(|doc| (doc.source.clone(), doc.permalink.clone()))
        .collect()
}
