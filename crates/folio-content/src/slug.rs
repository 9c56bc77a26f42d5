//! Document slug resolution.

use crate::error::MetadataError;
use crate::number_prefix::{NumberPrefixParser, strip_path_number_prefixes};

/// Inputs of [`get_slug`].
pub struct SlugParams<'a> {
    /// Document id without directory (number prefix already stripped).
    pub base_id: &'a str,
    /// Front matter `slug`, if any.
    pub front_matter_slug: Option<&'a str>,
    /// Directory of the source relative to the content root (`.` for the root).
    pub source_dir_name: &'a str,
    /// Whether the file is the index of its directory.
    pub is_category_index: bool,
    /// Strip number prefixes from directory segments.
    pub strip_dir_number_prefixes: bool,
    /// Parser used for stripping.
    pub number_prefix_parser: &'a dyn NumberPrefixParser,
}

/// Compute the version-relative slug of a document.
///
/// - absolute front matter slugs are used verbatim
/// - relative front matter slugs resolve against the document directory
/// - a category index without front matter slug takes its directory's slug
/// - otherwise the base id resolves against the document directory
pub fn get_slug(params: &SlugParams<'_>) -> Result<String, MetadataError> {
    let slug = compute_slug(params);
    if is_valid_pathname(&slug) {
        Ok(slug)
    } else {
        Err(MetadataError::InvalidSlug {
            id: params.base_id.to_owned(),
            dir_name: params.source_dir_name.to_owned(),
            slug,
        })
    }
}

fn compute_slug(params: &SlugParams<'_>) -> String {
    if let Some(slug) = params.front_matter_slug.filter(|s| s.starts_with('/')) {
        return slug.to_owned();
    }

    let dir_slug = dir_name_slug(params);
    if params.front_matter_slug.is_none() && params.is_category_index {
        if dir_slug == "/" {
            return dir_slug;
        }
        return dir_slug.trim_end_matches('/').to_owned();
    }

    let base = params.front_matter_slug.unwrap_or(params.base_id);
    resolve_pathname(base, &dir_slug)
}

/// `/` for the content root, `/<dir>/` otherwise.
fn dir_name_slug(params: &SlugParams<'_>) -> String {
    if params.source_dir_name == "." {
        return "/".to_owned();
    }
    let dir = if params.strip_dir_number_prefixes {
        strip_path_number_prefixes(params.source_dir_name, params.number_prefix_parser)
    } else {
        params.source_dir_name.to_owned()
    };
    format!("/{}/", dir.trim_matches('/'))
}

/// Resolve a relative path against a directory URL ending in `/`.
fn resolve_pathname(relative: &str, base_dir: &str) -> String {
    let mut segments: Vec<&str> = base_dir.split('/').filter(|s| !s.is_empty()).collect();
    for segment in relative.split('/').filter(|s| !s.is_empty()) {
        match segment {
            "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }

    let mut resolved = format!("/{}", segments.join("/"));
    if relative.ends_with('/') && resolved != "/" {
        resolved.push('/');
    }
    resolved
}

/// Whether a slug survives URL parsing unchanged.
pub fn is_valid_pathname(slug: &str) -> bool {
    if !slug.starts_with('/') {
        return false;
    }
    if slug
        .chars()
        .any(|c| c.is_whitespace() || matches!(c, '?' | '#' | '\\' | '"' | '<' | '>' | '`' | '{' | '}'))
    {
        return false;
    }
    !slug.split('/').any(|segment| segment == "." || segment == "..")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::number_prefix::{DefaultNumberPrefixParser, DisabledNumberPrefixParser};

    fn params<'a>(base_id: &'a str, dir: &'a str, fm_slug: Option<&'a str>) -> SlugParams<'a> {
        SlugParams {
            base_id,
            front_matter_slug: fm_slug,
            source_dir_name: dir,
            is_category_index: false,
            strip_dir_number_prefixes: true,
            number_prefix_parser: &DefaultNumberPrefixParser,
        }
    }

    #[test]
    fn test_slug_from_base_id() {
        assert_eq!(get_slug(&params("intro", ".", None)).unwrap(), "/intro");
        assert_eq!(
            get_slug(&params("setup", "guides", None)).unwrap(),
            "/guides/setup"
        );
    }

    #[test]
    fn test_dir_number_prefixes_stripped() {
        assert_eq!(
            get_slug(&params("setup", "01-guides/02-advanced", None)).unwrap(),
            "/guides/advanced/setup"
        );

        let mut kept = params("setup", "01-guides", None);
        kept.strip_dir_number_prefixes = false;
        assert_eq!(get_slug(&kept).unwrap(), "/01-guides/setup");

        let mut disabled = params("setup", "01-guides", None);
        disabled.number_prefix_parser = &DisabledNumberPrefixParser;
        assert_eq!(get_slug(&disabled).unwrap(), "/01-guides/setup");
    }

    #[test]
    fn test_absolute_front_matter_slug() {
        assert_eq!(
            get_slug(&params("setup", "guides", Some("/custom/path"))).unwrap(),
            "/custom/path"
        );
    }

    #[test]
    fn test_relative_front_matter_slug() {
        assert_eq!(
            get_slug(&params("setup", "guides", Some("install"))).unwrap(),
            "/guides/install"
        );
        assert_eq!(
            get_slug(&params("setup", "guides/deep", Some("../up"))).unwrap(),
            "/guides/up"
        );
        assert_eq!(
            get_slug(&params("setup", "guides", Some("trailing/"))).unwrap(),
            "/guides/trailing/"
        );
    }

    #[test]
    fn test_category_index_takes_directory_slug() {
        let mut index = params("index", "01-guides", None);
        index.is_category_index = true;
        assert_eq!(get_slug(&index).unwrap(), "/guides");

        let mut root = params("index", ".", None);
        root.is_category_index = true;
        assert_eq!(get_slug(&root).unwrap(), "/");

        let mut with_slug = params("index", "guides", Some("overview"));
        with_slug.is_category_index = true;
        assert_eq!(get_slug(&with_slug).unwrap(), "/guides/overview");
    }

    #[test]
    fn test_invalid_slug_rejected() {
        let err = get_slug(&params("setup", "guides", Some("/a?b"))).unwrap_err();
        match err {
            MetadataError::InvalidSlug { id, dir_name, slug } => {
                assert_eq!(id, "setup");
                assert_eq!(dir_name, "guides");
                assert_eq!(slug, "/a?b");
            }
            other => panic!("unexpected error: {other}"),
        }

        assert!(get_slug(&params("a b", ".", None)).is_err());
        assert!(get_slug(&params("x", ".", Some("/a/../b"))).is_err());
    }

    #[test]
    fn test_is_valid_pathname() {
        assert!(is_valid_pathname("/"));
        assert!(is_valid_pathname("/docs/intro"));
        assert!(is_valid_pathname("/docs/intro/"));
        assert!(!is_valid_pathname("docs"));
        assert!(!is_valid_pathname("/a#b"));
        assert!(!is_valid_pathname("/a/./b"));
    }
}
