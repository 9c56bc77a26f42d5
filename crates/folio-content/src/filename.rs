//! Content path parsing.
//!
//! Turns a relative content path into a date, a canonical text and a slug:
//!
//! | Path | Date | Text | Slug |
//! |------|------|------|------|
//! | `some-post.md` | - | `some-post` | `/some-post` |
//! | `2021-05-12-foo/index.md` | 2021-05-12 | `foo` | `/2021/05/12/foo` |
//! | `2021/05-12-foo/index.md` | 2021-05-12 | `foo` | `/2021/05/12/foo` |
//! | `team-a/2021/05/12/x.md` | 2021-05-12 | `x` | `/2021/05/12/team-a/x` |
//! | `01-guides/02-setup.md` | - | `guides/setup` | `/guides/setup` |
//!
//! Parsing is a pure function of the path string and never touches the file system.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::number_prefix::{NumberPrefixParser, strip_path_number_prefixes};

/// Content extension at the end of a path.
static EXTENSION_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\.mdx?$").unwrap());

/// Last date in the path; the date may span directory boundaries.
static DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<folder>.*)(?P<year>\d{4})[-/](?P<month>\d{1,2})[-/](?P<day>\d{1,2})[-/]?(?P<text>.*)$")
        .unwrap()
});

/// Parsed content path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedFileName {
    /// Date found in the path, if any.
    pub date: Option<NaiveDate>,
    /// Path with extension, index file, date and number prefixes removed.
    ///
    /// For dated paths this is the part after the date.
    pub text: String,
    /// Site-relative slug: `/` + optional `YYYY/MM/DD/` + cleaned path.
    pub slug: String,
    /// Number prefix of the last path segment, kept for ordering.
    pub number_prefix: Option<u32>,
}

/// Whether a file stem marks the index of its directory.
#[must_use]
pub fn is_index_name(stem: &str) -> bool {
    stem.eq_ignore_ascii_case("index") || stem.eq_ignore_ascii_case("readme")
}

/// Decides whether a document is the index of its directory.
///
/// Receives the file name without extension and the ancestor directory names,
/// closest first (`guides/setup/index.md` gives `("index", ["setup", "guides"])`).
pub type IsCategoryIndex = fn(&str, &[&str]) -> bool;

/// Default category index matcher: `index` or `readme`, in any case.
pub fn default_is_category_index(file_name: &str, _directories: &[&str]) -> bool {
    is_index_name(file_name)
}

/// Ancestor directory names of a source path, closest first.
pub fn ancestor_directories(source_dir_name: &str) -> Vec<&str> {
    source_dir_name
        .split('/')
        .filter(|s| !s.is_empty() && *s != ".")
        .rev()
        .collect()
}

/// Parse a POSIX-style relative content path.
///
/// ```
/// use folio_content::{DefaultNumberPrefixParser, parse_file_name};
///
/// let parsed = parse_file_name("2021-05-12-foo/index.md", &DefaultNumberPrefixParser);
/// assert_eq!(parsed.text, "foo");
/// assert_eq!(parsed.slug, "/2021/05/12/foo");
/// ```
pub fn parse_file_name(path: &str, parser: &dyn NumberPrefixParser) -> ParsedFileName {
    let path = path.replace('\\', "/");
    let without_ext = EXTENSION_RE.replace(&path, "");
    let trimmed = strip_index_segment(without_ext.trim_matches('/'));

    let number_prefix = trimmed
        .rsplit('/')
        .next()
        .and_then(|last| parser.parse(last).number_prefix);

    if let Some((date, folder, rest)) = split_date(trimmed) {
        let text = strip_path_number_prefixes(rest, parser);
        let dated_path = format!("{folder}{rest}");
        let slug = normalize_slug(&format!(
            "/{}/{}",
            date.format("%Y/%m/%d"),
            strip_path_number_prefixes(&dated_path, parser)
        ));
        return ParsedFileName {
            date: Some(date),
            text: text.trim_matches('/').to_owned(),
            slug,
            number_prefix,
        };
    }

    let text = strip_path_number_prefixes(trimmed, parser);
    ParsedFileName {
        slug: normalize_slug(&format!("/{text}")),
        date: None,
        text,
        number_prefix,
    }
}

/// Drop a trailing `index`/`readme` segment, promoting its directory.
fn strip_index_segment(path: &str) -> &str {
    match path.rsplit_once('/') {
        Some((dir, last)) if is_index_name(last) => dir,
        None if is_index_name(path) => "",
        _ => path,
    }
}

/// Find the last valid date in a path.
///
/// Returns the date, the text before it and the text after it.
fn split_date(path: &str) -> Option<(NaiveDate, &str, &str)> {
    let caps = DATE_RE.captures(path)?;
    let year = caps["year"].parse().ok()?;
    let month = caps["month"].parse().ok()?;
    let day = caps["day"].parse().ok()?;
    let date = NaiveDate::from_ymd_opt(year, month, day)?;

    let folder = caps.name("folder").map_or("", |m| m.as_str());
    let text = caps.name("text").map_or("", |m| m.as_str());
    Some((date, folder, text))
}

/// Merge duplicate slashes and drop a trailing slash (except for the root).
fn normalize_slug(slug: &str) -> String {
    let segments: Vec<&str> = slug.split('/').filter(|s| !s.is_empty()).collect();
    format!("/{}", segments.join("/"))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::number_prefix::{DefaultNumberPrefixParser, DisabledNumberPrefixParser};

    fn parse(path: &str) -> ParsedFileName {
        parse_file_name(path, &DefaultNumberPrefixParser)
    }

    fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn test_undated_file() {
        assert_eq!(
            parse("some-post.md"),
            ParsedFileName {
                date: None,
                text: "some-post".to_owned(),
                slug: "/some-post".to_owned(),
                number_prefix: None,
            }
        );
    }

    #[test]
    fn test_dated_folder_with_index() {
        let parsed = parse("2021-05-12-foo/index.md");
        assert_eq!(parsed.date, date(2021, 5, 12));
        assert_eq!(parsed.text, "foo");
        assert_eq!(parsed.slug, "/2021/05/12/foo");
    }

    #[test]
    fn test_split_date_is_equivalent() {
        assert_eq!(parse("2021/05-12-foo/index.md"), parse("2021-05-12-foo/index.md"));
        assert_eq!(parse("2021/05/12/foo.mdx"), parse("2021-05-12-foo.md"));
    }

    #[test]
    fn test_date_mid_path_front_loads_date() {
        let parsed = parse("team-a/2021/05/12/announcing.md");
        assert_eq!(parsed.date, date(2021, 5, 12));
        assert_eq!(parsed.text, "announcing");
        assert_eq!(parsed.slug, "/2021/05/12/team-a/announcing");
    }

    #[test]
    fn test_date_inside_segment_keeps_surrounding_text() {
        let parsed = parse("team-a-2021-05-12-hey/announcing.md");
        assert_eq!(parsed.date, date(2021, 5, 12));
        assert_eq!(parsed.text, "hey/announcing");
        assert_eq!(parsed.slug, "/2021/05/12/team-a-hey/announcing");
    }

    #[test]
    fn test_date_only_file() {
        let parsed = parse("2021-05-12.md");
        assert_eq!(parsed.date, date(2021, 5, 12));
        assert_eq!(parsed.text, "");
        assert_eq!(parsed.slug, "/2021/05/12");
    }

    #[test]
    fn test_invalid_date_is_text() {
        let parsed = parse("2021-13-45-foo.md");
        assert_eq!(parsed.date, None);
        assert_eq!(parsed.slug, "/2021-13-45-foo");
    }

    #[test]
    fn test_number_prefixes_stripped() {
        let parsed = parse("01-guides/02-setup.md");
        assert_eq!(parsed.date, None);
        assert_eq!(parsed.text, "guides/setup");
        assert_eq!(parsed.slug, "/guides/setup");
        assert_eq!(parsed.number_prefix, Some(2));
    }

    #[test]
    fn test_number_prefixes_kept_when_disabled() {
        let parsed = parse_file_name("01-guides/02-setup.md", &DisabledNumberPrefixParser);
        assert_eq!(parsed.text, "01-guides/02-setup");
        assert_eq!(parsed.slug, "/01-guides/02-setup");
        assert_eq!(parsed.number_prefix, None);
    }

    #[test]
    fn test_index_and_readme_promote_directory() {
        assert_eq!(parse("guides/index.md").slug, "/guides");
        assert_eq!(parse("guides/README.md").slug, "/guides");
        assert_eq!(parse("guides/Index.mdx").text, "guides");
        assert_eq!(parse("index.md").slug, "/");
    }

    #[test]
    fn test_default_is_category_index() {
        assert!(default_is_category_index("index", &["guides"]));
        assert!(default_is_category_index("README", &[]));
        assert!(!default_is_category_index("guides", &["guides"]));
    }

    #[test]
    fn test_ancestor_directories() {
        assert_eq!(ancestor_directories("a/b/c"), vec!["c", "b", "a"]);
        assert!(ancestor_directories(".").is_empty());
    }

    #[test]
    fn test_windows_separators() {
        assert_eq!(parse(r"guides\setup.md").slug, "/guides/setup");
    }

    #[test]
    fn test_parse_is_pure() {
        let path = "2020/02/29/leap.md";
        assert_eq!(parse(path), parse(path));
        assert_eq!(parse(path).date, date(2020, 2, 29));
    }
}
