//! Number prefix parsing for file and directory names.
//!
//! A number prefix (`01-intro`, `2. Setup`, `10_api`) orders siblings in an
//! autogenerated sidebar and is stripped from ids, slugs and labels.

use std::sync::LazyLock;

use regex::Regex;

/// Leading number, separators, then the name proper.
static NUMBER_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\s*[-_.]+\s*([^-_.\s].*)$").unwrap());

/// Names such as `2021-01-31` or `31.01.2021-release`.
static DATE_LIKE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\d{2}|\d{4})[-_.]\d{2}(?:[-_.](?:\d{2}|\d{4}))?").unwrap()
});

/// Names such as `1.2.3` or `2_0-beta`.
static VERSION_LIKE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+[-_.]\d+(?:[-_.]\d+)?").unwrap());

/// Result of parsing a file or directory name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NumberPrefix {
    /// Name with the prefix removed.
    pub filename: String,
    /// Parsed prefix, if any.
    pub number_prefix: Option<u32>,
}

impl NumberPrefix {
    fn unchanged(filename: &str) -> Self {
        Self {
            filename: filename.to_owned(),
            number_prefix: None,
        }
    }
}

/// Strategy for extracting number prefixes from names.
pub trait NumberPrefixParser: Send + Sync {
    /// Parse a single file or directory name (no slashes).
    fn parse(&self, filename: &str) -> NumberPrefix;
}

/// Parser used when number prefix parsing is enabled.
///
/// Date-like and version-like names are left untouched.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultNumberPrefixParser;

impl NumberPrefixParser for DefaultNumberPrefixParser {
    fn parse(&self, filename: &str) -> NumberPrefix {
        if DATE_LIKE_RE.is_match(filename) || VERSION_LIKE_RE.is_match(filename) {
            return NumberPrefix::unchanged(filename);
        }

        let Some(caps) = NUMBER_PREFIX_RE.captures(filename) else {
            return NumberPrefix::unchanged(filename);
        };

        // Prefixes too large for u32 are not ordering hints.
        match caps[1].parse::<u32>() {
            Ok(prefix) => NumberPrefix {
                filename: caps[2].to_owned(),
                number_prefix: Some(prefix),
            },
            Err(_) => NumberPrefix::unchanged(filename),
        }
    }
}

/// Parser used when number prefix parsing is disabled.
#[derive(Clone, Copy, Debug, Default)]
pub struct DisabledNumberPrefixParser;

impl NumberPrefixParser for DisabledNumberPrefixParser {
    fn parse(&self, filename: &str) -> NumberPrefix {
        NumberPrefix::unchanged(filename)
    }
}

/// Select a parser from the `number_prefix_parsing` setting.
#[must_use]
pub fn number_prefix_parser(enabled: bool) -> &'static dyn NumberPrefixParser {
    if enabled {
        &DefaultNumberPrefixParser
    } else {
        &DisabledNumberPrefixParser
    }
}

/// Strip number prefixes from every segment of a POSIX path.
///
/// ```
/// use folio_content::{DefaultNumberPrefixParser, strip_path_number_prefixes};
///
/// assert_eq!(
///     strip_path_number_prefixes("01-guides/02-setup", &DefaultNumberPrefixParser),
///     "guides/setup"
/// );
/// ```
pub fn strip_path_number_prefixes(path: &str, parser: &dyn NumberPrefixParser) -> String {
    path.split('/')
        .map(|segment| parser.parse(segment).filename)
        .collect::<Vec<_>>()
        .join("/")
}
