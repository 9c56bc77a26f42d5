//! Markdown link rewriting and excerpt truncation.
//!
//! Relative links to other content files (`[Setup](../guides/setup.md#install)`)
//! are rewritten to the permalink of the target document. Targets are looked up
//! in a [`SourceToPermalink`] map by their aliased path, trying in order:
//!
//! 1. the directory of the current file
//! 2. the localized content root of the version
//! 3. the content root of the version
//!
//! Links inside fenced code blocks are left alone. Unresolved links are
//! reported through a callback and kept verbatim.

use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use percent_encoding::{AsciiSet, CONTROLS, percent_decode_str, utf8_percent_encode};
use regex::Regex;

use crate::permalink::{SourceToPermalink, aliased_site_path, normalize_path};

/// Marker ending the excerpt of a document (Markdown or MDX comment form).
pub static TRUNCATE_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<!--\s*truncate\s*-->|\{/\*\s*truncate\s*\*/\}").unwrap()
});

/// Inline (`](x.md`) and reference-style (`]: x.md`) link targets.
/// Targets in angle brackets may contain spaces.
static MD_LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?:\]\(|\]:\s*)(?:<(?P<angled>[^'"\]\s<>]+(?:\s[^'"\]\s<>]+)*\.mdx?)>|(?P<link>[^'"\]\s<>]+\.mdx?))"#,
    )
    .unwrap()
});

/// Code fence line; a closing fence carries no info string.
static CODE_FENCE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(`{3,}|~{3,})").unwrap());

/// Characters escaped in rewritten permalinks.
const PERMALINK_ESCAPE: &AsciiSet = &CONTROLS.add(b' ').add(b'"').add(b'<').add(b'>');

/// Content before the first truncate marker, or the whole content.
///
/// ```
/// use folio_content::{TRUNCATE_MARKER, truncate};
///
/// assert_eq!(truncate("intro\n<!-- truncate -->\nrest", &TRUNCATE_MARKER), "intro\n");
/// assert_eq!(truncate("no marker", &TRUNCATE_MARKER), "no marker");
/// ```
pub fn truncate<'a>(content: &'a str, marker: &Regex) -> &'a str {
    marker.find(content).map_or(content, |m| &content[..m.start()])
}

/// Content roots of the version a file belongs to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContentPaths {
    /// Content root.
    pub content_path: PathBuf,
    /// Localized content root, if any.
    pub content_path_localized: Option<PathBuf>,
}

/// A relative content link that matched no known document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BrokenMarkdownLink {
    /// Full path of the file containing the link.
    pub file_path: PathBuf,
    /// Content roots searched.
    pub content_paths: ContentPaths,
    /// Link target as written.
    pub link: String,
}

/// Rewrites content links to permalinks.
pub struct Linkifier<'a> {
    site_dir: &'a Path,
    source_to_permalink: &'a SourceToPermalink,
}

impl<'a> Linkifier<'a> {
    /// Create a linkifier over a permalink map.
    pub fn new(site_dir: &'a Path, source_to_permalink: &'a SourceToPermalink) -> Self {
        Self {
            site_dir,
            source_to_permalink,
        }
    }

    /// Rewrite every resolvable content link in `content`.
    ///
    /// `on_broken` is called once per unresolved link occurrence.
    pub fn linkify(
        &self,
        file_path: &Path,
        content: &str,
        content_paths: &ContentPaths,
        mut on_broken: impl FnMut(BrokenMarkdownLink),
    ) -> String {
        let mut fence: Option<&str> = None;
        let mut lines = Vec::new();

        for line in content.split('\n') {
            if let Some(caps) = CODE_FENCE_RE.captures(line.trim_start()) {
                let marker = caps.get(1).map_or("", |m| m.as_str());
                match fence {
                    None => fence = Some(marker),
                    Some(open) if marker.starts_with(open) && line.trim() == marker => {
                        fence = None;
                    }
                    Some(_) => {}
                }
                lines.push(Cow::Borrowed(line));
                continue;
            }
            if fence.is_some() {
                lines.push(Cow::Borrowed(line));
                continue;
            }

            lines.push(self.linkify_line(line, file_path, content_paths, &mut on_broken));
        }

        lines.join("\n")
    }

    fn linkify_line<'l>(
        &self,
        line: &'l str,
        file_path: &Path,
        content_paths: &ContentPaths,
        on_broken: &mut impl FnMut(BrokenMarkdownLink),
    ) -> Cow<'l, str> {
        let mut result = String::new();
        let mut last_end = 0;

        for caps in MD_LINK_RE.captures_iter(line) {
            let Some(link) = caps.name("angled").or_else(|| caps.name("link")) else {
                continue;
            };
            let target = link.as_str();
            if is_external(target) {
                continue;
            }

            match self.resolve(target, file_path, content_paths) {
                Some(permalink) => {
                    result.push_str(&line[last_end..link.start()]);
                    result.extend(utf8_percent_encode(permalink, PERMALINK_ESCAPE));
                    last_end = link.end();
                }
                None => on_broken(BrokenMarkdownLink {
                    file_path: file_path.to_path_buf(),
                    content_paths: content_paths.clone(),
                    link: target.to_owned(),
                }),
            }
        }

        if last_end == 0 {
            return Cow::Borrowed(line);
        }
        result.push_str(&line[last_end..]);
        Cow::Owned(result)
    }

    /// Permalink of a link target, trying each candidate root in order.
    fn resolve(
        &self,
        target: &str,
        file_path: &Path,
        content_paths: &ContentPaths,
    ) -> Option<&'a str> {
        let decoded = percent_decode_str(target).decode_utf8_lossy();
        let is_absolute = decoded.starts_with('/');
        let relative = decoded.trim_start_matches('/');

        let file_dir = file_path.parent().filter(|_| !is_absolute);
        let candidates = file_dir
            .into_iter()
            .chain(content_paths.content_path_localized.as_deref())
            .chain(std::iter::once(content_paths.content_path.as_path()));

        for root in candidates {
            let source = aliased_site_path(&normalize_path(&root.join(relative)), self.site_dir);
            if let Some(permalink) = self.source_to_permalink.get(&source) {
                return Some(permalink.as_str());
            }
        }
        None
    }
}

fn is_external(target: &str) -> bool {
    target.starts_with("http://") || target.starts_with("https://") || target.starts_with("@site/")
}
