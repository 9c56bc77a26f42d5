//! Markdown body inspection: front matter, content title and excerpt.

use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};

use crate::error::MetadataError;
use crate::front_matter::{DocFrontMatter, parse_front_matter, split_front_matter};
use crate::linkify::{TRUNCATE_MARKER, truncate};

/// A document split into its parts.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParsedMarkdown {
    /// Typed front matter (default when absent).
    pub front_matter: DocFrontMatter,
    /// Content after the front matter block.
    pub body: String,
    /// Text of the leading level-1 heading.
    pub content_title: Option<String>,
    /// Plain text of the first paragraph before the truncate marker.
    pub excerpt: Option<String>,
}

/// Parse a raw document.
pub fn parse_markdown_string(content: &str) -> Result<ParsedMarkdown, MetadataError> {
    let (yaml, body) = split_front_matter(content);
    let front_matter = match yaml {
        Some(yaml) => parse_front_matter(yaml)?,
        None => DocFrontMatter::default(),
    };

    let markdown = strip_mdx_statements(body);
    let content_title = extract_content_title(&markdown);
    let excerpt = extract_excerpt(truncate(&markdown, &TRUNCATE_MARKER));

    Ok(ParsedMarkdown {
        front_matter,
        body: body.to_owned(),
        content_title,
        excerpt,
    })
}

/// Drop MDX `import`/`export` lines so they are not mistaken for prose.
fn strip_mdx_statements(body: &str) -> String {
    body.lines()
        .filter(|line| !(line.starts_with("import ") || line.starts_with("export ")))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Text of the first block when it is a level-1 heading.
fn extract_content_title(markdown: &str) -> Option<String> {
    let mut events = Parser::new_ext(markdown, Options::empty());

    match events.next()? {
        Event::Start(Tag::Heading {
            level: HeadingLevel::H1,
            ..
        }) => {}
        _ => return None,
    }

    let mut title = String::new();
    for event in events {
        match event {
            Event::End(TagEnd::Heading(_)) => break,
            Event::Text(text) | Event::Code(text) => title.push_str(&text),
            Event::SoftBreak | Event::HardBreak => title.push(' '),
            _ => {}
        }
    }

    let title = title.trim();
    (!title.is_empty()).then(|| title.to_owned())
}

/// Plain text of the first non-empty paragraph.
fn extract_excerpt(markdown: &str) -> Option<String> {
    let mut in_paragraph = false;
    let mut image_depth = 0usize;
    let mut text = String::new();

    for event in Parser::new_ext(markdown, Options::empty()) {
        match event {
            Event::Start(Tag::Paragraph) => {
                in_paragraph = true;
                text.clear();
            }
            Event::End(TagEnd::Paragraph) => {
                in_paragraph = false;
                let excerpt = text.split_whitespace().collect::<Vec<_>>().join(" ");
                if !excerpt.is_empty() {
                    return Some(excerpt);
                }
            }
            Event::Start(Tag::Image { .. }) => image_depth += 1,
            Event::End(TagEnd::Image) => image_depth = image_depth.saturating_sub(1),
            Event::Text(t) | Event::Code(t) if in_paragraph && image_depth == 0 => {
                text.push_str(&t);
            }
            Event::SoftBreak | Event::HardBreak if in_paragraph => text.push(' '),
            _ => {}
        }
    }

    None
}
