//! Document front matter.
//!
//! A document may start with a YAML block fenced by `---` lines. Known keys
//! are typed; everything else is kept in [`DocFrontMatter::extra`] so the
//! whole block round-trips to the output.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::MetadataError;

/// Typed view of a document's front matter.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DocFrontMatter {
    /// Overrides the id derived from the file name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Overrides the title taken from the first heading.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Overrides the excerpt.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Absolute (`/x`) or directory-relative (`x`) slug.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    /// Label in autogenerated sidebars.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sidebar_label: Option<String>,
    /// Position in autogenerated sidebars.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sidebar_position: Option<f64>,
    /// CSS class of the sidebar item.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sidebar_class_name: Option<String>,
    /// Props forwarded to the sidebar item.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sidebar_custom_props: Option<Map<String, Value>>,
    /// Edit URL override.
    ///
    /// - `None`: not set, the configured strategy applies
    /// - `Some(None)`: `custom_edit_url: null`, no edit link
    /// - `Some(Some(url))`: use this URL
    #[serde(
        default,
        deserialize_with = "deserialize_explicit_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub custom_edit_url: Option<Option<String>>,
    /// Whether number prefixes are stripped for this document (default true).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parse_number_prefixes: Option<bool>,
    /// Tags.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// SEO keywords.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
    /// Hide the page title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hide_title: Option<bool>,
    /// Label in previous/next navigation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination_label: Option<String>,
    /// All other keys.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DocFrontMatter {
    /// Whether number prefixes are stripped for this document.
    #[must_use]
    pub fn parse_number_prefixes(&self) -> bool {
        self.parse_number_prefixes.unwrap_or(true)
    }
}

fn deserialize_explicit_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Split a document into its front matter block and body.
///
/// Returns `(None, content)` when the document has no front matter or the
/// block is never closed.
pub fn split_front_matter(content: &str) -> (Option<&str>, &str) {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    let Some(first_line_end) = content.find('\n') else {
        return (None, content);
    };
    if content[..first_line_end].trim_end() != "---" {
        return (None, content);
    }

    let rest = &content[first_line_end + 1..];
    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            let yaml = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return (Some(yaml), body);
        }
        offset += line.len();
    }

    (None, content)
}

/// Parse a front matter YAML block.
///
/// Returns the typed view; an empty block yields the default.
pub fn parse_front_matter(yaml: &str) -> Result<DocFrontMatter, MetadataError> {
    if yaml.trim().is_empty() {
        return Ok(DocFrontMatter::default());
    }

    let value: serde_yaml::Value =
        serde_yaml::from_str(yaml).map_err(|e| MetadataError::FrontMatter(e.to_string()))?;
    let json = match serde_json::to_value(value) {
        Ok(Value::Null) => return Ok(DocFrontMatter::default()),
        Ok(json @ Value::Object(_)) => json,
        Ok(other) => {
            return Err(MetadataError::FrontMatter(format!(
                "expected a mapping, found {other}"
            )));
        }
        Err(e) => return Err(MetadataError::FrontMatter(e.to_string())),
    };

    serde_json::from_value(json).map_err(|e| MetadataError::FrontMatter(e.to_string()))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_split_front_matter() {
        let content = "---\nid: intro\n---\n# Title\n";
        assert_eq!(split_front_matter(content), (Some("id: intro\n"), "# Title\n"));
    }

    #[test]
    fn test_split_without_front_matter() {
        let content = "# Title\n---\n";
        assert_eq!(split_front_matter(content), (None, content));
    }

    #[test]
    fn test_split_unclosed_front_matter() {
        let content = "---\nid: intro\n# Title\n";
        assert_eq!(split_front_matter(content), (None, content));
    }

    #[test]
    fn test_split_empty_front_matter() {
        assert_eq!(split_front_matter("---\n---\nbody"), (Some(""), "body"));
    }

    #[test]
    fn test_split_crlf_and_bom() {
        let content = "\u{feff}---\r\ntitle: x\r\n---\r\nbody";
        assert_eq!(
            split_front_matter(content),
            (Some("title: x\r\n"), "body")
        );
    }

    #[test]
    fn test_parse_typed_fields() {
        let fm = parse_front_matter(
            "id: my-id\ntitle: My Title\nsidebar_position: 2\nsidebar_label: Short\nparse_number_prefixes: false\ntags: [a, b]\n",
        )
        .unwrap();

        assert_eq!(fm.id.as_deref(), Some("my-id"));
        assert_eq!(fm.title.as_deref(), Some("My Title"));
        assert_eq!(fm.sidebar_position, Some(2.0));
        assert_eq!(fm.sidebar_label.as_deref(), Some("Short"));
        assert!(!fm.parse_number_prefixes());
        assert_eq!(fm.tags, Some(vec!["a".to_owned(), "b".to_owned()]));
        assert!(fm.extra.is_empty());
    }

    #[test]
    fn test_custom_edit_url_tri_state() {
        assert_eq!(parse_front_matter("title: x").unwrap().custom_edit_url, None);
        assert_eq!(
            parse_front_matter("custom_edit_url: null").unwrap().custom_edit_url,
            Some(None)
        );
        assert_eq!(
            parse_front_matter("custom_edit_url: https://e.com/x")
                .unwrap()
                .custom_edit_url,
            Some(Some("https://e.com/x".to_owned()))
        );
    }

    #[test]
    fn test_extra_keys_round_trip() {
        let fm = parse_front_matter("title: T\nimage: /img/x.png\nlast_update:\n  author: me\n")
            .unwrap();

        assert_eq!(fm.extra.get("image"), Some(&json!("/img/x.png")));
        assert_eq!(
            serde_json::to_value(&fm).unwrap(),
            json!({"title": "T", "image": "/img/x.png", "last_update": {"author": "me"}})
        );
    }

    #[test]
    fn test_null_custom_edit_url_serializes_as_null() {
        let fm = parse_front_matter("custom_edit_url: null").unwrap();
        assert_eq!(
            serde_json::to_value(&fm).unwrap(),
            json!({"custom_edit_url": null})
        );
    }

    #[test]
    fn test_invalid_yaml() {
        let err = parse_front_matter("title: [unclosed").unwrap_err();
        assert!(matches!(err, MetadataError::FrontMatter(_)));
    }

    #[test]
    fn test_wrong_field_type() {
        let err = parse_front_matter("sidebar_position: first").unwrap_err();
        assert!(matches!(err, MetadataError::FrontMatter(_)));
    }

    #[test]
    fn test_non_mapping_rejected() {
        let err = parse_front_matter("- a\n- b").unwrap_err();
        assert!(err.to_string().contains("expected a mapping"));
    }

    #[test]
    fn test_empty_block_is_default() {
        assert_eq!(parse_front_matter("  \n").unwrap(), DocFrontMatter::default());
    }
}
