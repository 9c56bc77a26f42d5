//! Sidebar item types.
//!
//! A sidebar goes through two shapes:
//!
//! - [`NormalizedSidebarItem`]: shorthands expanded, `autogenerated`
//!   placeholders still present
//! - [`SidebarItem`]: placeholders replaced by generated items
//!
//! Both serialize as objects tagged with `type`.

use std::collections::BTreeMap;

use folio_storage::CategoryLink;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Link to a document (`doc`) or a reference that does not mark the
/// document as part of the sidebar (`ref`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SidebarItemDoc {
    /// Version-local document id.
    pub id: String,
    /// Label override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// CSS class.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    /// Props forwarded to the renderer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_props: Option<Map<String, Value>>,
}

impl SidebarItemDoc {
    /// Doc item with only an id.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: None,
            class_name: None,
            custom_props: None,
        }
    }
}

/// Arbitrary link.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SidebarItemLink {
    /// Target URL.
    pub href: String,
    /// Label.
    pub label: String,
    /// CSS class.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    /// Props forwarded to the renderer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_props: Option<Map<String, Value>>,
}

/// Placeholder replaced by the items generated from a directory.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SidebarItemAutogenerated {
    /// Directory relative to the content root (`.` for the whole version).
    pub dir_name: String,
}

/// Category owning an ordered list of children.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SidebarCategory<T> {
    /// Label.
    pub label: String,
    /// Children, in display order.
    pub items: Vec<T>,
    /// Whether the category starts collapsed.
    pub collapsed: bool,
    /// Whether the category can be collapsed.
    pub collapsible: bool,
    /// Link of the category label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<CategoryLink>,
    /// CSS class.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    /// Props forwarded to the renderer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_props: Option<Map<String, Value>>,
}

impl<T> SidebarCategory<T> {
    /// Same category with different children.
    pub fn with_items<U>(&self, items: Vec<U>) -> SidebarCategory<U> {
        SidebarCategory {
            label: self.label.clone(),
            items,
            collapsed: self.collapsed,
            collapsible: self.collapsible,
            link: self.link.clone(),
            class_name: self.class_name.clone(),
            custom_props: self.custom_props.clone(),
        }
    }
}

/// Sidebar item before autogenerated expansion.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NormalizedSidebarItem {
    /// Document link.
    Doc(SidebarItemDoc),
    /// Document reference.
    Ref(SidebarItemDoc),
    /// Arbitrary link.
    Link(SidebarItemLink),
    /// Category.
    Category(SidebarCategory<NormalizedSidebarItem>),
    /// Directory placeholder.
    Autogenerated(SidebarItemAutogenerated),
}

impl NormalizedSidebarItem {
    /// Doc item with only an id.
    pub fn doc(id: impl Into<String>) -> Self {
        Self::Doc(SidebarItemDoc::new(id))
    }

    /// Autogenerated placeholder for a directory.
    pub fn autogenerated(dir_name: impl Into<String>) -> Self {
        Self::Autogenerated(SidebarItemAutogenerated {
            dir_name: dir_name.into(),
        })
    }
}

/// Sidebar item after autogenerated expansion.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SidebarItem {
    /// Document link.
    Doc(SidebarItemDoc),
    /// Document reference.
    Ref(SidebarItemDoc),
    /// Arbitrary link.
    Link(SidebarItemLink),
    /// Category.
    Category(SidebarCategory<SidebarItem>),
}

impl SidebarItem {
    /// Doc item with only an id.
    pub fn doc(id: impl Into<String>) -> Self {
        Self::Doc(SidebarItemDoc::new(id))
    }
}

/// Normalized sidebar.
pub type NormalizedSidebar = Vec<NormalizedSidebarItem>;

/// Normalized sidebars by name.
pub type NormalizedSidebars = BTreeMap<String, NormalizedSidebar>;

/// Processed sidebar.
pub type Sidebar = Vec<SidebarItem>;

/// Processed sidebars by name.
pub type Sidebars = BTreeMap<String, Sidebar>;

/// Sidebar-wide defaults.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SidebarOptions {
    /// Default `collapsible` of categories.
    pub sidebar_collapsible: bool,
    /// Default `collapsed` of categories.
    pub sidebar_collapsed: bool,
}

impl Default for SidebarOptions {
    fn default() -> Self {
        Self {
            sidebar_collapsible: true,
            sidebar_collapsed: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_items_serialize_tagged() {
        let item = SidebarItem::Category(SidebarCategory {
            label: "Guides".to_owned(),
            items: vec![SidebarItem::doc("guides/setup")],
            collapsed: true,
            collapsible: true,
            link: Some(CategoryLink::Doc {
                id: "guides/index".to_owned(),
            }),
            class_name: None,
            custom_props: None,
        });

        assert_eq!(
            serde_json::to_value(&item).unwrap(),
            json!({
                "type": "category",
                "label": "Guides",
                "items": [{"type": "doc", "id": "guides/setup"}],
                "collapsed": true,
                "collapsible": true,
                "link": {"type": "doc", "id": "guides/index"}
            })
        );
    }

    #[test]
    fn test_autogenerated_serializes_dir_name() {
        assert_eq!(
            serde_json::to_value(NormalizedSidebarItem::autogenerated("guides")).unwrap(),
            json!({"type": "autogenerated", "dirName": "guides"})
        );
    }

    #[test]
    fn test_with_items_keeps_fields() {
        let category: SidebarCategory<NormalizedSidebarItem> = SidebarCategory {
            label: "L".to_owned(),
            items: vec![],
            collapsed: false,
            collapsible: true,
            link: None,
            class_name: Some("c".to_owned()),
            custom_props: None,
        };
        let converted = category.with_items(vec![SidebarItem::doc("a")]);
        assert_eq!(converted.label, "L");
        assert_eq!(converted.class_name.as_deref(), Some("c"));
        assert_eq!(converted.items, vec![SidebarItem::doc("a")]);
    }
}
