//! Category metadata types for storage backends.
//!
//! Provides the [`CategoryMetadata`] struct describing a `_category_` sidecar
//! file. This module contains only data types - locating and parsing sidecar
//! files is implemented by individual storage backends.
//!
//! # Metadata Fields
//!
//! - `label`: Category label (overrides the index document title)
//! - `position`: Ordering hint among siblings
//! - `collapsed` / `collapsible`: Initial sidebar state
//! - `link`: Explicit category link, or `null` to disable any link
//! - `className` / `customProps`: Passed through to the renderer

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};

/// Category metadata keyed by directory path relative to the content root
/// (e.g., `"guides"`, `"guides/advanced"`).
pub type CategoryMetadataMap = HashMap<String, CategoryMetadata>;

/// Category metadata loaded from sidecar files.
///
/// All fields are optional. When a field is `None`, the generator falls back
/// to values derived from the directory or its index document.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryMetadata {
    /// Category label shown in the sidebar.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Position among sibling items.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<f64>,

    /// Whether the category starts collapsed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collapsed: Option<bool>,

    /// Whether the category can be collapsed at all.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collapsible: Option<bool>,

    /// CSS class name for the category item.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,

    /// Explicit link override.
    ///
    /// - `None`: no override, conventions apply
    /// - `Some(None)`: `link: null`, the category has no link at all
    /// - `Some(Some(link))`: use this link
    #[serde(
        default,
        deserialize_with = "deserialize_explicit_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub link: Option<Option<CategoryLink>>,

    /// Arbitrary props forwarded to the renderer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_props: Option<serde_json::Map<String, serde_json::Value>>,
}

impl CategoryMetadata {
    /// Check if metadata has any non-default values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.label.is_none()
            && self.position.is_none()
            && self.collapsed.is_none()
            && self.collapsible.is_none()
            && self.class_name.is_none()
            && self.link.is_none()
            && self.custom_props.is_none()
    }
}

/// Link target of a category.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum CategoryLink {
    /// Link to an existing document, by local or fully qualified id.
    Doc {
        /// Document id.
        id: String,
    },
    /// Link to a page listing the category's items.
    #[serde(rename_all = "camelCase")]
    GeneratedIndex {
        /// Slug of the generated page.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        slug: Option<String>,
        /// Title of the generated page.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        /// Description of the generated page.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
}

/// Keep an explicit `null` distinguishable from an absent key.
fn deserialize_explicit_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
