//! Sidebar file loading and shorthand normalization.
//!
//! A sidebar file (JSON or YAML) maps sidebar names to items. Accepted forms:
//!
//! ```yaml
//! tutorial:
//!   - intro                     # doc shorthand
//!   - Guides: [guides/setup]    # category shorthand
//!   - type: autogenerated
//!     dirName: reference
//!   - type: link
//!     href: https://example.com
//!     label: Example
//! api:                          # whole sidebar as category shorthand
//!   Reference: [api/index]
//! ```

use std::path::Path;

use folio_content::SidebarFile;
use folio_storage::CategoryLink;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::SidebarError;
use crate::types::{
    NormalizedSidebar, NormalizedSidebarItem, NormalizedSidebars, SidebarCategory,
    SidebarItemAutogenerated, SidebarItemDoc, SidebarItemLink, SidebarOptions,
};

/// Name of the sidebar generated when no sidebar file is configured.
pub const DEFAULT_SIDEBAR_NAME: &str = "defaultSidebar";

/// Full category item as written in a sidebar file.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RawCategory {
    label: String,
    #[serde(default)]
    items: Value,
    collapsed: Option<bool>,
    collapsible: Option<bool>,
    link: Option<CategoryLink>,
    class_name: Option<String>,
    custom_props: Option<Map<String, Value>>,
}

/// One sidebar autogenerated from the whole version.
pub fn default_sidebars() -> NormalizedSidebars {
    NormalizedSidebars::from([(
        DEFAULT_SIDEBAR_NAME.to_owned(),
        vec![NormalizedSidebarItem::autogenerated(".")],
    )])
}

/// Load and normalize the sidebars of a version.
///
/// A configured file that does not exist yields no sidebars.
pub fn load_sidebars(
    file: &SidebarFile,
    options: &SidebarOptions,
) -> Result<NormalizedSidebars, SidebarError> {
    match file {
        SidebarFile::Default => Ok(default_sidebars()),
        SidebarFile::Disabled => Ok(NormalizedSidebars::new()),
        SidebarFile::Path(path) => match load_sidebars_file(path)? {
            Some(value) => normalize_sidebars(&value, options),
            None => {
                tracing::warn!(path = %path.display(), "Sidebar file not found, no sidebars");
                Ok(NormalizedSidebars::new())
            }
        },
    }
}

/// Read a sidebar file as JSON, or `None` when it does not exist.
pub fn load_sidebars_file(path: &Path) -> Result<Option<Value>, SidebarError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(load_error(path, e)),
    };

    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext == "yml" || ext == "yaml");

    let value = if is_yaml {
        let yaml: serde_yaml::Value =
            serde_yaml::from_str(&content).map_err(|e| load_error(path, e))?;
        serde_json::to_value(yaml).map_err(|e| load_error(path, e))?
    } else {
        serde_json::from_str(&content).map_err(|e| load_error(path, e))?
    };

    Ok(Some(value))
}

fn load_error(path: &Path, e: impl std::fmt::Display) -> SidebarError {
    SidebarError::Load {
        path: path.to_path_buf(),
        message: e.to_string(),
    }
}

/// Expand every shorthand of a sidebars object.
pub fn normalize_sidebars(
    value: &Value,
    options: &SidebarOptions,
) -> Result<NormalizedSidebars, SidebarError> {
    let Value::Object(sidebars) = value else {
        return Err(SidebarError::InvalidItem {
            sidebar: String::new(),
            message: format!("sidebars must be an object, found {value}"),
        });
    };

    sidebars
        .iter()
        .map(|(name, sidebar)| -> Result<_, SidebarError> {
            let normalizer = Normalizer {
                sidebar: name,
                options,
            };
            Ok((name.clone(), normalizer.items(sidebar)?))
        })
        .collect()
}

struct Normalizer<'a> {
    sidebar: &'a str,
    options: &'a SidebarOptions,
}

impl Normalizer<'_> {
    /// An item list: an array, or an object of category shorthands.
    fn items(&self, value: &Value) -> Result<NormalizedSidebar, SidebarError> {
        match value {
            Value::Array(items) => {
                let mut normalized = Vec::with_capacity(items.len());
                for item in items {
                    normalized.extend(self.item(item)?);
                }
                Ok(normalized)
            }
            Value::Object(map) => self.category_shorthands(map),
            Value::Null => Ok(Vec::new()),
            other => Err(self.invalid(format!("expected a list of items, found {other}"))),
        }
    }

    /// One item; a category shorthand object may expand to several categories.
    fn item(&self, value: &Value) -> Result<Vec<NormalizedSidebarItem>, SidebarError> {
        match value {
            Value::String(id) => Ok(vec![NormalizedSidebarItem::doc(id.clone())]),
            Value::Object(map) if map.contains_key("type") => Ok(vec![self.typed_item(map)?]),
            Value::Object(map) => self.category_shorthands(map),
            other => Err(self.invalid(format!("unexpected item {other}"))),
        }
    }

    fn category_shorthands(
        &self,
        map: &Map<String, Value>,
    ) -> Result<Vec<NormalizedSidebarItem>, SidebarError> {
        map.iter()
            .map(|(label, items)| -> Result<_, SidebarError> {
                Ok(NormalizedSidebarItem::Category(SidebarCategory {
                    label: label.clone(),
                    items: self.items(items)?,
                    collapsed: self.options.sidebar_collapsed,
                    collapsible: self.options.sidebar_collapsible,
                    link: None,
                    class_name: None,
                    custom_props: None,
                }))
            })
            .collect()
    }

    fn typed_item(&self, map: &Map<String, Value>) -> Result<NormalizedSidebarItem, SidebarError> {
        let mut fields = map.clone();
        let item_type = match fields.remove("type") {
            Some(Value::String(t)) => t,
            other => {
                return Err(self.invalid(format!(
                    "item type must be a string, found {}",
                    other.unwrap_or(Value::Null)
                )));
            }
        };
        let fields = Value::Object(fields);

        match item_type.as_str() {
            "doc" => Ok(NormalizedSidebarItem::Doc(self.parse::<SidebarItemDoc>(fields)?)),
            "ref" => Ok(NormalizedSidebarItem::Ref(self.parse::<SidebarItemDoc>(fields)?)),
            "link" => Ok(NormalizedSidebarItem::Link(self.parse::<SidebarItemLink>(fields)?)),
            "autogenerated" => Ok(NormalizedSidebarItem::Autogenerated(
                self.parse::<SidebarItemAutogenerated>(fields)?,
            )),
            "category" => {
                let raw = self.parse::<RawCategory>(fields)?;
                Ok(NormalizedSidebarItem::Category(SidebarCategory {
                    label: raw.label,
                    items: self.items(&raw.items)?,
                    collapsed: raw.collapsed.unwrap_or(self.options.sidebar_collapsed),
                    collapsible: raw.collapsible.unwrap_or(self.options.sidebar_collapsible),
                    link: raw.link,
                    class_name: raw.class_name,
                    custom_props: raw.custom_props,
                }))
            }
            other => Err(self.invalid(format!(
                "unknown item type \"{other}\" (expected doc, ref, link, category or autogenerated)"
            ))),
        }
    }

    fn parse<T: serde::de::DeserializeOwned>(&self, value: Value) -> Result<T, SidebarError> {
        serde_json::from_value(value).map_err(|e| self.invalid(e.to_string()))
    }

    fn invalid(&self, message: String) -> SidebarError {
        SidebarError::InvalidItem {
            sidebar: self.sidebar.to_owned(),
            message,
        }
    }
}
