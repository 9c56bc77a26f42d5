//! Sidebar processing: autogenerated expansion and fix-up.
//!
//! Placeholders are replaced by the output of the configured
//! [`SidebarItemsGenerator`]. Sibling items are expanded concurrently;
//! independent subtrees share nothing but read-only inputs. A post-order
//! pass then normalizes category flags.

use folio_content::{DocMetadataBase, IsCategoryIndex, NumberPrefixParser, VersionMetadata};
use folio_storage::{CategoryLink, CategoryMetadataMap};
use rayon::prelude::*;

use crate::error::SidebarError;
use crate::generator::{
    SidebarItemsGenerator, SidebarItemsGeneratorArgs, default_sidebar_items_generator,
};
use crate::types::{
    NormalizedSidebarItem, NormalizedSidebars, Sidebar, SidebarItem, SidebarOptions, Sidebars,
};

/// Inputs shared by every sidebar of a version.
pub struct SidebarProcessor<'a> {
    /// Autogenerated item hook.
    pub generator: &'a dyn SidebarItemsGenerator,
    /// All documents of the version.
    pub docs: &'a [DocMetadataBase],
    /// Version being built.
    pub version: &'a VersionMetadata,
    /// Number prefix strategy.
    pub number_prefix_parser: &'a dyn NumberPrefixParser,
    /// Category index matcher.
    pub is_category_index: IsCategoryIndex,
    /// Category metadata keyed by directory.
    pub categories_metadata: &'a CategoryMetadataMap,
    /// Sidebar-wide defaults.
    pub options: SidebarOptions,
}

impl SidebarProcessor<'_> {
    /// Process every sidebar.
    pub fn process_sidebars(
        &self,
        sidebars: &NormalizedSidebars,
    ) -> Result<Sidebars, SidebarError> {
        sidebars
            .par_iter()
            .map(|(name, sidebar)| -> Result<_, SidebarError> {
                Ok((name.clone(), self.process_sidebar(name, sidebar)?))
            })
            .collect()
    }

    /// Expand the placeholders of one sidebar, then fix its categories up.
    pub fn process_sidebar(
        &self,
        name: &str,
        sidebar: &[NormalizedSidebarItem],
    ) -> Result<Sidebar, SidebarError> {
        let expanded = self.expand_items(name, sidebar)?;
        Ok(transform_sidebar_items(expanded, &fix_sidebar_item))
    }

    fn expand_items(
        &self,
        sidebar: &str,
        items: &[NormalizedSidebarItem],
    ) -> Result<Vec<SidebarItem>, SidebarError> {
        let expanded: Vec<Vec<SidebarItem>> = items
            .par_iter()
            .map(|item| self.expand_item(sidebar, item))
            .collect::<Result<_, _>>()?;
        Ok(expanded.into_iter().flatten().collect())
    }

    fn expand_item(
        &self,
        sidebar: &str,
        item: &NormalizedSidebarItem,
    ) -> Result<Vec<SidebarItem>, SidebarError> {
        match item {
            NormalizedSidebarItem::Doc(doc) => Ok(vec![SidebarItem::Doc(doc.clone())]),
            NormalizedSidebarItem::Ref(doc) => Ok(vec![SidebarItem::Ref(doc.clone())]),
            NormalizedSidebarItem::Link(link) => Ok(vec![SidebarItem::Link(link.clone())]),
            NormalizedSidebarItem::Category(category) => {
                let items = self.expand_items(sidebar, &category.items)?;
                Ok(vec![SidebarItem::Category(category.with_items(items))])
            }
            NormalizedSidebarItem::Autogenerated(placeholder) => {
                let args = SidebarItemsGeneratorArgs {
                    dir_name: &placeholder.dir_name,
                    docs: self.docs,
                    version: self.version,
                    number_prefix_parser: self.number_prefix_parser,
                    is_category_index: self.is_category_index,
                    categories_metadata: self.categories_metadata,
                    options: &self.options,
                };
                let generated = self
                    .generator
                    .generate(&args, default_sidebar_items_generator)?;
                into_sidebar_items(sidebar, &placeholder.dir_name, generated)
            }
        }
    }
}

/// Generator output is final: it is never expanded a second time.
fn into_sidebar_items(
    sidebar: &str,
    dir_name: &str,
    items: Vec<NormalizedSidebarItem>,
) -> Result<Vec<SidebarItem>, SidebarError> {
    items
        .into_iter()
        .map(|item| match item {
            NormalizedSidebarItem::Doc(doc) => Ok(SidebarItem::Doc(doc)),
            NormalizedSidebarItem::Ref(doc) => Ok(SidebarItem::Ref(doc)),
            NormalizedSidebarItem::Link(link) => Ok(SidebarItem::Link(link)),
            NormalizedSidebarItem::Category(mut category) => {
                let children = std::mem::take(&mut category.items);
                let items = into_sidebar_items(sidebar, dir_name, children)?;
                Ok(SidebarItem::Category(category.with_items(items)))
            }
            NormalizedSidebarItem::Autogenerated(nested) => Err(SidebarError::InvalidItem {
                sidebar: sidebar.to_owned(),
                message: format!(
                    "items generated for \"{dir_name}\" contain an autogenerated item for \"{}\"",
                    nested.dir_name
                ),
            }),
        })
        .collect()
}

/// Apply `f` to every item, children before their category.
pub fn transform_sidebar_items(
    items: Vec<SidebarItem>,
    f: &impl Fn(SidebarItem) -> SidebarItem,
) -> Vec<SidebarItem> {
    items
        .into_iter()
        .map(|item| match item {
            SidebarItem::Category(mut category) => {
                category.items = transform_sidebar_items(std::mem::take(&mut category.items), f);
                f(SidebarItem::Category(category))
            }
            other => f(other),
        })
        .collect()
}

/// A non-collapsible category is never collapsed; generated index pages
/// without a slug get one derived from the label.
fn fix_sidebar_item(item: SidebarItem) -> SidebarItem {
    match item {
        SidebarItem::Category(mut category) => {
            if !category.collapsible && category.collapsed {
                category.collapsed = false;
            }
            if let Some(CategoryLink::GeneratedIndex { slug, .. }) = &mut category.link
                && slug.is_none()
            {
                *slug = Some(format!("/category/{}", kebab_case(&category.label)));
            }
            SidebarItem::Category(category)
        }
        other => other,
    }
}

/// Lowercase words joined by `-`.
fn kebab_case(label: &str) -> String {
    label
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}
