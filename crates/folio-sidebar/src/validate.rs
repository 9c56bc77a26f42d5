//! Sidebar document id validation.

use std::collections::BTreeSet;
use std::path::Path;

use folio_content::DocMetadataBase;
use folio_storage::CategoryLink;

use crate::error::SidebarError;
use crate::types::{SidebarItem, Sidebars};

/// Document ids a sidebar refers to: `doc` and `ref` items and category
/// links, in tree order.
pub fn collect_sidebar_doc_ids(sidebar: &[SidebarItem]) -> Vec<&str> {
    let mut ids = Vec::new();
    collect_into(sidebar, &mut ids);
    ids
}

fn collect_into<'a>(items: &'a [SidebarItem], ids: &mut Vec<&'a str>) {
    for item in items {
        match item {
            SidebarItem::Doc(doc) | SidebarItem::Ref(doc) => ids.push(&doc.id),
            SidebarItem::Category(category) => {
                if let Some(CategoryLink::Doc { id }) = &category.link {
                    ids.push(id);
                }
                collect_into(&category.items, ids);
            }
            SidebarItem::Link(_) => {}
        }
    }
}

/// Check that every id referenced by `sidebars` belongs to `docs`.
pub fn validate_sidebars(
    sidebars: &Sidebars,
    docs: &[DocMetadataBase],
    sidebar_path: &Path,
) -> Result<(), SidebarError> {
    let known: BTreeSet<&str> = docs.iter().map(|doc| doc.unversioned_id.as_str()).collect();

    let unknown: BTreeSet<&str> = sidebars
        .values()
        .flat_map(|sidebar| collect_sidebar_doc_ids(sidebar))
        .filter(|id| !known.contains(id))
        .collect();

    if unknown.is_empty() {
        return Ok(());
    }

    Err(SidebarError::UnknownSidebarDocs {
        sidebar_path: sidebar_path.to_path_buf(),
        unknown: unknown.into_iter().map(str::to_owned).collect(),
        available: known.into_iter().map(str::to_owned).collect(),
    })
}

#[cfg(test)]
mod tests {
    use folio_content::DocFrontMatter;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::types::{SidebarCategory, SidebarItemDoc};

    fn doc(id: &str) -> DocMetadataBase {
        DocMetadataBase {
            unversioned_id: id.to_owned(),
            id: id.to_owned(),
            is_home_page: false,
            title: id.to_owned(),
            description: String::new(),
            source: format!("@site/docs/{id}.md"),
            source_dir_name: ".".to_owned(),
            slug: format!("/{id}"),
            permalink: format!("/docs/{id}"),
            edit_url: None,
            version: "current".to_owned(),
            last_updated_by: None,
            last_updated_at: None,
            formatted_last_updated_at: None,
            sidebar_position: None,
            date: None,
            front_matter: DocFrontMatter::default(),
        }
    }

    fn sidebar() -> Vec<SidebarItem> {
        vec![
            SidebarItem::doc("intro"),
            SidebarItem::Category(SidebarCategory {
                label: "Guides".to_owned(),
                items: vec![
                    SidebarItem::Ref(SidebarItemDoc::new("setup")),
                    SidebarItem::Link(crate::types::SidebarItemLink {
                        href: "https://example.com".to_owned(),
                        label: "Example".to_owned(),
                        class_name: None,
                        custom_props: None,
                    }),
                ],
                collapsed: true,
                collapsible: true,
                link: Some(CategoryLink::Doc {
                    id: "guides".to_owned(),
                }),
                class_name: None,
                custom_props: None,
            }),
        ]
    }

    #[test]
    fn test_collect_sidebar_doc_ids() {
        assert_eq!(collect_sidebar_doc_ids(&sidebar()), vec!["intro", "guides", "setup"]);
    }

    #[test]
    fn test_validate_known_ids() {
        let sidebars = Sidebars::from([("main".to_owned(), sidebar())]);
        let docs = vec![doc("intro"), doc("guides"), doc("setup")];
        assert!(validate_sidebars(&sidebars, &docs, Path::new("sidebars.yaml")).is_ok());
    }

    #[test]
    fn test_validate_reports_unknown_ids_sorted() {
        let sidebars = Sidebars::from([
            ("main".to_owned(), sidebar()),
            ("other".to_owned(), vec![SidebarItem::doc("zeta"), SidebarItem::doc("intro")]),
        ]);
        let docs = vec![doc("intro")];

        let err = validate_sidebars(&sidebars, &docs, Path::new("sidebars.yaml")).unwrap_err();
        let SidebarError::UnknownSidebarDocs {
            unknown, available, ..
        } = err
        else {
            panic!("expected UnknownSidebarDocs");
        };
        assert_eq!(unknown, vec!["guides", "setup", "zeta"]);
        assert_eq!(available, vec!["intro"]);
    }
}
