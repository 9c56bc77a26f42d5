//! Sidebar generation from the directory layout of a version.
//!
//! # Architecture
//!
//! Documents of the target directory are grouped into a flat arena of
//! directory nodes, children tracked by index and kept in encounter order.
//! Each node becomes a category; its items are the node's documents and
//! subdirectories, sorted by position.
//!
//! Category fields come from, in order of precedence:
//! - the `_category_` metadata of the directory
//! - the category index document (`index.md`, `readme.md`, or whatever the
//!   injected [`IsCategoryIndex`] matches)
//! - the directory name, number prefix stripped

use std::cmp::Ordering;
use std::collections::HashMap;

use folio_content::{
    DocMetadataBase, IsCategoryIndex, NumberPrefixParser, VersionMetadata, ancestor_directories,
};
use folio_storage::{CategoryLink, CategoryMetadata, CategoryMetadataMap};

use crate::error::SidebarError;
use crate::types::{NormalizedSidebarItem, SidebarCategory, SidebarItemDoc, SidebarOptions};

/// Everything a generator gets to build the items of one directory.
#[derive(Clone, Copy)]
pub struct SidebarItemsGeneratorArgs<'a> {
    /// Directory relative to the content root (`.` for the whole version).
    pub dir_name: &'a str,
    /// All documents of the version.
    pub docs: &'a [DocMetadataBase],
    /// Version being built.
    pub version: &'a VersionMetadata,
    /// Number prefix strategy.
    pub number_prefix_parser: &'a dyn NumberPrefixParser,
    /// Category index matcher.
    pub is_category_index: IsCategoryIndex,
    /// Category metadata keyed by directory path relative to the content root.
    pub categories_metadata: &'a CategoryMetadataMap,
    /// Sidebar-wide defaults.
    pub options: &'a SidebarOptions,
}

/// The built-in generation algorithm, as a first-class value.
pub type DefaultGenerator =
    fn(&SidebarItemsGeneratorArgs<'_>) -> Result<Vec<NormalizedSidebarItem>, SidebarError>;

/// Hook replacing autogenerated placeholders with items.
///
/// Implementations receive the default algorithm and may call it, wrap its
/// output, or ignore it. Returned items are final and must not contain
/// placeholders.
pub trait SidebarItemsGenerator: Send + Sync {
    /// Build the items of `args.dir_name`.
    fn generate(
        &self,
        args: &SidebarItemsGeneratorArgs<'_>,
        default: DefaultGenerator,
    ) -> Result<Vec<NormalizedSidebarItem>, SidebarError>;
}

/// Generator that defers to the default algorithm.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultSidebarItemsGenerator;

impl SidebarItemsGenerator for DefaultSidebarItemsGenerator {
    fn generate(
        &self,
        args: &SidebarItemsGeneratorArgs<'_>,
        default: DefaultGenerator,
    ) -> Result<Vec<NormalizedSidebarItem>, SidebarError> {
        default(args)
    }
}

/// Build sidebar items from the documents under `args.dir_name`.
///
/// A directory without documents yields no items and a warning.
pub fn default_sidebar_items_generator(
    args: &SidebarItemsGeneratorArgs<'_>,
) -> Result<Vec<NormalizedSidebarItem>, SidebarError> {
    let dir_name = normalize_dir_name(args.dir_name);
    let tree = DirTree::build(args.docs, dir_name);

    if tree.is_empty() {
        tracing::warn!(dir = %args.dir_name, "No docs found in {}: can't auto-generate a sidebar.", args.dir_name);
        return Ok(Vec::new());
    }

    let builder = CategoryBuilder { args, tree: &tree };
    builder.items(DirTree::ROOT, None)
}

/// `.`, `./` and `` all mean the content root.
fn normalize_dir_name(dir_name: &str) -> &str {
    let trimmed = dir_name.trim_start_matches("./").trim_end_matches('/');
    if trimmed.is_empty() { "." } else { trimmed }
}

enum Entry<'a> {
    Doc(&'a DocMetadataBase),
    Dir(usize),
}

struct DirNode<'a> {
    /// Directory name as on disk.
    name: &'a str,
    /// Path relative to the content root, `` for the root.
    path: String,
    entries: Vec<Entry<'a>>,
}

/// Directory tree of the documents under one directory.
struct DirTree<'a> {
    nodes: Vec<DirNode<'a>>,
    doc_count: usize,
}

impl<'a> DirTree<'a> {
    const ROOT: usize = 0;

    fn build(docs: &'a [DocMetadataBase], dir_name: &'a str) -> Self {
        let root_path = if dir_name == "." { String::new() } else { dir_name.to_owned() };
        let mut nodes = vec![DirNode {
            name: dir_name,
            path: root_path,
            entries: Vec::new(),
        }];
        let mut index: HashMap<(usize, &'a str), usize> = HashMap::new();
        let mut doc_count = 0;

        for doc in docs {
            let Some(relative) = relative_dir(&doc.source_dir_name, dir_name) else {
                continue;
            };

            let mut node = Self::ROOT;
            for segment in relative.split('/').filter(|s| !s.is_empty()) {
                node = match index.get(&(node, segment)) {
                    Some(&child) => child,
                    None => {
                        let child = nodes.len();
                        let path = if nodes[node].path.is_empty() {
                            segment.to_owned()
                        } else {
                            format!("{}/{segment}", nodes[node].path)
                        };
                        nodes.push(DirNode {
                            name: segment,
                            path,
                            entries: Vec::new(),
                        });
                        nodes[node].entries.push(Entry::Dir(child));
                        index.insert((node, segment), child);
                        child
                    }
                };
            }

            nodes[node].entries.push(Entry::Doc(doc));
            doc_count += 1;
        }

        Self { nodes, doc_count }
    }

    fn is_empty(&self) -> bool {
        self.doc_count == 0
    }
}

/// Directory of a document relative to `dir_name`, or `None` when outside it.
fn relative_dir<'d>(source_dir_name: &'d str, dir_name: &str) -> Option<&'d str> {
    if dir_name == "." {
        return Some(if source_dir_name == "." { "" } else { source_dir_name });
    }
    if source_dir_name == dir_name {
        return Some("");
    }
    source_dir_name
        .strip_prefix(dir_name)
        .and_then(|rest| rest.strip_prefix('/'))
}

/// File name of a source path without its extension.
fn file_stem(source: &str) -> &str {
    let file_name = source.rsplit('/').next().unwrap_or(source);
    file_name
        .rsplit_once('.')
        .map_or(file_name, |(stem, _)| stem)
}

/// Last segment of a document id.
fn local_id(id: &str) -> &str {
    id.rsplit('/').next().unwrap_or(id)
}

struct CategoryBuilder<'a, 'b> {
    args: &'b SidebarItemsGeneratorArgs<'a>,
    tree: &'b DirTree<'a>,
}

impl CategoryBuilder<'_, '_> {
    /// Sorted items of a node, leaving out the document its category links to.
    fn items(
        &self,
        node: usize,
        linked_doc: Option<&str>,
    ) -> Result<Vec<NormalizedSidebarItem>, SidebarError> {
        let mut positioned = Vec::new();
        for entry in &self.tree.nodes[node].entries {
            match entry {
                Entry::Doc(doc) if Some(doc.unversioned_id.as_str()) == linked_doc => {}
                Entry::Doc(doc) => positioned.push((doc_item(doc), doc.sidebar_position)),
                Entry::Dir(child) => positioned.push(self.category(*child)?),
            }
        }

        positioned.sort_by(|(_, a), (_, b)| compare_positions(*a, *b));
        Ok(positioned.into_iter().map(|(item, _)| item).collect())
    }

    fn category(&self, node: usize) -> Result<(NormalizedSidebarItem, Option<f64>), SidebarError> {
        let dir = &self.tree.nodes[node];
        let metadata = self.args.categories_metadata.get(&dir.path);
        let index_doc = self.index_doc(node);

        let link = match metadata.and_then(|m| m.link.as_ref()) {
            Some(None) => None,
            Some(Some(CategoryLink::Doc { id })) => Some(CategoryLink::Doc {
                id: self.resolve_doc_id(node, id)?,
            }),
            Some(Some(link @ CategoryLink::GeneratedIndex { .. })) => Some(link.clone()),
            None => index_doc.map(|doc| CategoryLink::Doc {
                id: doc.unversioned_id.clone(),
            }),
        };

        let linked_doc = match &link {
            Some(CategoryLink::Doc { id }) => Some(id.as_str()),
            _ => None,
        };
        let linked = linked_doc.and_then(|id| self.find_doc(id));

        let parsed_name = self.args.number_prefix_parser.parse(dir.name);
        let label = category_label(metadata, linked, &parsed_name.filename);
        let position = metadata
            .and_then(|m| m.position)
            .or(parsed_name.number_prefix.map(f64::from));
        let items = self.items(node, linked_doc)?;

        let category = SidebarCategory {
            label,
            items,
            collapsed: metadata
                .and_then(|m| m.collapsed)
                .unwrap_or(self.args.options.sidebar_collapsed),
            collapsible: metadata
                .and_then(|m| m.collapsible)
                .unwrap_or(self.args.options.sidebar_collapsible),
            link,
            class_name: metadata.and_then(|m| m.class_name.clone()),
            custom_props: metadata.and_then(|m| m.custom_props.clone()),
        };

        Ok((NormalizedSidebarItem::Category(category), position))
    }

    /// First direct child document the category index matcher accepts.
    fn index_doc(&self, node: usize) -> Option<&DocMetadataBase> {
        self.tree.nodes[node]
            .entries
            .iter()
            .find_map(|entry| match entry {
                Entry::Doc(doc)
                    if (self.args.is_category_index)(
                        file_stem(&doc.source),
                        &ancestor_directories(&doc.source_dir_name),
                    ) =>
                {
                    Some(*doc)
                }
                _ => None,
            })
    }

    /// Resolve a category link id: local id among the directory's documents
    /// first, then a fully qualified id anywhere in the version.
    fn resolve_doc_id(&self, node: usize, id: &str) -> Result<String, SidebarError> {
        let local = self.tree.nodes[node].entries.iter().find_map(|entry| match entry {
            Entry::Doc(doc) if local_id(&doc.unversioned_id) == id => Some(*doc),
            _ => None,
        });

        if let Some(doc) = local.or_else(|| self.find_doc(id)) {
            return Ok(doc.unversioned_id.clone());
        }

        let mut available: Vec<String> = self
            .args
            .docs
            .iter()
            .map(|doc| doc.unversioned_id.clone())
            .collect();
        available.sort();
        Err(SidebarError::UnknownDocId {
            id: id.to_owned(),
            available,
        })
    }

    fn find_doc(&self, id: &str) -> Option<&DocMetadataBase> {
        self.args.docs.iter().find(|doc| doc.unversioned_id == id)
    }
}

fn doc_item(doc: &DocMetadataBase) -> NormalizedSidebarItem {
    NormalizedSidebarItem::Doc(SidebarItemDoc {
        id: doc.unversioned_id.clone(),
        label: doc.front_matter.sidebar_label.clone(),
        class_name: doc.front_matter.sidebar_class_name.clone(),
        custom_props: doc.front_matter.sidebar_custom_props.clone(),
    })
}

fn category_label(
    metadata: Option<&CategoryMetadata>,
    linked: Option<&DocMetadataBase>,
    dir_name: &str,
) -> String {
    if let Some(label) = metadata.and_then(|m| m.label.as_ref()) {
        return label.clone();
    }
    if let Some(doc) = linked {
        if let Some(label) = &doc.front_matter.sidebar_label {
            return label.clone();
        }
        // A title equal to the base id was derived from the file name.
        if doc.title != local_id(&doc.unversioned_id) {
            return doc.title.clone();
        }
    }
    capitalize(dir_name)
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Positioned items first, ascending; unpositioned items keep their order.
fn compare_positions(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use folio_content::{DefaultNumberPrefixParser, DocFrontMatter, default_is_category_index};
    use pretty_assertions::assert_eq;

    use super::*;

    fn doc(source: &str, position: Option<f64>) -> DocMetadataBase {
        let (dir, file) = source.rsplit_once('/').unwrap_or((".", source));
        let stem = file.trim_end_matches(".md");
        let base = DefaultNumberPrefixParser.parse(stem).filename;
        let unversioned_id = if dir == "." {
            base.clone()
        } else {
            format!(
                "{}/{base}",
                folio_content::strip_path_number_prefixes(dir, &DefaultNumberPrefixParser)
            )
        };
        DocMetadataBase {
            unversioned_id: unversioned_id.clone(),
            id: unversioned_id.clone(),
            is_home_page: false,
            title: base.clone(),
            description: String::new(),
            source: format!("@site/docs/{source}"),
            source_dir_name: dir.to_owned(),
            slug: format!("/{unversioned_id}"),
            permalink: format!("/docs/{unversioned_id}"),
            edit_url: None,
            version: "current".to_owned(),
            last_updated_by: None,
            last_updated_at: None,
            formatted_last_updated_at: None,
            sidebar_position: position,
            date: None,
            front_matter: DocFrontMatter::default(),
        }
    }

    fn generate(
        dir_name: &str,
        docs: &[DocMetadataBase],
        metadata: &CategoryMetadataMap,
    ) -> Result<Vec<NormalizedSidebarItem>, SidebarError> {
        let version = VersionMetadata::new("current", "/site/docs");
        let options = SidebarOptions::default();
        default_sidebar_items_generator(&SidebarItemsGeneratorArgs {
            dir_name,
            docs,
            version: &version,
            number_prefix_parser: &DefaultNumberPrefixParser,
            is_category_index: default_is_category_index,
            categories_metadata: metadata,
            options: &options,
        })
    }

    fn category(
        label: &str,
        link: Option<CategoryLink>,
        items: Vec<NormalizedSidebarItem>,
    ) -> NormalizedSidebarItem {
        NormalizedSidebarItem::Category(SidebarCategory {
            label: label.to_owned(),
            items,
            collapsed: true,
            collapsible: true,
            link,
            class_name: None,
            custom_props: None,
        })
    }

    fn doc_link(id: &str) -> Option<CategoryLink> {
        Some(CategoryLink::Doc { id: id.to_owned() })
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_empty_dir_yields_no_items() {
        let docs = vec![doc("intro.md", None)];
        let items = generate("missing", &docs, &CategoryMetadataMap::new()).unwrap();
        assert!(items.is_empty());

        let items = generate(".", &[], &CategoryMetadataMap::new()).unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn test_empty_dir_warns_with_dir_name() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        let docs = vec![doc("intro.md", None)];
        let items = tracing::subscriber::with_default(subscriber, || {
            generate("missing", &docs, &CategoryMetadataMap::new()).unwrap()
        });

        assert!(items.is_empty());
        let output = logs.contents();
        assert!(output.contains("WARN"));
        assert!(output.contains("No docs found in missing"));
    }

    #[test]
    fn test_flat_docs_keep_encounter_order() {
        let docs = vec![doc("b.md", None), doc("a.md", None), doc("c.md", None)];
        let items = generate(".", &docs, &CategoryMetadataMap::new()).unwrap();
        assert_eq!(
            items,
            vec![
                NormalizedSidebarItem::doc("b"),
                NormalizedSidebarItem::doc("a"),
                NormalizedSidebarItem::doc("c")
            ]
        );
    }

    #[test]
    fn test_positioned_docs_sort_before_unpositioned() {
        let docs = vec![
            doc("z.md", None),
            doc("y.md", Some(2.0)),
            doc("x.md", None),
            doc("w.md", Some(1.0)),
            doc("v.md", Some(2.0)),
        ];
        let items = generate(".", &docs, &CategoryMetadataMap::new()).unwrap();
        assert_eq!(
            items,
            vec![
                NormalizedSidebarItem::doc("w"),
                NormalizedSidebarItem::doc("y"),
                NormalizedSidebarItem::doc("v"),
                NormalizedSidebarItem::doc("z"),
                NormalizedSidebarItem::doc("x")
            ]
        );
    }

    #[test]
    fn test_nested_categories_with_number_prefixes() {
        let docs = vec![
            doc("intro.md", Some(0.0)),
            doc("02-guides/setup.md", None),
            doc("01-tutorials/02-second.md", Some(2.0)),
            doc("01-tutorials/01-first.md", Some(1.0)),
            doc("01-tutorials/deep/leaf.md", None),
        ];
        let items = generate(".", &docs, &CategoryMetadataMap::new()).unwrap();
        assert_eq!(
            items,
            vec![
                NormalizedSidebarItem::doc("intro"),
                category(
                    "Tutorials",
                    None,
                    vec![
                        NormalizedSidebarItem::doc("tutorials/first"),
                        NormalizedSidebarItem::doc("tutorials/second"),
                        category("Deep", None, vec![NormalizedSidebarItem::doc("tutorials/deep/leaf")]),
                    ]
                ),
                category("Guides", None, vec![NormalizedSidebarItem::doc("guides/setup")]),
            ]
        );
    }

    #[test]
    fn test_index_doc_links_category() {
        let mut index = doc("guides/index.md", None);
        index.title = "All the guides".to_owned();
        let docs = vec![doc("guides/setup.md", None), index];

        let items = generate(".", &docs, &CategoryMetadataMap::new()).unwrap();
        assert_eq!(
            items,
            vec![category(
                "All the guides",
                doc_link("guides/index"),
                vec![NormalizedSidebarItem::doc("guides/setup")]
            )]
        );
    }

    #[test]
    fn test_index_doc_sidebar_label_wins_over_title() {
        let mut readme = doc("guides/README.md", None);
        readme.unversioned_id = "guides/README".to_owned();
        readme.title = "Guides overview".to_owned();
        readme.front_matter.sidebar_label = Some("Guides!".to_owned());
        let docs = vec![readme];

        let items = generate(".", &docs, &CategoryMetadataMap::new()).unwrap();
        assert_eq!(items, vec![category("Guides!", doc_link("guides/README"), vec![])]);
    }

    #[test]
    fn test_derived_index_title_falls_back_to_dir_name() {
        let docs = vec![doc("03-api/index.md", None)];
        let items = generate(".", &docs, &CategoryMetadataMap::new()).unwrap();
        assert_eq!(items, vec![category("Api", doc_link("api/index"), vec![])]);
    }

    #[test]
    fn test_category_metadata_overrides() {
        let docs = vec![doc("guides/index.md", None), doc("guides/setup.md", None), doc("other/a.md", None)];
        let metadata = CategoryMetadataMap::from([
            (
                "guides".to_owned(),
                CategoryMetadata {
                    label: Some("Guides (metadata)".to_owned()),
                    position: Some(5.0),
                    collapsed: Some(false),
                    link: Some(None),
                    class_name: Some("guides".to_owned()),
                    ..Default::default()
                },
            ),
            (
                "other".to_owned(),
                CategoryMetadata {
                    position: Some(1.0),
                    link: Some(Some(CategoryLink::GeneratedIndex {
                        slug: None,
                        title: Some("Other".to_owned()),
                        description: None,
                    })),
                    ..Default::default()
                },
            ),
        ]);

        let items = generate(".", &docs, &metadata).unwrap();
        assert_eq!(
            items,
            vec![
                category(
                    "Other",
                    Some(CategoryLink::GeneratedIndex {
                        slug: None,
                        title: Some("Other".to_owned()),
                        description: None,
                    }),
                    vec![NormalizedSidebarItem::doc("other/a")]
                ),
                NormalizedSidebarItem::Category(SidebarCategory {
                    label: "Guides (metadata)".to_owned(),
                    items: vec![
                        NormalizedSidebarItem::doc("guides/index"),
                        NormalizedSidebarItem::doc("guides/setup")
                    ],
                    collapsed: false,
                    collapsible: true,
                    link: None,
                    class_name: Some("guides".to_owned()),
                    custom_props: None,
                }),
            ]
        );
    }

    #[test]
    fn test_explicit_link_resolves_local_id() {
        let docs = vec![
            doc("Category/index.md", None),
            doc("Category/doc2.md", None),
            doc("Category/doc3.md", None),
        ];
        let metadata = CategoryMetadataMap::from([(
            "Category".to_owned(),
            CategoryMetadata {
                label: Some("Category label".to_owned()),
                link: Some(Some(CategoryLink::Doc { id: "doc3".to_owned() })),
                ..Default::default()
            },
        )]);

        let items = generate(".", &docs, &metadata).unwrap();
        assert_eq!(
            items,
            vec![category(
                "Category label",
                doc_link("Category/doc3"),
                vec![
                    NormalizedSidebarItem::doc("Category/index"),
                    NormalizedSidebarItem::doc("Category/doc2")
                ]
            )]
        );
    }

    #[test]
    fn test_explicit_link_resolves_global_id() {
        let docs = vec![doc("category/intro.md", None), doc("elsewhere/target.md", None)];
        let metadata = CategoryMetadataMap::from([(
            "category".to_owned(),
            CategoryMetadata {
                link: Some(Some(CategoryLink::Doc {
                    id: "elsewhere/target".to_owned(),
                })),
                ..Default::default()
            },
        )]);

        let items = generate("category", &docs, &metadata).unwrap();
        assert_eq!(items, vec![NormalizedSidebarItem::doc("category/intro")]);

        let items = generate(".", &docs, &metadata).unwrap();
        assert_eq!(
            items[0],
            category(
                "Category",
                doc_link("elsewhere/target"),
                vec![NormalizedSidebarItem::doc("category/intro")]
            )
        );
    }

    #[test]
    fn test_unknown_link_lists_available_ids() {
        let docs = vec![doc("category/intro.md", None)];
        let metadata = CategoryMetadataMap::from([(
            "category".to_owned(),
            CategoryMetadata {
                link: Some(Some(CategoryLink::Doc { id: "foo".to_owned() })),
                ..Default::default()
            },
        )]);

        let err = generate(".", &docs, &metadata).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Can't find any doc with id=foo.\nAvailable doc ids:\n- category/intro"
        );
    }

    #[test]
    fn test_sub_directory_generation() {
        let docs = vec![
            doc("intro.md", None),
            doc("guides/setup.md", None),
            doc("guides/advanced/tuning.md", None),
            doc("guidesextra/x.md", None),
        ];
        let items = generate("guides", &docs, &CategoryMetadataMap::new()).unwrap();
        assert_eq!(
            items,
            vec![
                NormalizedSidebarItem::doc("guides/setup"),
                category("Advanced", None, vec![NormalizedSidebarItem::doc("guides/advanced/tuning")]),
            ]
        );
    }

    #[test]
    fn test_metadata_keyed_by_full_path_in_sub_directory() {
        let docs = vec![doc("guides/advanced/tuning.md", None)];
        let metadata = CategoryMetadataMap::from([(
            "guides/advanced".to_owned(),
            CategoryMetadata {
                label: Some("Tuning".to_owned()),
                ..Default::default()
            },
        )]);
        let items = generate("./guides/", &docs, &metadata).unwrap();
        assert_eq!(
            items,
            vec![category("Tuning", None, vec![NormalizedSidebarItem::doc("guides/advanced/tuning")])]
        );
    }

    #[test]
    fn test_doc_item_fields_from_front_matter() {
        let mut d = doc("intro.md", None);
        d.front_matter.sidebar_label = Some("Start here".to_owned());
        d.front_matter.sidebar_class_name = Some("intro".to_owned());
        let items = generate(".", &[d], &CategoryMetadataMap::new()).unwrap();
        assert_eq!(
            items,
            vec![NormalizedSidebarItem::Doc(SidebarItemDoc {
                id: "intro".to_owned(),
                label: Some("Start here".to_owned()),
                class_name: Some("intro".to_owned()),
                custom_props: None,
            })]
        );
    }

    #[test]
    fn test_custom_category_index_matcher() {
        fn is_named_after_dir(file_name: &str, directories: &[&str]) -> bool {
            directories
                .first()
                .is_some_and(|dir| file_name.eq_ignore_ascii_case(&format!("{dir}-index")))
        }

        let docs = vec![doc("tutorials/tutorials-index.md", None), doc("tutorials/one.md", None)];
        let version = VersionMetadata::new("current", "/site/docs");
        let options = SidebarOptions::default();
        let metadata = CategoryMetadataMap::new();
        let items = default_sidebar_items_generator(&SidebarItemsGeneratorArgs {
            dir_name: ".",
            docs: &docs,
            version: &version,
            number_prefix_parser: &DefaultNumberPrefixParser,
            is_category_index: is_named_after_dir,
            categories_metadata: &metadata,
            options: &options,
        })
        .unwrap();

        assert_eq!(
            items,
            vec![category(
                "Tutorials",
                doc_link("tutorials/tutorials-index"),
                vec![NormalizedSidebarItem::doc("tutorials/one")]
            )]
        );
    }

    #[test]
    fn test_file_stem_and_local_id() {
        assert_eq!(file_stem("@site/docs/guides/index.mdx"), "index");
        assert_eq!(file_stem("README"), "README");
        assert_eq!(local_id("a/b/c"), "c");
        assert_eq!(local_id("c"), "c");
    }
}
