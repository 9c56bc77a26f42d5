//! Document metadata builder.
//!
//! Combines the parsed source path, the front matter and the body of a
//! [`DocFile`] into a [`DocMetadataBase`]:
//!
//! | Field | Source, by precedence |
//! |-------|-----------------------|
//! | base id | front matter `id`, file name without number prefix |
//! | `unversioned_id` | directory (number prefixes stripped) + base id |
//! | `id` | `version-<name>/` + unversioned id (non-current versions) |
//! | `slug` | `/` for the home page, front matter `slug`, directory + base id |
//! | `title` | front matter `title`, first heading, base id |
//! | `description` | front matter `description`, first paragraph, empty |
//! | `sidebar_position` | front matter `sidebar_position`, file number prefix |
//! | `edit_url` | front matter `custom_edit_url`, configured strategy |

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, NaiveDate};
use folio_storage::DocFile;
use serde::Serialize;

use crate::edit_url::{EditUrl, EditUrlParams, get_edit_url};
use crate::error::{DocProcessingError, DuplicateId, MetadataError};
use crate::filename::{IsCategoryIndex, ancestor_directories, default_is_category_index, parse_file_name};
use crate::front_matter::DocFrontMatter;
use crate::markdown::parse_markdown_string;
use crate::number_prefix::{
    DefaultNumberPrefixParser, DisabledNumberPrefixParser, NumberPrefixParser,
    strip_path_number_prefixes,
};
use crate::permalink::{aliased_site_path, normalize_url, posix_path, relative_path};
use crate::slug::{SlugParams, get_slug};
use crate::version::{CURRENT_VERSION_NAME, VersionMetadata};

/// Metadata of one document in one version.
///
/// Built once per content file and never mutated afterwards.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocMetadataBase {
    /// Id without the version prefix (`guides/setup`).
    pub unversioned_id: String,
    /// Id unique within the version (`version-1.0.0/guides/setup`).
    pub id: String,
    /// Whether this is the configured home page.
    pub is_home_page: bool,
    /// Page title.
    pub title: String,
    /// Page description.
    pub description: String,
    /// Aliased source path (`@site/docs/guides/setup.md`).
    pub source: String,
    /// Directory of the source relative to the content root (`.` for the root).
    pub source_dir_name: String,
    /// Version-relative slug.
    pub slug: String,
    /// Absolute site-rooted URL.
    pub permalink: String,
    /// Edit link, if any.
    pub edit_url: Option<String>,
    /// Version name.
    pub version: String,
    /// Author of the last change.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated_by: Option<String>,
    /// Seconds since Unix epoch of the last change.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated_at: Option<i64>,
    /// Human-readable last change date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatted_last_updated_at: Option<String>,
    /// Ordering hint for autogenerated sidebars.
    pub sidebar_position: Option<f64>,
    /// Date found in the source path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    /// Front matter as written.
    pub front_matter: DocFrontMatter,
}

/// Plugin-level settings used while building metadata.
#[derive(Clone)]
pub struct MetadataOptions {
    /// Unversioned id of the home page document.
    pub home_page_id: Option<String>,
    /// Number prefix strategy.
    pub number_prefix_parser: Arc<dyn NumberPrefixParser>,
    /// Category index matcher used for slugs.
    pub is_category_index: IsCategoryIndex,
    /// Edit URL strategy.
    pub edit_url: Option<EditUrl>,
    /// Link localized files to their localized edit URL.
    pub edit_localized_files: bool,
    /// Active locale.
    pub locale: String,
    /// Site root; sources are aliased relative to it.
    pub site_dir: PathBuf,
}

impl MetadataOptions {
    /// Options with defaults for a site rooted at `site_dir`.
    pub fn new(site_dir: impl Into<PathBuf>) -> Self {
        Self {
            home_page_id: None,
            number_prefix_parser: Arc::new(DefaultNumberPrefixParser),
            is_category_index: default_is_category_index,
            edit_url: None,
            edit_localized_files: false,
            locale: "en".to_owned(),
            site_dir: site_dir.into(),
        }
    }

    /// Enable or disable number prefix parsing.
    #[must_use]
    pub fn with_number_prefix_parsing(mut self, enabled: bool) -> Self {
        self.number_prefix_parser = if enabled {
            Arc::new(DefaultNumberPrefixParser)
        } else {
            Arc::new(DisabledNumberPrefixParser)
        };
        self
    }
}

/// Build the metadata of one document.
///
/// Failures are logged with the file path and version, then returned
/// wrapped in a [`DocProcessingError`] that keeps the cause.
pub fn process_doc_metadata(
    doc: &DocFile,
    version: &VersionMetadata,
    options: &MetadataOptions,
) -> Result<DocMetadataBase, DocProcessingError> {
    build_doc_metadata(doc, version, options).map_err(|source| {
        tracing::error!(
            path = %doc.file_path.display(),
            version = %version.version_name,
            "Can't process doc metadata"
        );
        DocProcessingError {
            file_path: doc.file_path.clone(),
            version: version.version_name.clone(),
            source,
        }
    })
}

fn build_doc_metadata(
    doc: &DocFile,
    version: &VersionMetadata,
    options: &MetadataOptions,
) -> Result<DocMetadataBase, MetadataError> {
    let parsed = parse_markdown_string(&doc.content)?;
    let front_matter = parsed.front_matter;

    let parse_number_prefixes = front_matter.parse_number_prefixes();
    let parser: &dyn NumberPrefixParser = if parse_number_prefixes {
        options.number_prefix_parser.as_ref()
    } else {
        &DisabledNumberPrefixParser
    };

    let source = doc.source.replace('\\', "/");
    let (source_dir_name, file_name) = match source.rsplit_once('/') {
        Some((dir, file)) => (dir.to_owned(), file),
        None => (".".to_owned(), source.as_str()),
    };
    let file_stem = Path::new(file_name)
        .file_stem()
        .map_or_else(|| file_name.to_owned(), |s| s.to_string_lossy().into_owned());

    let prefix = parser.parse(&file_stem);
    let base_id = front_matter.id.clone().unwrap_or(prefix.filename);
    if base_id.contains('/') {
        return Err(MetadataError::SlashInId(base_id));
    }

    let sidebar_position = front_matter
        .sidebar_position
        .or(prefix.number_prefix.map(f64::from));

    let unversioned_id = if source_dir_name == "." {
        base_id.clone()
    } else {
        format!(
            "{}/{base_id}",
            strip_path_number_prefixes(&source_dir_name, parser)
        )
    };
    let id = if version.version_name == CURRENT_VERSION_NAME {
        unversioned_id.clone()
    } else {
        format!("version-{}/{unversioned_id}", version.version_name)
    };

    let is_home_page = options
        .home_page_id
        .as_deref()
        .is_some_and(|home| home == unversioned_id);
    if is_home_page && let Some(slug) = &front_matter.slug {
        return Err(MetadataError::HomePageSlugConflict {
            home_page_id: unversioned_id,
            slug: slug.clone(),
        });
    }

    let slug = if is_home_page {
        "/".to_owned()
    } else {
        let directories = ancestor_directories(&source_dir_name);
        get_slug(&SlugParams {
            base_id: &base_id,
            front_matter_slug: front_matter.slug.as_deref(),
            source_dir_name: &source_dir_name,
            is_category_index: (options.is_category_index)(&file_stem, &directories),
            strip_dir_number_prefixes: parse_number_prefixes,
            number_prefix_parser: parser,
        })?
    };

    let title = front_matter
        .title
        .clone()
        .or(parsed.content_title)
        .unwrap_or_else(|| base_id.clone());
    let description = front_matter
        .description
        .clone()
        .or(parsed.excerpt)
        .unwrap_or_default();
    let permalink = normalize_url(&[&version.version_path, &slug]);

    let edit_url = match &front_matter.custom_edit_url {
        Some(custom) => custom.clone(),
        None => doc_edit_url(doc, version, options, &permalink),
    };

    let last_update = &doc.last_update;
    let date = parse_file_name(&source, parser).date;

    Ok(DocMetadataBase {
        unversioned_id,
        id,
        is_home_page,
        title,
        description,
        source: aliased_site_path(&doc.file_path, &options.site_dir),
        source_dir_name,
        slug,
        permalink,
        edit_url,
        version: version.version_name.clone(),
        last_updated_by: last_update.last_updated_by.clone(),
        last_updated_at: last_update.last_updated_at,
        formatted_last_updated_at: last_update.last_updated_at.and_then(format_timestamp),
        sidebar_position,
        date,
        front_matter,
    })
}

fn doc_edit_url(
    doc: &DocFile,
    version: &VersionMetadata,
    options: &MetadataOptions,
    permalink: &str,
) -> Option<String> {
    let relative_file_path = posix_path(&relative_path(&doc.content_path, &doc.file_path));

    match options.edit_url.as_ref()? {
        EditUrl::Function(edit_url) => edit_url(&EditUrlParams {
            version: version.version_name.clone(),
            version_docs_dir_path: posix_path(&relative_path(
                &options.site_dir,
                &version.content_path,
            )),
            doc_path: relative_file_path,
            permalink: permalink.to_owned(),
            locale: options.locale.clone(),
        }),
        EditUrl::Template(_) => {
            let is_localized =
                version.content_path_localized.as_deref() == Some(doc.content_path.as_path());
            let base = if is_localized && options.edit_localized_files {
                version.edit_url_localized.as_deref()
            } else {
                version.edit_url.as_deref()
            };
            get_edit_url(&relative_file_path, base)
        }
    }
}

/// Format a Unix timestamp as `M/D/YYYY`.
fn format_timestamp(timestamp: i64) -> Option<String> {
    DateTime::from_timestamp(timestamp, 0).map(|dt| dt.format("%-m/%-d/%Y").to_string())
}

/// Fail if several documents share an id.
///
/// Duplicates are reported in id order with every source that claimed them.
pub fn check_duplicate_ids(docs: &[DocMetadataBase]) -> Result<(), MetadataError> {
    let mut by_id: HashMap<&str, Vec<String>> = HashMap::new();
    for doc in docs {
        by_id.entry(&doc.id).or_default().push(doc.source.clone());
    }

    let mut duplicates: Vec<DuplicateId> = by_id
        .into_iter()
        .filter(|(_, sources)| sources.len() > 1)
        .map(|(id, sources)| DuplicateId {
            id: id.to_owned(),
            sources,
        })
        .collect();

    if duplicates.is_empty() {
        return Ok(());
    }
    duplicates.sort_by(|a, b| a.id.cmp(&b.id));
    Err(MetadataError::DuplicateId(duplicates))
}
