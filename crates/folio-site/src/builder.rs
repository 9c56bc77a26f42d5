//! Site build pipeline.
//!
//! Each version goes through the same stages:
//!
//! 1. Read every content file through a [`Storage`]
//! 2. Compute document metadata and reject duplicate ids
//! 3. Load, expand and validate the version's sidebars
//!
//! Versions are loaded concurrently. Once all of them are loaded, the
//! source-to-permalink map of the whole site is built and every document is
//! linkified against it, so links may cross versions.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use folio_config::Config;
use folio_content::{
    ContentPaths, DocMetadataBase, EditUrl, Linkifier, MetadataOptions, SidebarFile,
    SourceToPermalink, VersionMetadata, aliased_site_path, check_duplicate_ids,
    process_doc_metadata, source_to_permalink,
};
use folio_sidebar::{
    DefaultSidebarItemsGenerator, SidebarItemsGenerator, SidebarOptions, SidebarProcessor,
    Sidebars, load_sidebars, validate_sidebars,
};
use folio_storage::{DocFile, Storage};
use folio_storage_fs::FsStorage;
use rayon::prelude::*;
use serde::Serialize;

use crate::error::SiteError;
use crate::versions::read_versions_metadata;

/// A content link that matched no document of the site.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BrokenLink {
    /// Version of the document containing the link.
    pub version: String,
    /// Aliased source of the document containing the link.
    pub source: String,
    /// Link target as written.
    pub link: String,
}

impl fmt::Display for BrokenLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Docs markdown link couldn't be resolved: ({}) in \"{}\" for version {}",
            self.link, self.source, self.version
        )
    }
}

/// Linkified content of one document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocContent {
    /// Path relative to the content root.
    pub source: String,
    /// Content with resolvable links rewritten to permalinks.
    pub content: String,
}

/// Everything built for one version.
#[derive(Clone, Debug)]
pub struct VersionBuild {
    /// Version the documents belong to.
    pub metadata: VersionMetadata,
    /// Documents in source order.
    pub docs: Vec<DocMetadataBase>,
    /// Processed sidebars.
    pub sidebars: Sidebars,
    /// Linkified contents, in the same order as `docs`.
    pub contents: Vec<DocContent>,
}

/// Result of a site build.
#[derive(Clone, Debug)]
pub struct SiteBuild {
    /// Versions in declaration order.
    pub versions: Vec<VersionBuild>,
    /// Aliased source to permalink, across every version.
    pub source_to_permalink: SourceToPermalink,
    /// Links that could not be resolved.
    pub broken_links: Vec<BrokenLink>,
}

struct LoadedVersion {
    metadata: VersionMetadata,
    files: Vec<DocFile>,
    docs: Vec<DocMetadataBase>,
    sidebars: Sidebars,
}

/// Builds the versions of one docs plugin.
pub struct SiteBuilder {
    metadata_options: MetadataOptions,
    sidebar_options: SidebarOptions,
    generator: Arc<dyn SidebarItemsGenerator>,
    strict: bool,
}

impl SiteBuilder {
    /// Builder with default sidebar settings and generator.
    pub fn new(metadata_options: MetadataOptions) -> Self {
        Self {
            metadata_options,
            sidebar_options: SidebarOptions::default(),
            generator: Arc::new(DefaultSidebarItemsGenerator),
            strict: false,
        }
    }

    /// Builder configured from the docs plugin settings.
    pub fn from_config(config: &Config) -> Self {
        let docs = &config.docs_resolved;

        let mut options = MetadataOptions::new(config.site_dir.clone())
            .with_number_prefix_parsing(docs.number_prefix_parsing);
        options.home_page_id.clone_from(&docs.home_page_id);
        options.edit_url = docs.edit_url.clone().map(EditUrl::Template);
        options.edit_localized_files = docs.edit_localized_files;
        config.i18n.current_locale().clone_into(&mut options.locale);

        Self::new(options).with_sidebar_options(SidebarOptions {
            sidebar_collapsible: docs.sidebar_collapsible,
            sidebar_collapsed: docs.sidebar_collapsed,
        })
    }

    /// Set the category defaults used by sidebars.
    #[must_use]
    pub fn with_sidebar_options(mut self, options: SidebarOptions) -> Self {
        self.sidebar_options = options;
        self
    }

    /// Replace the autogenerated sidebar items hook.
    #[must_use]
    pub fn with_generator(mut self, generator: Arc<dyn SidebarItemsGenerator>) -> Self {
        self.generator = generator;
        self
    }

    /// Fail the build on broken links instead of reporting them.
    #[must_use]
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Build every version, each read through its own storage.
    pub fn build<S: Storage>(
        &self,
        versions: &[(VersionMetadata, S)],
    ) -> Result<SiteBuild, SiteError> {
        let loaded = versions
            .par_iter()
            .map(|(version, storage)| self.load_version(storage, version))
            .collect::<Result<Vec<_>, _>>()?;

        let source_to_permalink =
            source_to_permalink(loaded.iter().flat_map(|version| version.docs.iter()));

        let mut broken_links = Vec::new();
        let versions: Vec<VersionBuild> = loaded
            .into_iter()
            .map(|version| {
                let (build, broken) = self.linkify_version(version, &source_to_permalink);
                broken_links.extend(broken);
                build
            })
            .collect();

        for link in &broken_links {
            tracing::warn!(
                version = %link.version,
                source = %link.source,
                link = %link.link,
                "Docs markdown link couldn't be resolved"
            );
        }
        if self.strict && !broken_links.is_empty() {
            return Err(SiteError::BrokenLinks(broken_links));
        }

        Ok(SiteBuild {
            versions,
            source_to_permalink,
            broken_links,
        })
    }

    fn load_version<S: Storage + ?Sized>(
        &self,
        storage: &S,
        version: &VersionMetadata,
    ) -> Result<LoadedVersion, SiteError> {
        let sources = storage.scan()?;
        let files = sources
            .par_iter()
            .map(|source| storage.read(source))
            .collect::<Result<Vec<_>, _>>()?;

        let docs = files
            .par_iter()
            .map(|file| process_doc_metadata(file, version, &self.metadata_options))
            .collect::<Result<Vec<_>, _>>()?;
        check_duplicate_ids(&docs).map_err(|source| SiteError::Version {
            version: version.version_name.clone(),
            source,
        })?;

        let sidebars = self.process_sidebars(storage, version, &docs)?;

        tracing::info!(
            version = %version.version_name,
            docs = docs.len(),
            sidebars = sidebars.len(),
            "Loaded version"
        );
        Ok(LoadedVersion {
            metadata: version.clone(),
            files,
            docs,
            sidebars,
        })
    }

    fn process_sidebars<S: Storage + ?Sized>(
        &self,
        storage: &S,
        version: &VersionMetadata,
        docs: &[DocMetadataBase],
    ) -> Result<Sidebars, SiteError> {
        let normalized = load_sidebars(&version.sidebar_file, &self.sidebar_options)?;
        if normalized.is_empty() {
            return Ok(Sidebars::new());
        }

        let categories_metadata = storage.category_metadata()?;
        let processor = SidebarProcessor {
            generator: self.generator.as_ref(),
            docs,
            version,
            number_prefix_parser: self.metadata_options.number_prefix_parser.as_ref(),
            is_category_index: self.metadata_options.is_category_index,
            categories_metadata: &categories_metadata,
            options: self.sidebar_options,
        };
        let sidebars = processor.process_sidebars(&normalized)?;

        let sidebar_path = match &version.sidebar_file {
            SidebarFile::Path(path) => path.clone(),
            SidebarFile::Default | SidebarFile::Disabled => PathBuf::from("<default>"),
        };
        validate_sidebars(&sidebars, docs, &sidebar_path)?;
        Ok(sidebars)
    }

    fn linkify_version(
        &self,
        version: LoadedVersion,
        source_to_permalink: &SourceToPermalink,
    ) -> (VersionBuild, Vec<BrokenLink>) {
        let site_dir = &self.metadata_options.site_dir;
        let linkifier = Linkifier::new(site_dir, source_to_permalink);
        let content_paths = ContentPaths {
            content_path: version.metadata.content_path.clone(),
            content_path_localized: version.metadata.content_path_localized.clone(),
        };
        let version_name = &version.metadata.version_name;

        let linkified: Vec<(DocContent, Vec<BrokenLink>)> = version
            .files
            .par_iter()
            .map(|file| {
                let mut broken = Vec::new();
                let content =
                    linkifier.linkify(&file.file_path, &file.content, &content_paths, |link| {
                        broken.push(BrokenLink {
                            version: version_name.clone(),
                            source: aliased_site_path(&link.file_path, site_dir),
                            link: link.link,
                        });
                    });
                let doc = DocContent {
                    source: file.source.clone(),
                    content,
                };
                (doc, broken)
            })
            .collect();

        let (contents, broken): (Vec<_>, Vec<_>) = linkified.into_iter().unzip();
        let build = VersionBuild {
            metadata: version.metadata,
            docs: version.docs,
            sidebars: version.sidebars,
            contents,
        };
        (build, broken.into_iter().flatten().collect())
    }
}

/// Build the configured docs plugin from the filesystem.
pub fn build_site(config: &Config, strict: bool) -> Result<SiteBuild, SiteError> {
    let docs = &config.docs_resolved;
    let versions = read_versions_metadata(config)?;

    let storages = versions
        .into_iter()
        .map(|version| -> Result<_, SiteError> {
            let mut storage = FsStorage::with_patterns(
                version.content_path.clone(),
                docs.include.as_slice(),
                docs.exclude.as_slice(),
            )?
            .with_last_update(docs.show_last_update_time);
            if let Some(localized) = &version.content_path_localized {
                storage = storage.with_localized_path(localized.clone());
            }
            Ok((version, storage))
        })
        .collect::<Result<Vec<_>, _>>()?;

    SiteBuilder::from_config(config)
        .strict(strict)
        .build(&storages)
}
