//! Version metadata of a docs plugin.
//!
//! The version list is `current` (unless excluded) followed by the names of
//! the versions file, newest first. Every other attribute has a default
//! derived from that order and can be overridden in `[docs.versions]`.

use std::path::{Path, PathBuf};

use folio_config::{Config, ConfigError, SidebarSource, VersionOptions};
use folio_content::{
    CURRENT_VERSION_NAME, SidebarFile, VersionBanner, VersionMetadata, normalize_url, posix_path,
    relative_path,
};
use folio_versioning::{VersionedLayout, VersionsLog};

use crate::error::SiteError;

/// Label of the current version unless overridden.
pub const CURRENT_VERSION_LABEL: &str = "Next";

/// URL segment of the current version when it is not the last one.
const CURRENT_VERSION_PATH: &str = "next";

/// Compute the metadata of every version of the configured plugin.
///
/// Reads the versions file and checks that each version's content
/// directory exists.
pub fn read_versions_metadata(config: &Config) -> Result<Vec<VersionMetadata>, SiteError> {
    let docs = &config.docs_resolved;
    let layout = VersionedLayout::new(&config.site_dir, &docs.id);
    let log = VersionsLog::load(&layout.versions_file())?;

    let names = version_names(&log, docs.include_current_version)?;
    let last_version = last_version_name(docs.last_version.as_deref(), &log, &names)?;
    check_version_overrides(&names, docs.versions.keys())?;

    let context = VersionContext {
        config,
        layout: &layout,
        names: &names,
        last_version,
    };
    let versions = names
        .iter()
        .map(|name| context.version_metadata(name))
        .collect::<Result<Vec<_>, _>>()?;

    for version in &versions {
        check_content_path(version)?;
    }
    tracing::debug!(
        plugin = %docs.id,
        versions = ?names,
        last = %last_version,
        "Read versions metadata"
    );
    Ok(versions)
}

fn version_names(log: &VersionsLog, include_current: bool) -> Result<Vec<String>, ConfigError> {
    let mut names = Vec::with_capacity(log.versions().len() + 1);
    if include_current {
        names.push(CURRENT_VERSION_NAME.to_owned());
    }
    names.extend(log.versions().iter().cloned());

    if names.is_empty() {
        return Err(ConfigError::Validation(
            "It is not possible to use docs without any version. No version is included because docs.include_current_version is false and no version was created yet.".to_owned(),
        ));
    }
    Ok(names)
}

fn last_version_name<'a>(
    configured: Option<&'a str>,
    log: &'a VersionsLog,
    names: &[String],
) -> Result<&'a str, ConfigError> {
    let last = configured
        .or_else(|| log.versions().first().map(String::as_str))
        .unwrap_or(CURRENT_VERSION_NAME);

    if !names.iter().any(|name| name == last) {
        return Err(ConfigError::Validation(format!(
            "docs.last_version \"{last}\" is invalid. Available version names are: {}",
            names.join(",")
        )));
    }
    Ok(last)
}

fn check_version_overrides<'a>(
    names: &[String],
    configured: impl Iterator<Item = &'a String>,
) -> Result<(), ConfigError> {
    let mut unknown: Vec<&str> = configured
        .filter(|name| !names.contains(*name))
        .map(String::as_str)
        .collect();
    if unknown.is_empty() {
        return Ok(());
    }

    unknown.sort_unstable();
    Err(ConfigError::Validation(format!(
        "Invalid docs.versions: unknown versions ({}) found. Available version names are: {}",
        unknown.join(","),
        names.join(",")
    )))
}

fn check_content_path(version: &VersionMetadata) -> Result<(), ConfigError> {
    if version.content_path.is_dir() {
        return Ok(());
    }
    Err(ConfigError::Validation(format!(
        "The docs folder does not exist for version \"{}\". A docs folder is expected to be found at {}.",
        version.version_name,
        version.content_path.display()
    )))
}

struct VersionContext<'a> {
    config: &'a Config,
    layout: &'a VersionedLayout,
    names: &'a [String],
    last_version: &'a str,
}

impl VersionContext<'_> {
    fn version_metadata(&self, name: &str) -> Result<VersionMetadata, ConfigError> {
        let docs = &self.config.docs_resolved;
        let overrides = docs.versions.get(name).cloned().unwrap_or_default();
        let is_current = name == CURRENT_VERSION_NAME;
        let is_last = name == self.last_version;

        let path_part = overrides.path.clone().unwrap_or_else(|| {
            if is_last {
                String::new()
            } else if is_current {
                CURRENT_VERSION_PATH.to_owned()
            } else {
                name.to_owned()
            }
        });
        let version_path = normalize_url(&[
            &self.config.site.base_url,
            &docs.route_base_path,
            &path_part,
        ]);

        let content_path = self.content_path(name);
        let content_path_localized = self.localized_content_path(name);
        let (edit_url, edit_url_localized) = self.edit_urls(&content_path, &content_path_localized);

        Ok(VersionMetadata {
            version_name: name.to_owned(),
            label: overrides.label.clone().unwrap_or_else(|| {
                if is_current {
                    CURRENT_VERSION_LABEL.to_owned()
                } else {
                    name.to_owned()
                }
            }),
            version_path,
            is_last,
            banner: self.banner(name, &overrides)?,
            badge: overrides.badge.unwrap_or(self.names.len() > 1),
            class_name: Some(
                overrides
                    .class_name
                    .unwrap_or_else(|| format!("docs-version-{name}")),
            ),
            content_path,
            content_path_localized: Some(content_path_localized),
            edit_url,
            edit_url_localized,
            sidebar_file: self.sidebar_file(name),
        })
    }

    fn content_path(&self, name: &str) -> PathBuf {
        if name == CURRENT_VERSION_NAME {
            self.config.docs_resolved.path.clone()
        } else {
            self.layout.version_docs_dir(name)
        }
    }

    fn localized_content_path(&self, name: &str) -> PathBuf {
        self.layout.localized_docs_dir(
            &self.config.i18n_dir(),
            self.config.i18n.current_locale(),
            name,
        )
    }

    /// Unreleased for versions newer than the last one, unmaintained for older ones.
    fn banner(&self, name: &str, overrides: &VersionOptions) -> Result<VersionBanner, ConfigError> {
        if let Some(banner) = &overrides.banner {
            return banner.parse().map_err(|message: String| {
                ConfigError::Validation(format!("docs.versions.\"{name}\".banner: {message}"))
            });
        }

        if name == self.last_version {
            return Ok(VersionBanner::None);
        }
        if name == CURRENT_VERSION_NAME {
            return Ok(VersionBanner::Unreleased);
        }
        let position = |n: &str| self.names.iter().position(|candidate| candidate == n);
        Ok(if position(name) < position(self.last_version) {
            VersionBanner::Unreleased
        } else {
            VersionBanner::Unmaintained
        })
    }

    fn edit_urls(
        &self,
        content_path: &Path,
        content_path_localized: &Path,
    ) -> (Option<String>, Option<String>) {
        let docs = &self.config.docs_resolved;
        let Some(base) = docs.edit_url.as_deref() else {
            return (None, None);
        };

        let (edit_dir, edit_dir_localized) = if docs.edit_current_version {
            (
                docs.path.clone(),
                self.localized_content_path(CURRENT_VERSION_NAME),
            )
        } else {
            (
                content_path.to_path_buf(),
                content_path_localized.to_path_buf(),
            )
        };

        let site_dir = &self.config.site_dir;
        let url = |dir: &Path| normalize_url(&[base, &posix_path(&relative_path(site_dir, dir))]);
        (Some(url(&edit_dir)), Some(url(&edit_dir_localized)))
    }

    fn sidebar_file(&self, name: &str) -> SidebarFile {
        match &self.config.docs_resolved.sidebar {
            SidebarSource::Disabled => SidebarFile::Disabled,
            _ if name != CURRENT_VERSION_NAME => {
                SidebarFile::Path(self.layout.version_sidebars_file(name))
            }
            SidebarSource::Default => SidebarFile::Default,
            SidebarSource::File(path) => SidebarFile::Path(path.clone()),
        }
    }
}
