//! On-disk layout of versioned content.
//!
//! For the default plugin:
//!
//! ```text
//! <site>/docs/                               current content
//! <site>/versioned_docs/version-<name>/      snapshot content
//! <site>/versioned_sidebars/<name>.json      snapshot sidebars
//! <site>/versions.json                       names, newest first
//! <site>/i18n/<locale>/docs/current/         localized current content
//! <site>/i18n/<locale>/docs/version-<name>/  localized snapshot
//! ```
//!
//! Another plugin id `<id>` prefixes the root entries with `<id>_` and uses
//! `docs-<id>` as its localized directory.

use std::path::{Path, PathBuf};

use folio_content::CURRENT_VERSION_NAME;

/// Plugin id of the default docs instance.
pub const DEFAULT_PLUGIN_ID: &str = "default";

/// Paths of one plugin's versioned files.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VersionedLayout {
    site_dir: PathBuf,
    plugin_id: String,
}

impl VersionedLayout {
    /// Layout of `plugin_id` in `site_dir`.
    pub fn new(site_dir: impl Into<PathBuf>, plugin_id: impl Into<String>) -> Self {
        Self {
            site_dir: site_dir.into(),
            plugin_id: plugin_id.into(),
        }
    }

    /// Site directory.
    pub fn site_dir(&self) -> &Path {
        &self.site_dir
    }

    /// Plugin id.
    pub fn plugin_id(&self) -> &str {
        &self.plugin_id
    }

    /// Prefix used in messages: `docs` for the default plugin, the id otherwise.
    pub fn log_prefix(&self) -> &str {
        if self.plugin_id == DEFAULT_PLUGIN_ID {
            "docs"
        } else {
            &self.plugin_id
        }
    }

    fn prefixed(&self, name: &str) -> PathBuf {
        if self.plugin_id == DEFAULT_PLUGIN_ID {
            self.site_dir.join(name)
        } else {
            self.site_dir.join(format!("{}_{name}", self.plugin_id))
        }
    }

    /// `versions.json`.
    pub fn versions_file(&self) -> PathBuf {
        self.prefixed("versions.json")
    }

    /// Directory holding every content snapshot.
    pub fn versioned_docs_dir(&self) -> PathBuf {
        self.prefixed("versioned_docs")
    }

    /// Content snapshot of one version.
    pub fn version_docs_dir(&self, version_name: &str) -> PathBuf {
        self.versioned_docs_dir()
            .join(format!("version-{version_name}"))
    }

    /// Directory holding every sidebar snapshot.
    pub fn versioned_sidebars_dir(&self) -> PathBuf {
        self.prefixed("versioned_sidebars")
    }

    /// Sidebar snapshot of one version.
    pub fn version_sidebars_file(&self, version_name: &str) -> PathBuf {
        self.versioned_sidebars_dir()
            .join(format!("{version_name}.json"))
    }

    /// Name of the plugin's directory under `i18n/<locale>/`.
    pub fn localized_plugin_dir_name(&self) -> String {
        if self.plugin_id == DEFAULT_PLUGIN_ID {
            "docs".to_owned()
        } else {
            format!("docs-{}", self.plugin_id)
        }
    }

    /// Localized content of a version: `current` or `version-<name>`.
    pub fn localized_docs_dir(&self, i18n_dir: &Path, locale: &str, version_name: &str) -> PathBuf {
        let version_dir = if version_name == CURRENT_VERSION_NAME {
            CURRENT_VERSION_NAME.to_owned()
        } else {
            format!("version-{version_name}")
        };
        i18n_dir
            .join(locale)
            .join(self.localized_plugin_dir_name())
            .join(version_dir)
    }
}
