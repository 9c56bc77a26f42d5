//! CLI command implementations.

pub(crate) mod build;
pub(crate) mod version;

pub(crate) use build::BuildArgs;
pub(crate) use version::VersionArgs;

use folio_config::{Config, SidebarSource};
use folio_content::SidebarFile;
use folio_sidebar::SidebarOptions;

/// Sidebar source of the current version.
pub(crate) fn sidebar_file(source: &SidebarSource) -> SidebarFile {
    match source {
        SidebarSource::Default => SidebarFile::Default,
        SidebarSource::File(path) => SidebarFile::Path(path.clone()),
        SidebarSource::Disabled => SidebarFile::Disabled,
    }
}

/// Category defaults configured for the docs plugin.
pub(crate) fn sidebar_options(config: &Config) -> SidebarOptions {
    SidebarOptions {
        sidebar_collapsible: config.docs_resolved.sidebar_collapsible,
        sidebar_collapsed: config.docs_resolved.sidebar_collapsed,
    }
}
