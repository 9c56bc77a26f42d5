//! Version metadata consumed by the document builder.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::Serialize;

/// Name of the unreleased version built from the content root.
pub const CURRENT_VERSION_NAME: &str = "current";

/// Banner shown above the documents of a version.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VersionBanner {
    /// No banner.
    #[default]
    None,
    /// Version is not released yet.
    Unreleased,
    /// Version is no longer maintained.
    Unmaintained,
}

impl FromStr for VersionBanner {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Self::None),
            "unreleased" => Ok(Self::Unreleased),
            "unmaintained" => Ok(Self::Unmaintained),
            other => Err(format!(
                "unknown banner \"{other}\" (expected none, unreleased or unmaintained)"
            )),
        }
    }
}

impl fmt::Display for VersionBanner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::None => "none",
            Self::Unreleased => "unreleased",
            Self::Unmaintained => "unmaintained",
        })
    }
}

/// Where the sidebars of a version come from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SidebarFile {
    /// One autogenerated sidebar over the whole version.
    #[default]
    Default,
    /// Sidebar definition file.
    Path(PathBuf),
    /// No sidebars.
    Disabled,
}

/// One declared version of the documentation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VersionMetadata {
    /// `current` or the version tag.
    pub version_name: String,
    /// Display label.
    pub label: String,
    /// Route prefix of every document (`/docs/next`).
    pub version_path: String,
    /// Whether this is the default version.
    pub is_last: bool,
    /// Banner shown on its pages.
    pub banner: VersionBanner,
    /// Whether to show a version badge.
    pub badge: bool,
    /// CSS class applied to its pages.
    pub class_name: Option<String>,
    /// Content root.
    pub content_path: PathBuf,
    /// Localized content root of the active locale.
    pub content_path_localized: Option<PathBuf>,
    /// Edit URL base of the content root.
    pub edit_url: Option<String>,
    /// Edit URL base of the localized content root.
    pub edit_url_localized: Option<String>,
    /// Sidebar source.
    pub sidebar_file: SidebarFile,
}

impl VersionMetadata {
    /// Minimal metadata for a version rooted at `content_path`.
    pub fn new(version_name: impl Into<String>, content_path: impl Into<PathBuf>) -> Self {
        let version_name = version_name.into();
        Self {
            label: version_name.clone(),
            version_name,
            version_path: "/".to_owned(),
            is_last: true,
            banner: VersionBanner::None,
            badge: false,
            class_name: None,
            content_path: content_path.into(),
            content_path_localized: None,
            edit_url: None,
            edit_url_localized: None,
            sidebar_file: SidebarFile::Default,
        }
    }

    /// Whether this is the unreleased version.
    #[must_use]
    pub fn is_current(&self) -> bool {
        self.version_name == CURRENT_VERSION_NAME
    }

    /// Content roots, localized first.
    #[must_use]
    pub fn content_paths(&self) -> Vec<&PathBuf> {
        self.content_path_localized
            .iter()
            .chain(std::iter::once(&self.content_path))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_banner_from_str() {
        assert_eq!("none".parse(), Ok(VersionBanner::None));
        assert_eq!("unreleased".parse(), Ok(VersionBanner::Unreleased));
        assert_eq!("unmaintained".parse(), Ok(VersionBanner::Unmaintained));
        assert!("other".parse::<VersionBanner>().is_err());
    }

    #[test]
    fn test_banner_display_round_trips() {
        for banner in [
            VersionBanner::None,
            VersionBanner::Unreleased,
            VersionBanner::Unmaintained,
        ] {
            assert_eq!(banner.to_string().parse(), Ok(banner));
        }
    }

    #[test]
    fn test_is_current() {
        assert!(VersionMetadata::new(CURRENT_VERSION_NAME, "/site/docs").is_current());
        assert!(!VersionMetadata::new("1.0.0", "/site/versioned_docs/version-1.0.0").is_current());
    }

    #[test]
    fn test_content_paths_localized_first() {
        let mut version = VersionMetadata::new("current", "/site/docs");
        assert_eq!(version.content_paths(), vec![&PathBuf::from("/site/docs")]);

        version.content_path_localized = Some(PathBuf::from("/site/i18n/fr/docs/current"));
        assert_eq!(
            version.content_paths(),
            vec![
                &PathBuf::from("/site/i18n/fr/docs/current"),
                &PathBuf::from("/site/docs")
            ]
        );
    }
}
