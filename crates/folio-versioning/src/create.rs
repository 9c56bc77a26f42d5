//! The create-version command.
//!
//! Runs once per invocation through four steps:
//!
//! 1. Validate: the name, its uniqueness, the current content and sidebars
//! 2. Snapshot: copy the current content of every locale and write the
//!    sidebars, concurrently
//! 3. Persist: prepend the name to the versions file, once every snapshot
//!    task has finished
//! 4. Report: return what was created and skipped
//!
//! A failure after the snapshot started leaves the copied files in place;
//! the versions file is only written when everything else succeeded, so a
//! retry with the same name is still accepted.

use std::fs;
use std::path::{Path, PathBuf};

use folio_content::{CURRENT_VERSION_NAME, SidebarFile};
use folio_sidebar::{NormalizedSidebars, SidebarOptions, load_sidebars};
use rayon::prelude::*;

use crate::error::VersioningError;
use crate::layout::VersionedLayout;
use crate::name::validate_version_name;
use crate::versions_log::VersionsLog;

/// Inputs of the create-version command.
#[derive(Clone, Debug)]
pub struct CreateVersionOptions {
    /// Layout of the plugin's versioned files.
    pub layout: VersionedLayout,
    /// Current content directory.
    pub docs_dir: PathBuf,
    /// Current sidebar definition.
    pub sidebar: SidebarFile,
    /// Sidebar defaults used while normalizing.
    pub sidebar_options: SidebarOptions,
    /// Directory holding localized content.
    pub i18n_dir: PathBuf,
    /// Configured locales.
    pub locales: Vec<String>,
    /// Locale whose content lives in `docs_dir`.
    pub default_locale: String,
}

/// Outcome of a successful create-version run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VersionReport {
    /// Prefix used in messages.
    pub plugin: String,
    /// Created version.
    pub version_name: String,
    /// Directories copied, source and destination.
    pub copied: Vec<(PathBuf, PathBuf)>,
    /// Localized directories skipped because they had no docs.
    pub skipped: Vec<PathBuf>,
    /// Versions file after the update, newest first.
    pub versions: Vec<String>,
}

impl VersionReport {
    /// `[docs]: version 1.0.0 created!`
    pub fn success_message(&self) -> String {
        format!("[{}]: version {} created!", self.plugin, self.version_name)
    }

    /// One `[docs]: no docs found in "<path>". Skipping.` per skipped locale.
    pub fn warning_messages(&self) -> Vec<String> {
        self.skipped
            .iter()
            .map(|path| {
                format!(
                    "[{}]: no docs found in \"{}\". Skipping.",
                    self.plugin,
                    path.display()
                )
            })
            .collect()
    }
}

enum SnapshotTask<'a> {
    Copy { from: &'a Path, to: &'a Path },
    WriteSidebars { path: &'a Path, sidebars: &'a NormalizedSidebars },
}

/// Snapshot the current content as version `name`.
pub fn create_version(
    name: Option<&str>,
    options: &CreateVersionOptions,
) -> Result<VersionReport, VersioningError> {
    let layout = &options.layout;
    let plugin = layout.log_prefix().to_owned();

    // Validate
    validate_version_name(name)?;
    let name = name.unwrap_or_default();

    let versions_file = layout.versions_file();
    let mut log = VersionsLog::load(&versions_file)?;
    if log.contains(name) {
        return Err(VersioningError::AlreadyExists {
            plugin,
            tag: name.to_owned(),
        });
    }

    if !has_entries(&options.docs_dir)? {
        return Err(VersioningError::NoDocs {
            plugin,
            path: options.docs_dir.clone(),
        });
    }

    let sidebars = load_sidebars(&options.sidebar, &options.sidebar_options)?;

    // Snapshot
    let mut copied = vec![(options.docs_dir.clone(), layout.version_docs_dir(name))];
    let mut skipped = Vec::new();
    for locale in options.locales.iter().filter(|l| **l != options.default_locale) {
        let from = layout.localized_docs_dir(&options.i18n_dir, locale, CURRENT_VERSION_NAME);
        if has_entries(&from)? {
            let to = layout.localized_docs_dir(&options.i18n_dir, locale, name);
            copied.push((from, to));
        } else {
            tracing::warn!(plugin = %plugin, path = %from.display(), "No docs found, skipping locale");
            skipped.push(from);
        }
    }

    let sidebars_file = layout.version_sidebars_file(name);
    let mut tasks: Vec<SnapshotTask<'_>> = copied
        .iter()
        .map(|(from, to)| SnapshotTask::Copy { from, to })
        .collect();
    tasks.push(SnapshotTask::WriteSidebars {
        path: &sidebars_file,
        sidebars: &sidebars,
    });

    // Every task completes before the versions file is touched.
    tasks.par_iter().try_for_each(run_snapshot_task)?;

    // Persist
    log.prepend(name);
    log.save(&versions_file)?;

    // Report
    tracing::info!(plugin = %plugin, version = %name, "Version created");
    Ok(VersionReport {
        plugin,
        version_name: name.to_owned(),
        copied,
        skipped,
        versions: log.versions().to_vec(),
    })
}

fn run_snapshot_task(task: &SnapshotTask<'_>) -> Result<(), VersioningError> {
    match task {
        SnapshotTask::Copy { from, to } => {
            tracing::debug!(from = %from.display(), to = %to.display(), "Copying docs");
            copy_dir_recursive(from, to)
        }
        SnapshotTask::WriteSidebars { path, sidebars } => write_sidebars(path, sidebars),
    }
}

/// Whether `dir` exists and holds at least one entry.
fn has_entries(dir: &Path) -> Result<bool, VersioningError> {
    match fs::read_dir(dir) {
        Ok(mut entries) => Ok(entries.next().is_some()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(VersioningError::io(dir, e)),
    }
}

/// Recursively copy directory contents, creating `dst` as needed.
fn copy_dir_recursive(src: &Path, dst: &Path) -> Result<(), VersioningError> {
    fs::create_dir_all(dst).map_err(|e| VersioningError::io(dst, e))?;

    for entry in fs::read_dir(src).map_err(|e| VersioningError::io(src, e))? {
        let entry = entry.map_err(|e| VersioningError::io(src, e))?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            fs::copy(&src_path, &dst_path).map_err(|e| VersioningError::io(&src_path, e))?;
        }
    }
    Ok(())
}

fn write_sidebars(path: &Path, sidebars: &NormalizedSidebars) -> Result<(), VersioningError> {
    let mut json =
        serde_json::to_string_pretty(sidebars).map_err(|source| VersioningError::Serialize {
            path: path.to_path_buf(),
            source,
        })?;
    json.push('\n');

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| VersioningError::io(parent, e))?;
    }
    fs::write(path, json).map_err(|e| VersioningError::io(path, e))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;
    use crate::layout::DEFAULT_PLUGIN_ID;

    fn options(site: &Path) -> CreateVersionOptions {
        CreateVersionOptions {
            layout: VersionedLayout::new(site, DEFAULT_PLUGIN_ID),
            docs_dir: site.join("docs"),
            sidebar: SidebarFile::Default,
            sidebar_options: SidebarOptions::default(),
            i18n_dir: site.join("i18n"),
            locales: vec!["en".to_owned()],
            default_locale: "en".to_owned(),
        }
    }

    #[test]
    fn test_has_entries() {
        let temp_dir = TempDir::new().unwrap();
        assert!(!has_entries(&temp_dir.path().join("missing")).unwrap());
        assert!(!has_entries(temp_dir.path()).unwrap());
        fs::write(temp_dir.path().join("a.md"), "").unwrap();
        assert!(has_entries(temp_dir.path()).unwrap());
    }

    #[test]
    fn test_copy_dir_recursive() {
        let temp_dir = TempDir::new().unwrap();
        let src = temp_dir.path().join("src");
        fs::create_dir_all(src.join("nested/deeper")).unwrap();
        fs::write(src.join("a.md"), "a").unwrap();
        fs::write(src.join("nested/deeper/b.md"), "b").unwrap();

        let dst = temp_dir.path().join("dst");
        copy_dir_recursive(&src, &dst).unwrap();

        assert_eq!(fs::read_to_string(dst.join("a.md")).unwrap(), "a");
        assert_eq!(fs::read_to_string(dst.join("nested/deeper/b.md")).unwrap(), "b");
    }

    #[test]
    fn test_invalid_name_fails_before_touching_disk() {
        let temp_dir = TempDir::new().unwrap();
        let err = create_version(Some("../x"), &options(temp_dir.path())).unwrap_err();
        assert!(matches!(err, VersioningError::InvalidName(_)));
        assert!(!temp_dir.path().join("versions.json").exists());
    }

    #[test]
    fn test_missing_docs_dir() {
        let temp_dir = TempDir::new().unwrap();
        let err = create_version(Some("1.0.0"), &options(temp_dir.path())).unwrap_err();
        assert!(matches!(err, VersioningError::NoDocs { ref plugin, .. } if plugin == "docs"));
    }

    #[test]
    fn test_report_messages() {
        let report = VersionReport {
            plugin: "docs".to_owned(),
            version_name: "1.0.0".to_owned(),
            copied: vec![],
            skipped: vec![PathBuf::from("/site/i18n/fr/docs/current")],
            versions: vec!["1.0.0".to_owned()],
        };
        assert_eq!(report.success_message(), "[docs]: version 1.0.0 created!");
        assert_eq!(
            report.warning_messages(),
            vec!["[docs]: no docs found in \"/site/i18n/fr/docs/current\". Skipping.".to_owned()]
        );
    }
}
