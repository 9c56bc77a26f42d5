//! The versions file: an ordered list of version names, newest first.

use std::path::Path;

use serde_json::Value;

use crate::error::VersioningError;
use crate::name::validate_version_value;

/// Ordered version names as persisted in `versions.json`.
///
/// Only ever grows at the front; the whole list is rewritten on save.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VersionsLog {
    versions: Vec<String>,
}

impl VersionsLog {
    /// Log holding `versions`, newest first.
    pub fn new(versions: Vec<String>) -> Self {
        Self { versions }
    }

    /// Read a versions file; a missing file is an empty log.
    pub fn load(path: &Path) -> Result<Self, VersioningError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(VersioningError::io(path, e)),
        };

        let invalid = |message: String| VersioningError::VersionsFile {
            path: path.to_path_buf(),
            message,
        };

        let value: Value = serde_json::from_str(&content).map_err(|e| invalid(e.to_string()))?;
        let Value::Array(entries) = value else {
            return Err(invalid(format!("expected an array of version names, found {value}")));
        };

        let versions = entries
            .iter()
            .map(|entry| {
                validate_version_value(entry)
                    .map(str::to_owned)
                    .map_err(|e| invalid(e.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { versions })
    }

    /// Write the log as a JSON array.
    pub fn save(&self, path: &Path) -> Result<(), VersioningError> {
        let mut json =
            serde_json::to_string_pretty(&self.versions).map_err(|source| VersioningError::Serialize {
                path: path.to_path_buf(),
                source,
            })?;
        json.push('\n');

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| VersioningError::io(parent, e))?;
        }
        std::fs::write(path, json).map_err(|e| VersioningError::io(path, e))
    }

    /// Names, newest first.
    pub fn versions(&self) -> &[String] {
        &self.versions
    }

    /// Whether `name` is listed.
    pub fn contains(&self, name: &str) -> bool {
        self.versions.iter().any(|v| v == name)
    }

    /// Record `name` as the newest version.
    pub fn prepend(&mut self, name: impl Into<String>) {
        self.versions.insert(0, name.into());
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }
}
