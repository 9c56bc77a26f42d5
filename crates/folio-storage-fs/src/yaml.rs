//! Category sidecar parsing for filesystem storage.

use folio_storage::CategoryMetadata;

/// Error parsing a category sidecar.
#[derive(Debug, thiserror::Error)]
pub(crate) enum SidecarError {
    #[error("Invalid JSON: {0}")]
    Json(#[source] serde_json::Error),
    #[error("Invalid YAML: {0}")]
    Yaml(#[source] serde_yaml::Error),
}

/// Parse category metadata from sidecar content.
///
/// `.json` sidecars are parsed as JSON, everything else as YAML.
/// Empty content returns a default instance.
pub(crate) fn parse_category_metadata(
    filename: &str,
    content: &str,
) -> Result<CategoryMetadata, SidecarError> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Ok(CategoryMetadata::default());
    }

    if filename.ends_with(".json") {
        serde_json::from_str(trimmed).map_err(SidecarError::Json)
    } else {
        serde_yaml::from_str(trimmed).map_err(SidecarError::Yaml)
    }
}
