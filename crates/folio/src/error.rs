//! CLI error types.

use folio_config::ConfigError;
use folio_site::SiteError;
use folio_versioning::VersioningError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Versioning(#[from] VersioningError),

    #[error("{0}")]
    Site(#[from] SiteError),
}
