//! `folio version` command implementation.

use std::path::PathBuf;

use clap::Args;
use folio_config::{CliSettings, Config};
use folio_versioning::{CreateVersionOptions, VersionedLayout, create_version};

use super::{sidebar_file, sidebar_options};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the version command.
#[derive(Args)]
pub(crate) struct VersionArgs {
    /// Name of the version to create (e.g. `1.0.0`).
    tag: Option<String>,

    /// Path to configuration file (default: auto-discover folio.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Docs content directory (overrides config).
    #[arg(long)]
    docs_path: Option<PathBuf>,

    /// Sidebar definition file (overrides config).
    #[arg(long)]
    sidebar_path: Option<PathBuf>,
}

impl VersionArgs {
    /// Snapshot the current docs as a new version.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            docs_path: self.docs_path,
            sidebar_path: self.sidebar_path,
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        tracing::debug!(
            config = ?config.config_path,
            site_dir = %config.site_dir.display(),
            "Loaded configuration"
        );
        let docs = &config.docs_resolved;

        let options = CreateVersionOptions {
            layout: VersionedLayout::new(&config.site_dir, &docs.id),
            docs_dir: docs.path.clone(),
            sidebar: sidebar_file(&docs.sidebar),
            sidebar_options: sidebar_options(&config),
            i18n_dir: config.i18n_dir(),
            locales: config.i18n.locales.clone(),
            default_locale: config.i18n.default_locale.clone(),
        };

        let report = create_version(self.tag.as_deref(), &options)?;

        for warning in report.warning_messages() {
            output.warning(&warning);
        }
        output.success(&report.success_message());
        Ok(())
    }
}
