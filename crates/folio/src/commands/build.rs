//! `folio build` command implementation.

use std::path::PathBuf;

use clap::Args;
use folio_config::{CliSettings, Config};
use folio_site::{build_site, write_site};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Output directory (default: `build` next to the config file).
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Fail on content links that match no document.
    #[arg(long)]
    strict: bool,

    /// Path to configuration file (default: auto-discover folio.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Docs content directory (overrides config).
    #[arg(long)]
    docs_path: Option<PathBuf>,

    /// Sidebar definition file (overrides config).
    #[arg(long)]
    sidebar_path: Option<PathBuf>,

    /// Locale to build (overrides config).
    #[arg(long)]
    locale: Option<String>,
}

impl BuildArgs {
    /// Build every version and write the output.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            docs_path: self.docs_path,
            sidebar_path: self.sidebar_path,
            locale: self.locale,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        tracing::debug!(
            config = ?config.config_path,
            site_dir = %config.site_dir.display(),
            "Loaded configuration"
        );

        let out_dir = self.out.unwrap_or_else(|| config.site_dir.join("build"));
        output.info(&format!("Docs: {}", config.docs_resolved.path.display()));
        output.info(&format!("Output: {}", out_dir.display()));

        let site = build_site(&config, self.strict)?;
        for link in &site.broken_links {
            output.warning(&link.to_string());
        }

        let written = write_site(&out_dir, &site)?;
        output.success(&format!(
            "Built {} version(s), {written} file(s) written to {}",
            site.versions.len(),
            out_dir.display()
        ));
        Ok(())
    }
}
