//! Configuration management for folio.
//!
//! Parses `folio.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `site.base_url`
//! - `site.url`
//! - `docs.edit_url`

mod expand;

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the docs content directory.
    pub docs_path: Option<PathBuf>,
    /// Override the sidebar definition file.
    pub sidebar_path: Option<PathBuf>,
    /// Override the locale being built.
    pub locale: Option<String>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "folio.toml";

/// Plugin id of the default docs instance.
pub const DEFAULT_PLUGIN_ID: &str = "default";

/// Banner values accepted in `[docs.versions]`.
const BANNERS: [&str; 3] = ["none", "unreleased", "unmaintained"];

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Site-wide settings.
    pub site: SiteConfig,
    /// Docs plugin configuration (paths are relative strings from TOML).
    docs: DocsConfigRaw,
    /// Internationalization settings.
    pub i18n: I18nConfig,

    /// Resolved docs configuration (set after loading).
    #[serde(skip)]
    pub docs_resolved: DocsConfig,
    /// Site directory: the directory holding `folio.toml` (set after loading).
    #[serde(skip)]
    pub site_dir: PathBuf,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Site configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Base URL every permalink is rooted at.
    pub base_url: String,
    /// Public site URL, if known.
    pub url: Option<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "/".to_owned(),
            url: None,
        }
    }
}

/// Internationalization configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct I18nConfig {
    /// Locale whose content lives in the unlocalized directories.
    pub default_locale: String,
    /// All configured locales.
    pub locales: Vec<String>,
    /// Directory holding localized content, relative to the site directory.
    pub path: String,
    /// Locale being built (defaults to `default_locale`).
    pub current_locale: Option<String>,
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            default_locale: "en".to_owned(),
            locales: vec!["en".to_owned()],
            path: "i18n".to_owned(),
            current_locale: None,
        }
    }
}

impl I18nConfig {
    /// Locale being built.
    #[must_use]
    pub fn current_locale(&self) -> &str {
        self.current_locale
            .as_deref()
            .unwrap_or(&self.default_locale)
    }
}

/// `sidebar_path` as written in TOML: a path or `false`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SidebarPathRaw {
    Path(String),
    Enabled(bool),
}

/// Per-version overrides from `[docs.versions."<name>"]`.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VersionOptions {
    /// Display label.
    pub label: Option<String>,
    /// URL path segment of the version.
    pub path: Option<String>,
    /// Banner: `none`, `unreleased` or `unmaintained`.
    pub banner: Option<String>,
    /// Whether to show the version badge.
    pub badge: Option<bool>,
    /// CSS class name attached to the version's pages.
    pub class_name: Option<String>,
}

/// Raw docs configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DocsConfigRaw {
    id: Option<String>,
    path: Option<String>,
    route_base_path: Option<String>,
    sidebar_path: Option<SidebarPathRaw>,
    edit_url: Option<String>,
    edit_localized_files: Option<bool>,
    edit_current_version: Option<bool>,
    include: Option<Vec<String>>,
    exclude: Option<Vec<String>>,
    number_prefix_parsing: Option<bool>,
    sidebar_collapsible: Option<bool>,
    sidebar_collapsed: Option<bool>,
    home_page_id: Option<String>,
    show_last_update_time: Option<bool>,
    include_current_version: Option<bool>,
    last_version: Option<String>,
    versions: HashMap<String, VersionOptions>,
}

/// Where sidebars come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SidebarSource {
    /// No file configured: one autogenerated sidebar over the whole tree.
    Default,
    /// Sidebars defined in a JSON or YAML file.
    File(PathBuf),
    /// `sidebar_path = false`: no sidebars at all.
    Disabled,
}

/// Resolved docs configuration with absolute paths.
#[derive(Debug)]
pub struct DocsConfig {
    /// Plugin id (`default` unless configured).
    pub id: String,
    /// Content directory of the current version.
    pub path: PathBuf,
    /// Route segment all docs live under.
    pub route_base_path: String,
    /// Sidebar definition source.
    pub sidebar: SidebarSource,
    /// Base URL for edit links.
    pub edit_url: Option<String>,
    /// Whether edit links point at localized files.
    pub edit_localized_files: bool,
    /// Whether edit links of every version point at the current version.
    pub edit_current_version: bool,
    /// Include glob patterns.
    pub include: Vec<String>,
    /// Exclude glob patterns.
    pub exclude: Vec<String>,
    /// Whether number prefixes are parsed from file and directory names.
    pub number_prefix_parsing: bool,
    /// Default `collapsible` for categories.
    pub sidebar_collapsible: bool,
    /// Default `collapsed` for categories.
    pub sidebar_collapsed: bool,
    /// Id of the document served at the version root.
    pub home_page_id: Option<String>,
    /// Whether to fill last-update information.
    pub show_last_update_time: bool,
    /// Whether the unversioned `current` docs are built.
    pub include_current_version: bool,
    /// Version served at the route base path.
    pub last_version: Option<String>,
    /// Per-version overrides.
    pub versions: HashMap<String, VersionOptions>,
}

impl DocsConfig {
    fn default_with_base(base: &Path) -> Self {
        Self {
            id: DEFAULT_PLUGIN_ID.to_owned(),
            path: base.join("docs"),
            route_base_path: "docs".to_owned(),
            sidebar: SidebarSource::Default,
            edit_url: None,
            edit_localized_files: false,
            edit_current_version: false,
            include: vec!["**/*.md".to_owned(), "**/*.mdx".to_owned()],
            exclude: vec![
                "**/_*.md".to_owned(),
                "**/_*.mdx".to_owned(),
                "**/_*/**".to_owned(),
            ],
            number_prefix_parsing: true,
            sidebar_collapsible: true,
            sidebar_collapsed: true,
            home_page_id: None,
            show_last_update_time: false,
            include_current_version: true,
            last_version: None,
            versions: HashMap::new(),
        }
    }

    /// Whether this is the default plugin instance.
    #[must_use]
    pub fn is_default_plugin(&self) -> bool {
        self.id == DEFAULT_PLUGIN_ID
    }
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`docs.edit_url`").
        field: String,
        /// Error message (e.g., "${`REPO_URL`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `folio.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails, or
    /// the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(docs_path) = &settings.docs_path {
            self.docs_resolved.path = self.site_dir.join(docs_path);
        }
        if let Some(sidebar_path) = &settings.sidebar_path {
            self.docs_resolved.sidebar = SidebarSource::File(self.site_dir.join(sidebar_path));
        }
        if let Some(locale) = &settings.locale {
            self.i18n.current_locale = Some(locale.clone());
        }
    }

    /// Directory holding localized content (`<site>/i18n`).
    #[must_use]
    pub fn i18n_dir(&self) -> PathBuf {
        self.site_dir.join(&self.i18n.path)
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    #[must_use]
    pub fn default_with_base(base: &Path) -> Self {
        Self {
            site: SiteConfig::default(),
            docs: DocsConfigRaw::default(),
            i18n: I18nConfig::default(),
            docs_resolved: DocsConfig::default_with_base(base),
            site_dir: base.to_path_buf(),
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir)?;
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_docs()?;
        self.validate_i18n()?;
        Ok(())
    }

    fn validate_docs(&self) -> Result<(), ConfigError> {
        let docs = &self.docs_resolved;

        require_non_empty(&docs.id, "docs.id")?;
        if docs.id.contains('/') {
            return Err(ConfigError::Validation(format!(
                "docs.id \"{}\" cannot include slash",
                docs.id
            )));
        }

        if docs.route_base_path.split('/').any(|s| s == "..") {
            return Err(ConfigError::Validation(
                "docs.route_base_path cannot contain \"..\"".to_owned(),
            ));
        }

        if let Some(edit_url) = &docs.edit_url {
            require_non_empty(edit_url, "docs.edit_url")?;
            require_http_url(edit_url, "docs.edit_url")?;
        }

        if docs.include.is_empty() {
            return Err(ConfigError::Validation(
                "docs.include needs at least one pattern".to_owned(),
            ));
        }

        let mut names: Vec<&String> = docs.versions.keys().collect();
        names.sort();
        for name in names {
            if let Some(banner) = &docs.versions[name].banner
                && !BANNERS.contains(&banner.as_str())
            {
                return Err(ConfigError::Validation(format!(
                    "docs.versions.\"{name}\".banner must be one of {}",
                    BANNERS.join(", ")
                )));
            }
        }

        Ok(())
    }

    fn validate_i18n(&self) -> Result<(), ConfigError> {
        let i18n = &self.i18n;
        require_non_empty(&i18n.default_locale, "i18n.default_locale")?;

        if !i18n.locales.contains(&i18n.default_locale) {
            return Err(ConfigError::Validation(format!(
                "i18n.default_locale \"{}\" must be listed in i18n.locales",
                i18n.default_locale
            )));
        }

        let current = i18n.current_locale();
        if !i18n.locales.iter().any(|l| l == current) {
            return Err(ConfigError::Validation(format!(
                "locale \"{current}\" is not listed in i18n.locales"
            )));
        }

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.site.base_url = expand::expand_env(&self.site.base_url, "site.base_url")?;
        self.site.url = expand::expand_env_opt(self.site.url.as_ref(), "site.url")?;
        self.docs.edit_url = expand::expand_env_opt(self.docs.edit_url.as_ref(), "docs.edit_url")?;
        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    ///
    /// Rejects `sidebar_path = true`, which names no file.
    fn resolve_paths(&mut self, config_dir: &Path) -> Result<(), ConfigError> {
        let defaults = DocsConfig::default_with_base(config_dir);
        let raw = std::mem::take(&mut self.docs);

        let sidebar = match raw.sidebar_path {
            None => SidebarSource::Default,
            Some(SidebarPathRaw::Path(path)) => SidebarSource::File(config_dir.join(path)),
            Some(SidebarPathRaw::Enabled(false)) => SidebarSource::Disabled,
            Some(SidebarPathRaw::Enabled(true)) => {
                return Err(ConfigError::Validation(
                    "docs.sidebar_path must be a file path or false".to_owned(),
                ));
            }
        };

        self.docs_resolved = DocsConfig {
            id: raw.id.unwrap_or(defaults.id),
            path: raw.path.map_or(defaults.path, |p| config_dir.join(p)),
            route_base_path: raw.route_base_path.unwrap_or(defaults.route_base_path),
            sidebar,
            edit_url: raw.edit_url,
            edit_localized_files: raw
                .edit_localized_files
                .unwrap_or(defaults.edit_localized_files),
            edit_current_version: raw
                .edit_current_version
                .unwrap_or(defaults.edit_current_version),
            include: raw.include.unwrap_or(defaults.include),
            exclude: raw.exclude.unwrap_or(defaults.exclude),
            number_prefix_parsing: raw
                .number_prefix_parsing
                .unwrap_or(defaults.number_prefix_parsing),
            sidebar_collapsible: raw
                .sidebar_collapsible
                .unwrap_or(defaults.sidebar_collapsible),
            sidebar_collapsed: raw.sidebar_collapsed.unwrap_or(defaults.sidebar_collapsed),
            home_page_id: raw.home_page_id.filter(|id| !id.is_empty()),
            show_last_update_time: raw
                .show_last_update_time
                .unwrap_or(defaults.show_last_update_time),
            include_current_version: raw
                .include_current_version
                .unwrap_or(defaults.include_current_version),
            last_version: raw.last_version,
            versions: raw.versions,
        };
        self.site_dir = config_dir.to_path_buf();

        Ok(())
    }
}
