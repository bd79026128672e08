//! Configuration management for weave.
//!
//! Parses `weave.toml` with serde and discovers the file in the current
//! directory or any parent. Every section is optional; the defaults describe
//! a project with `docs/`, `site/` and `theme/` next to the config file.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String values support `${VAR}` and `${VAR:-default}`:
//!
//! - `site.name`, `site.docs_dir`, `site.site_dir`, `site.theme_dir`
//! - `directives.import_root`, `directives.code_root`, `directives.code_language`

mod expand;

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "weave.toml";

/// Default number of expansion passes before giving up on a document.
pub const DEFAULT_MAX_PASSES: usize = 32;

/// CLI settings that override configuration file values.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override markdown source directory.
    pub docs_dir: Option<PathBuf>,
    /// Override output directory.
    pub site_dir: Option<PathBuf>,
}

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    site: SiteConfigRaw,
    directives: DirectivesConfigRaw,
    /// Pages rendered from theme templates after the documents.
    pub pages: Vec<ExtraPage>,

    /// Resolved site configuration (set after loading).
    #[serde(skip)]
    pub site_resolved: SiteConfig,
    /// Resolved directive configuration (set after loading).
    #[serde(skip)]
    pub directives_resolved: DirectivesConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct SiteConfigRaw {
    name: Option<String>,
    docs_dir: Option<String>,
    site_dir: Option<String>,
    theme_dir: Option<String>,
}

/// Resolved site layout with absolute paths.
#[derive(Debug, Default)]
pub struct SiteConfig {
    /// Site name exposed to templates.
    pub name: String,
    /// Markdown source directory.
    pub docs_dir: PathBuf,
    /// Output directory.
    pub site_dir: PathBuf,
    /// Template directory.
    pub theme_dir: PathBuf,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DirectivesConfigRaw {
    import_root: Option<String>,
    code_root: Option<String>,
    code_language: Option<String>,
    fetch_timeout_secs: Option<u64>,
    max_passes: Option<usize>,
}

/// Resolved directive expansion settings.
#[derive(Debug)]
pub struct DirectivesConfig {
    /// Base directory for relative `.import` paths.
    pub import_root: PathBuf,
    /// Base directory for relative `.code` and `.doc` paths.
    pub code_root: PathBuf,
    /// Fence tag for `.code` blocks. Inferred from the file extension when
    /// unset, falling back to `go`.
    pub code_language: Option<String>,
    /// Global timeout for remote fetches. `None` waits indefinitely.
    pub fetch_timeout: Option<Duration>,
    /// Expansion passes allowed per document.
    pub max_passes: usize,
}

impl Default for DirectivesConfig {
    fn default() -> Self {
        Self {
            import_root: PathBuf::from("."),
            code_root: PathBuf::from(".."),
            code_language: None,
            fetch_timeout: None,
            max_passes: DEFAULT_MAX_PASSES,
        }
    }
}

/// A page rendered from a theme template to a fixed output path.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExtraPage {
    /// Template name inside the theme directory.
    pub template: String,
    /// Output path relative to the site directory.
    pub output: String,
    /// Value of the `page` template variable.
    pub page: String,
}

impl ExtraPage {
    fn new(template: &str, output: &str, page: &str) -> Self {
        Self {
            template: template.to_owned(),
            output: output.to_owned(),
            page: page.to_owned(),
        }
    }
}

/// Home and community pages rendered when `[[pages]]` is absent.
#[must_use]
pub fn default_pages() -> Vec<ExtraPage> {
    vec![
        ExtraPage::new("home.html", "index.html", "home"),
        ExtraPage::new("community.html", "community.html", "community"),
    ]
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
        /// Config field path (e.g., "`site.docs_dir`").
        field: String,
        /// Error message (e.g., "${`DOCS_ROOT`} not set").
        message: String,
    },
}

fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `weave.toml` in the current directory and parents,
    /// falling back to defaults relative to the current directory.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, or if parsing,
    /// expansion or validation fails.
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
        }

        Ok(config)
    }

    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(docs_dir) = &settings.docs_dir {
            self.site_resolved.docs_dir.clone_from(docs_dir);
        }
        if let Some(site_dir) = &settings.site_dir {
            self.site_resolved.site_dir.clone_from(site_dir);
        }
    }

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

    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    fn default_with_base(base: &Path) -> Self {
        let mut config = Self {
            site: SiteConfigRaw::default(),
            directives: DirectivesConfigRaw::default(),
            pages: default_pages(),
            site_resolved: SiteConfig::default(),
            directives_resolved: DirectivesConfig::default(),
            config_path: None,
        };
        config.resolve_paths(base);
        config
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;
        config.validate()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_directives()?;
        self.validate_pages()?;
        Ok(())
    }

    fn validate_directives(&self) -> Result<(), ConfigError> {
        if self.directives.max_passes == Some(0) {
            return Err(ConfigError::Validation(
                "directives.max_passes must be greater than 0".to_owned(),
            ));
        }
        if self.directives.fetch_timeout_secs == Some(0) {
            return Err(ConfigError::Validation(
                "directives.fetch_timeout_secs must be greater than 0".to_owned(),
            ));
        }
        if let Some(language) = &self.directives.code_language {
            require_non_empty(language, "directives.code_language")?;
        }
        Ok(())
    }

    fn validate_pages(&self) -> Result<(), ConfigError> {
        for page in &self.pages {
            require_non_empty(&page.template, "pages.template")?;
            require_non_empty(&page.output, "pages.output")?;
            if Path::new(&page.output).is_absolute() {
                return Err(ConfigError::Validation(format!(
                    "pages.output must be relative to the site directory: {}",
                    page.output
                )));
            }
        }
        Ok(())
    }

    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        expand::expand_opt(&mut self.site.name, "site.name")?;
        expand::expand_opt(&mut self.site.docs_dir, "site.docs_dir")?;
        expand::expand_opt(&mut self.site.site_dir, "site.site_dir")?;
        expand::expand_opt(&mut self.site.theme_dir, "site.theme_dir")?;
        expand::expand_opt(&mut self.directives.import_root, "directives.import_root")?;
        expand::expand_opt(&mut self.directives.code_root, "directives.code_root")?;
        expand::expand_opt(
            &mut self.directives.code_language,
            "directives.code_language",
        )?;
        Ok(())
    }

    /// Resolve relative paths against the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.site_resolved = SiteConfig {
            name: self
                .site
                .name
                .clone()
                .unwrap_or_else(|| "Documentation".to_owned()),
            docs_dir: resolve(self.site.docs_dir.as_deref(), "docs"),
            site_dir: resolve(self.site.site_dir.as_deref(), "site"),
            theme_dir: resolve(self.site.theme_dir.as_deref(), "theme"),
        };

        self.directives_resolved = DirectivesConfig {
            import_root: resolve(self.directives.import_root.as_deref(), "."),
            code_root: resolve(self.directives.code_root.as_deref(), ".."),
            code_language: self.directives.code_language.clone(),
            fetch_timeout: self.directives.fetch_timeout_secs.map(Duration::from_secs),
            max_passes: self.directives.max_passes.unwrap_or(DEFAULT_MAX_PASSES),
        };
    }
}
