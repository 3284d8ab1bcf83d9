//! Configuration management for gocden.
//!
//! Parses the `gocden.toml` file in the working directory with serde. When the
//! file does not exist, a default configuration is synthesized, written to
//! disk and then validated, so every command runs against a persisted config.
//!
//! Paths in the `[build]` section are relative to the working directory and
//! are resolved with [`Config::source_dir`] and [`Config::output_dir`].

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Configuration filename looked up in the working directory.
pub const CONFIG_FILENAME: &str = "gocden.toml";

/// Default port for `serve` and `dev`.
pub const DEFAULT_PORT: u16 = 7153;

/// Site configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Site name, shown in the page header.
    #[serde(default)]
    pub name: String,
    /// Site description, used when a page has none.
    #[serde(default)]
    pub description: String,
    /// Public site URL. Its path component becomes the serve base path.
    #[serde(default)]
    pub url: String,
    /// Social handles rendered in the page template.
    #[serde(default)]
    pub social: SocialConfig,
    /// Source and output directories.
    #[serde(default)]
    pub build: BuildConfig,
    /// Build options.
    #[serde(default)]
    pub options: OptionsConfig,
    /// Local server options.
    #[serde(default)]
    pub serve: ServeConfig,
}

/// Social handles.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialConfig {
    pub twitter: String,
    pub facebook: String,
    pub instagram: String,
    pub linkedin: String,
    pub github: String,
    pub gitlab: String,
    pub bitbucket: String,
}

/// Build directories, relative to the working directory.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Markdown source directory.
    #[serde(rename = "src")]
    pub source: String,
    /// Generated site directory.
    #[serde(rename = "out")]
    pub output: String,
}

/// Build options.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptionsConfig {
    /// Strip leading `NN-` ordering prefixes from generated paths.
    pub ordering: bool,
}

impl Default for OptionsConfig {
    fn default() -> Self {
        Self { ordering: true }
    }
}

/// Local server options.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServeConfig {
    /// Port to listen on.
    pub port: u16,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self { port: DEFAULT_PORT }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error reading or writing the config file.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// TOML parsing error.
    #[error("Your config is invalid: {0}")]
    Parse(#[from] toml::de::Error),
    /// TOML serialization error while writing the default config.
    #[error("Could not serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load `gocden.toml` from `cwd`, creating a default one if it is absent.
    ///
    /// The result is validated in both cases.
    pub fn load_or_create(cwd: &Path) -> Result<Self, ConfigError> {
        let path = cwd.join(CONFIG_FILENAME);

        let config = if path.exists() {
            Self::load_from_file(&path)?
        } else {
            let config = Self::default_for(cwd);
            config.write_to(&path)?;
            tracing::info!(path = %path.display(), "Created default configuration");
            config
        };

        config.validate()?;
        Ok(config)
    }

    /// Default configuration for a project rooted at `cwd`.
    #[must_use]
    pub fn default_for(cwd: &Path) -> Self {
        let name = cwd
            .file_name()
            .map_or_else(|| "docs".to_owned(), |n| n.to_string_lossy().into_owned());

        Self {
            name,
            description: "A new gocden site".to_owned(),
            url: String::new(),
            social: SocialConfig::default(),
            build: BuildConfig {
                source: "docs".to_owned(),
                output: "dist".to_owned(),
            },
            options: OptionsConfig::default(),
            serve: ServeConfig::default(),
        }
    }

    /// Load configuration from a specific file without validating it.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&content)?;
        tracing::info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Serialize and write the configuration to `path`.
    pub fn write_to(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.name, "name")?;
        require_non_empty(&self.build.source, "build.src")?;
        require_non_empty(&self.build.output, "build.out")?;

        if Path::new(self.build.source.trim_end_matches('/'))
            == Path::new(self.build.output.trim_end_matches('/'))
        {
            return Err(ConfigError::Validation(
                "build.out must differ from build.src".to_owned(),
            ));
        }

        if self.serve.port == 0 {
            return Err(ConfigError::Validation("serve.port cannot be 0".to_owned()));
        }

        if !self.url.is_empty() {
            let parsed = url::Url::parse(&self.url)
                .map_err(|e| ConfigError::Validation(format!("url is invalid: {e}")))?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(ConfigError::Validation(
                    "url must start with http:// or https://".to_owned(),
                ));
            }
        }

        Ok(())
    }

    /// Absolute source directory.
    #[must_use]
    pub fn source_dir(&self, cwd: &Path) -> PathBuf {
        cwd.join(&self.build.source)
    }

    /// Absolute output directory.
    #[must_use]
    pub fn output_dir(&self, cwd: &Path) -> PathBuf {
        cwd.join(&self.build.output)
    }

    /// Site URL without a trailing slash, ready to be prefixed to page routes.
    #[must_use]
    pub fn site_url(&self) -> &str {
        self.url.trim_end_matches('/')
    }

    /// Path component of the site URL without a trailing slash.
    ///
    /// Empty when no URL is configured or the URL has no path.
    #[must_use]
    pub fn base_path(&self) -> String {
        url::Url::parse(&self.url)
            .map(|u| u.path().trim_end_matches('/').to_owned())
            .unwrap_or_default()
    }
}
