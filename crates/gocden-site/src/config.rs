//! Resolved build settings.

use std::path::{Path, PathBuf};

use gocden_config::{Config, SocialConfig};
use serde::Serialize;

/// Site-wide values shared by every rendered page.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SiteMetadata {
    pub name: String,
    pub description: String,
    /// Public URL without a trailing slash. Empty when not configured.
    pub url: String,
    /// Path component of `url`, prefixed to every link.
    pub base_path: String,
    pub social: SocialConfig,
}

/// Settings of a [`Site`](crate::Site), with directories resolved against the
/// working directory.
#[derive(Clone, Debug)]
pub struct SiteConfig {
    pub source_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Strip `NN-` ordering prefixes from page output paths.
    pub ordering: bool,
    pub metadata: SiteMetadata,
}

impl SiteConfig {
    /// Resolve a loaded configuration against `cwd`.
    #[must_use]
    pub fn from_config(config: &Config, cwd: &Path) -> Self {
        Self {
            source_dir: config.source_dir(cwd),
            output_dir: config.output_dir(cwd),
            ordering: config.options.ordering,
            metadata: SiteMetadata {
                name: config.name.clone(),
                description: config.description.clone(),
                url: config.site_url().to_owned(),
                base_path: config.base_path(),
                social: config.social.clone(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_from_config() {
        let cwd = Path::new("/projects/handbook");
        let mut config = Config::default_for(cwd);
        config.url = "https://example.com/handbook/".to_owned();
        config.options.ordering = false;

        let site = SiteConfig::from_config(&config, cwd);

        assert_eq!(site.source_dir, PathBuf::from("/projects/handbook/docs"));
        assert_eq!(site.output_dir, PathBuf::from("/projects/handbook/dist"));
        assert!(!site.ordering);
        assert_eq!(site.metadata.name, "handbook");
        assert_eq!(site.metadata.url, "https://example.com/handbook");
        assert_eq!(site.metadata.base_path, "/handbook");
    }
}
