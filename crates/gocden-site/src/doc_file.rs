//! Markdown source records.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use gocden_renderer::{Frontmatter, MarkdownRenderer, frontmatter};

use crate::config::SiteConfig;
use crate::error::FileError;
use crate::paths;

/// One markdown source mapped to its output page.
#[derive(Clone, Debug)]
pub struct DocFile {
    /// Public route, starting with `/`.
    pub route: String,
    pub output_path: PathBuf,
    pub source_path: PathBuf,
    pub frontmatter: Frontmatter,
    /// HTML fragment of the markdown body.
    pub rendered_html: String,
    pub modified_time: SystemTime,
}

impl DocFile {
    /// Read, parse and render a markdown source file.
    ///
    /// # Errors
    ///
    /// Returns a [`FileError`] when the file can't be read, lies outside the
    /// source directory or has missing or invalid frontmatter.
    pub fn load(
        config: &SiteConfig,
        markdown: &MarkdownRenderer,
        source_path: &Path,
    ) -> Result<Self, FileError> {
        let relative = source_path
            .strip_prefix(&config.source_dir)
            .map_err(|_| FileError::OutsideSource {
                path: source_path.to_path_buf(),
            })?;

        let read_error = |source| FileError::Read {
            path: source_path.to_path_buf(),
            source,
        };
        let content = std::fs::read_to_string(source_path).map_err(read_error)?;
        let modified_time = std::fs::metadata(source_path)
            .and_then(|m| m.modified())
            .map_err(read_error)?;

        let (matter, body) =
            frontmatter::parse(&content).map_err(|source| FileError::Frontmatter {
                path: source_path.to_path_buf(),
                source,
            })?;

        if let Some(explicit) = matter.explicit_path()
            && !paths::is_contained(explicit)
        {
            return Err(FileError::InvalidPath {
                path: source_path.to_path_buf(),
                explicit: explicit.to_owned(),
            });
        }

        let output_path = paths::output_path(
            &config.output_dir,
            relative,
            matter.explicit_path(),
            config.ordering,
        );
        let route = paths::route_for(&config.output_dir, &output_path);
        let rendered_html = markdown.render(body);

        Ok(Self {
            route,
            output_path,
            source_path: source_path.to_path_buf(),
            frontmatter: matter,
            rendered_html,
            modified_time,
        })
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.frontmatter.title
    }

    #[must_use]
    pub fn section(&self) -> &str {
        &self.frontmatter.section
    }
}
