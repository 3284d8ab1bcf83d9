//! HTML page template.
//!
//! Pages are rendered by a `minijinja` environment holding a single template,
//! either the bundled `page.html` or a caller-provided source. Values are
//! HTML-escaped; the rendered markdown fragment is inserted with `|safe`.

use std::time::SystemTime;

use chrono::{DateTime, Local};
use minijinja::Environment;
use serde::Serialize;

use crate::config::SiteMetadata;
use crate::doc_file::DocFile;
use crate::error::RenderError;
use crate::navigation::Navigation;

const TEMPLATE_NAME: &str = "page.html";

/// Compiled page template.
pub struct PageTemplate {
    env: Environment<'static>,
}

impl PageTemplate {
    /// Load the bundled page template.
    ///
    /// # Errors
    ///
    /// Returns an error if the template is missing or does not compile.
    pub fn new() -> Result<Self, RenderError> {
        let source = gocden_assets::page_template().ok_or(RenderError::MissingTemplate)?;
        Self::from_source(source)
    }

    /// Compile a custom template source.
    ///
    /// # Errors
    ///
    /// Returns `RenderError::Template` if the source has syntax errors.
    pub fn from_source(source: String) -> Result<Self, RenderError> {
        let mut env = Environment::new();
        env.add_template_owned(TEMPLATE_NAME, source)?;
        Ok(Self { env })
    }

    /// Render a full HTML document.
    ///
    /// # Errors
    ///
    /// Returns `RenderError::Template` if evaluation fails.
    pub fn render(&self, context: &PageContext<'_>) -> Result<String, RenderError> {
        let template = self.env.get_template(TEMPLATE_NAME)?;
        Ok(template.render(context)?)
    }
}

/// Link to a neighbouring page.
#[derive(Debug, Serialize)]
pub struct PageLink<'a> {
    pub title: &'a str,
    pub href: &'a str,
}

impl<'a> From<&'a DocFile> for PageLink<'a> {
    fn from(file: &'a DocFile) -> Self {
        Self {
            title: file.title(),
            href: &file.route,
        }
    }
}

#[derive(Debug, Serialize)]
struct PageInfo<'a> {
    title: &'a str,
    description: &'a str,
    route: &'a str,
    canonical_url: String,
    updated_at: String,
    updated_iso: String,
}

/// Values available to the page template.
#[derive(Debug, Serialize)]
pub struct PageContext<'a> {
    site: &'a SiteMetadata,
    page: PageInfo<'a>,
    navigation: &'a Navigation,
    prev: PageLink<'a>,
    next: PageLink<'a>,
    content: &'a str,
}

impl<'a> PageContext<'a> {
    /// Build the context for `file`.
    ///
    /// The page description falls back to the site description.
    #[must_use]
    pub fn new(
        site: &'a SiteMetadata,
        navigation: &'a Navigation,
        file: &'a DocFile,
        prev: &'a DocFile,
        next: &'a DocFile,
    ) -> Self {
        let description = file
            .frontmatter
            .description
            .as_deref()
            .filter(|d| !d.is_empty())
            .unwrap_or(&site.description);

        let canonical_url = if site.url.is_empty() {
            String::new()
        } else {
            format!("{}{}", site.url, file.route)
        };

        let (updated_at, updated_iso) = format_dates(file.modified_time);

        Self {
            site,
            page: PageInfo {
                title: file.title(),
                description,
                route: &file.route,
                canonical_url,
                updated_at,
                updated_iso,
            },
            navigation,
            prev: prev.into(),
            next: next.into(),
            content: &file.rendered_html,
        }
    }
}

/// Long-form and ISO renderings of a modification time, in local time.
fn format_dates(time: SystemTime) -> (String, String) {
    let local: DateTime<Local> = time.into();
    (
        local.format("%A, %-d %B %Y").to_string(),
        local.format("%Y-%m-%d").to_string(),
    )
}
