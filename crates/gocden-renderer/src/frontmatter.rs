//! YAML frontmatter extraction.
//!
//! The block must open the document with a `---` line and is closed by the
//! next `---` (or `...`) line. Everything after the closing line is the
//! markdown body.

use serde::{Deserialize, Serialize};

/// Page metadata declared in a document's frontmatter block.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Frontmatter {
    /// Page title. Required.
    pub title: String,
    /// Page description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Explicit output path, relative to the output directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Navigation section. Empty means the ungrouped section.
    pub section: String,
}

impl Frontmatter {
    /// Check required fields.
    ///
    /// # Errors
    ///
    /// Returns `FrontmatterError::Validation` when the title is empty.
    pub fn validate(&self) -> Result<(), FrontmatterError> {
        if self.title.trim().is_empty() {
            return Err(FrontmatterError::Validation(
                "title is required".to_owned(),
            ));
        }
        Ok(())
    }

    /// Explicit output path, if one was declared and is non-empty.
    #[must_use]
    pub fn explicit_path(&self) -> Option<&str> {
        self.path.as_deref().map(str::trim).filter(|p| !p.is_empty())
    }
}

/// Error extracting or validating frontmatter.
#[derive(Debug, thiserror::Error)]
pub enum FrontmatterError {
    /// The document does not start with a frontmatter block.
    #[error("missing frontmatter block")]
    Missing,
    /// The block is not valid YAML for [`Frontmatter`].
    #[error("could not parse frontmatter: {0}")]
    Parse(#[from] serde_yaml::Error),
    /// The block parsed but a required field is absent.
    #[error("invalid frontmatter: {0}")]
    Validation(String),
}

impl FrontmatterError {
    /// Whether this is a validation failure rather than a parse failure.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

/// Split a document into its raw frontmatter block and body.
///
/// Returns `None` if the document has no frontmatter block.
#[must_use]
pub fn split(content: &str) -> Option<(&str, &str)> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let content = content.trim_start_matches(['\n', '\r']);

    let rest = content.strip_prefix("---")?;
    let rest = rest
        .strip_prefix("\r\n")
        .or_else(|| rest.strip_prefix('\n'))?;

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        let trimmed = line.trim_end_matches(['\n', '\r']);
        if trimmed == "---" || trimmed == "..." {
            return Some((&rest[..offset], &rest[offset + line.len()..]));
        }
        offset += line.len();
    }

    None
}

/// Extract frontmatter and body without validating required fields.
///
/// An empty block yields a default [`Frontmatter`].
pub fn extract(content: &str) -> Result<(Frontmatter, &str), FrontmatterError> {
    let (block, body) = split(content).ok_or(FrontmatterError::Missing)?;

    let matter = if block.trim().is_empty() {
        Frontmatter::default()
    } else {
        serde_yaml::from_str(block)?
    };

    Ok((matter, body))
}

/// Extract and validate frontmatter.
pub fn parse(content: &str) -> Result<(Frontmatter, &str), FrontmatterError> {
    let (matter, body) = extract(content)?;
    matter.validate()?;
    Ok((matter, body))
}
