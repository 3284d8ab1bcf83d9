//! Frontmatter extraction and markdown rendering for gocden.
//!
//! A source document is a YAML frontmatter block followed by a markdown body:
//!
//! ```text
//! ---
//! title: Getting Started
//! section: Guides
//! ---
//!
//! # Getting Started
//! ```
//!
//! [`frontmatter::parse`] splits and validates the block, and
//! [`MarkdownRenderer`] turns the body into an HTML fragment.
//!
//! # Example
//!
//! ```
//! use gocden_renderer::{MarkdownRenderer, frontmatter};
//!
//! let source = "---\ntitle: Hello\n---\n**Bold** text";
//! let (matter, body) = frontmatter::parse(source).unwrap();
//! let html = MarkdownRenderer::new().render(body);
//!
//! assert_eq!(matter.title, "Hello");
//! assert!(html.contains("<strong>Bold</strong>"));
//! ```

pub mod frontmatter;
mod markdown;

pub use frontmatter::{Frontmatter, FrontmatterError};
pub use markdown::MarkdownRenderer;
