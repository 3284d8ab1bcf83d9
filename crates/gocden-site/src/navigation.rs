//! Sectioned navigation menu.
//!
//! Pages are grouped into sections in first-seen order. The first section has
//! an empty title and collects pages that declare no section.

use serde::Serialize;

/// A navigation link to one page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavPage {
    pub title: String,
    /// Public route of the page, starting with `/`.
    pub href: String,
}

/// A named group of pages.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavSection {
    pub title: String,
    pub pages: Vec<NavPage>,
}

impl NavSection {
    fn new(title: &str) -> Self {
        Self {
            title: title.to_owned(),
            pages: Vec::new(),
        }
    }
}

/// Ordered list of navigation sections.
///
/// Section titles are unique. Serializes as a plain list of sections.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Navigation {
    sections: Vec<NavSection>,
}

impl Default for Navigation {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigation {
    /// Create a navigation holding only the ungrouped section.
    #[must_use]
    pub fn new() -> Self {
        Self {
            sections: vec![NavSection::new("")],
        }
    }

    /// Append a page to the section named `section`, creating the section at
    /// the end if it does not exist yet.
    pub fn add_page(&mut self, section: &str, title: &str, href: &str) {
        let page = NavPage {
            title: title.to_owned(),
            href: href.to_owned(),
        };

        match self.sections.iter_mut().find(|s| s.title == section) {
            Some(existing) => existing.pages.push(page),
            None => {
                let mut created = NavSection::new(section);
                created.pages.push(page);
                self.sections.push(created);
            }
        }
    }

    /// Rename the page linking to `href`.
    ///
    /// Returns `false` if no such page exists.
    pub fn rename_page(&mut self, href: &str, title: &str) -> bool {
        let page = self
            .sections
            .iter_mut()
            .flat_map(|s| s.pages.iter_mut())
            .find(|p| p.href == href);

        match page {
            Some(page) => {
                title.clone_into(&mut page.title);
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn sections(&self) -> &[NavSection] {
        &self.sections
    }

    /// Title of the section containing `href`.
    #[must_use]
    pub fn section_of(&self, href: &str) -> Option<&str> {
        self.sections
            .iter()
            .find(|s| s.pages.iter().any(|p| p.href == href))
            .map(|s| s.title.as_str())
    }

    /// All pages in section order.
    pub fn pages(&self) -> impl Iterator<Item = &NavPage> {
        self.sections.iter().flat_map(|s| s.pages.iter())
    }

    #[must_use]
    pub fn page_count(&self) -> usize {
        self.sections.iter().map(|s| s.pages.len()).sum()
    }
}
