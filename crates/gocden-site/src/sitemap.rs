//! `sitemap.xml` generation.

use std::fmt::Write;

use chrono::NaiveDate;
use quick_xml::escape::escape;

use crate::navigation::Navigation;

const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// One `<url>` entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SitemapEntry {
    pub loc: String,
    pub lastmod: NaiveDate,
}

/// Sitemap listing every navigable page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Sitemap {
    entries: Vec<SitemapEntry>,
}

impl Sitemap {
    /// One entry per navigation page, in section order.
    ///
    /// `site_url` is prefixed to each page route as is.
    #[must_use]
    pub fn from_navigation(site_url: &str, navigation: &Navigation, lastmod: NaiveDate) -> Self {
        let entries = navigation
            .pages()
            .map(|page| SitemapEntry {
                loc: format!("{site_url}{}", page.href),
                lastmod,
            })
            .collect();
        Self { entries }
    }

    #[must_use]
    pub fn entries(&self) -> &[SitemapEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serialize to XML.
    #[must_use]
    pub fn to_xml(&self) -> String {
        let mut xml = String::with_capacity(128 + self.entries.len() * 96);
        xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        let _ = writeln!(xml, "<urlset xmlns=\"{SITEMAP_NS}\">");
        for entry in &self.entries {
            let _ = writeln!(
                xml,
                "  <url><loc>{}</loc><lastmod>{}</lastmod></url>",
                escape(entry.loc.as_str()),
                entry.lastmod.format("%Y-%m-%d"),
            );
        }
        xml.push_str("</urlset>\n");
        xml
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
    }

    #[test]
    fn test_from_navigation_lists_every_page() {
        let mut nav = Navigation::new();
        nav.add_page("Guides", "A", "/a.html");
        nav.add_page("", "B", "/b.html");

        let sitemap = Sitemap::from_navigation("https://example.com", &nav, date());

        let locs: Vec<_> = sitemap.entries().iter().map(|e| e.loc.as_str()).collect();
        assert_eq!(
            locs,
            vec!["https://example.com/b.html", "https://example.com/a.html"]
        );
    }

    #[test]
    fn test_to_xml() {
        let mut nav = Navigation::new();
        nav.add_page("", "A", "/a.html");

        let xml = Sitemap::from_navigation("https://example.com", &nav, date()).to_xml();

        assert_eq!(
            xml,
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n\
             \x20 <url><loc>https://example.com/a.html</loc><lastmod>2024-03-09</lastmod></url>\n\
             </urlset>\n"
        );
    }

    #[test]
    fn test_to_xml_escapes_locations() {
        let mut nav = Navigation::new();
        nav.add_page("", "Q", "/q&a.html");

        let xml = Sitemap::from_navigation("", &nav, date()).to_xml();

        assert!(xml.contains("<loc>/q&amp;a.html</loc>"));
    }

    #[test]
    fn test_empty_navigation() {
        let sitemap = Sitemap::from_navigation("", &Navigation::new(), date());
        assert!(sitemap.is_empty());
        assert!(sitemap.to_xml().contains("<urlset"));
    }
}
