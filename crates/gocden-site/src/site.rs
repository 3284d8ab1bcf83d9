//! Site state and build entry points.
//!
//! [`Site`] owns the current file list and navigation behind a single mutex.
//! A full build replaces the snapshot wholesale; a single-file rebuild
//! updates one record in place. Both hold the lock for their whole duration,
//! so readers never observe a half-updated snapshot.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use gocden_renderer::MarkdownRenderer;

use crate::builder::{self, BuildPhase};
use crate::config::SiteConfig;
use crate::doc_file::DocFile;
use crate::error::{BuildError, FileError, RenderError};
use crate::navigation::Navigation;
use crate::sitemap::Sitemap;
use crate::template::PageTemplate;

/// Sitemap file name in the output directory.
pub const SITEMAP_FILENAME: &str = "sitemap.xml";

/// Files and navigation of the last build.
#[derive(Clone, Debug, Default)]
pub struct SiteSnapshot {
    pub files: Vec<DocFile>,
    pub navigation: Navigation,
}

/// Summary of a full build.
#[derive(Debug)]
pub struct BuildReport {
    /// Pages rendered successfully.
    pub pages: usize,
    /// Static files copied from the source tree.
    pub assets: usize,
    /// Non-empty navigation sections.
    pub sections: usize,
    /// Per-file failures. The remaining files were built.
    pub errors: Vec<FileError>,
    pub sitemap: PathBuf,
}

impl BuildReport {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.errors.is_empty()
    }

    /// Convert a report with per-file failures into an error.
    ///
    /// # Errors
    ///
    /// Returns `BuildError::Incomplete` carrying every failure.
    pub fn into_result(self) -> Result<Self, BuildError> {
        if self.is_complete() {
            Ok(self)
        } else {
            Err(BuildError::Incomplete(self.errors))
        }
    }
}

/// Result of [`Site::rebuild_file`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RebuildOutcome {
    /// The page was re-rendered. Holds its route.
    Rebuilt(String),
    /// The change affects other pages; run [`Site::build`].
    NeedsFullBuild,
}

/// A documentation site bound to its source and output directories.
pub struct Site {
    config: SiteConfig,
    markdown: MarkdownRenderer,
    template: PageTemplate,
    state: Mutex<SiteSnapshot>,
}

impl Site {
    /// Create a site rendering with the bundled page template.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundled template fails to compile.
    pub fn new(config: SiteConfig) -> Result<Self, RenderError> {
        Ok(Self::with_template(config, PageTemplate::new()?))
    }

    /// Create a site rendering with a custom template.
    #[must_use]
    pub fn with_template(config: SiteConfig, template: PageTemplate) -> Self {
        Self {
            config,
            markdown: MarkdownRenderer::new(),
            template,
            state: Mutex::new(SiteSnapshot::default()),
        }
    }

    #[must_use]
    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Clone of the current files and navigation.
    #[must_use]
    pub fn snapshot(&self) -> SiteSnapshot {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, SiteSnapshot> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Clean the output directory and build every page.
    ///
    /// Per-file failures do not abort the build; they are returned in
    /// [`BuildReport::errors`].
    ///
    /// # Errors
    ///
    /// Returns an error if the output directory cannot be prepared or the
    /// source tree cannot be walked.
    pub fn build(&self) -> Result<BuildReport, BuildError> {
        let mut state = self.lock();
        let mut phase = BuildPhase::Idle;

        phase.advance(BuildPhase::Scanning);
        let scanned = self
            .prepare_output()
            .and_then(|bundled| {
                tracing::debug!(count = bundled, "Copied bundled assets");
                builder::scan(&self.config, &self.markdown)
            })
            .inspect_err(|_| phase.advance(BuildPhase::Failed))?;

        phase.advance(BuildPhase::Rendering);
        let mut errors = scanned.errors;
        let render_errors = builder::render_all(
            &self.config,
            &self.template,
            &scanned.files,
            &scanned.navigation,
        );
        let pages = scanned.files.len() - render_errors.len();
        errors.extend(render_errors);

        let sitemap = self
            .write_sitemap(&scanned.navigation)
            .inspect_err(|_| phase.advance(BuildPhase::Failed))?;

        let sections = scanned
            .navigation
            .sections()
            .iter()
            .filter(|s| !s.pages.is_empty())
            .count();

        *state = SiteSnapshot {
            files: scanned.files,
            navigation: scanned.navigation,
        };

        phase.advance(BuildPhase::Done);
        tracing::info!(
            pages,
            assets = scanned.assets,
            failed = errors.len(),
            "Build finished"
        );

        Ok(BuildReport {
            pages,
            assets: scanned.assets,
            sections,
            errors,
            sitemap,
        })
    }

    /// Re-render the page built from `path` without touching other pages.
    ///
    /// Returns [`RebuildOutcome::NeedsFullBuild`] when `path` is not a known
    /// page or its output path or section changed.
    ///
    /// # Errors
    ///
    /// Returns the file's error if it no longer parses or fails to render.
    /// The snapshot is left unchanged on parse failures.
    pub fn rebuild_file(&self, path: &Path) -> Result<RebuildOutcome, FileError> {
        let mut state = self.lock();

        let Some(index) = state
            .files
            .iter()
            .position(|f| same_file(&f.source_path, path))
        else {
            tracing::debug!(path = %path.display(), "Not a known page");
            return Ok(RebuildOutcome::NeedsFullBuild);
        };

        let current = &state.files[index];
        let updated = DocFile::load(&self.config, &self.markdown, &current.source_path)?;

        if updated.output_path != current.output_path || updated.section() != current.section()
        {
            tracing::debug!(route = %current.route, "Page moved, full build required");
            return Ok(RebuildOutcome::NeedsFullBuild);
        }

        let route = updated.route.clone();
        state.navigation.rename_page(&route, updated.title());
        state.files[index] = updated;

        let SiteSnapshot { files, navigation } = &*state;
        let (prev, next) = builder::neighbours(files, index);
        builder::render_page(
            &self.config,
            &self.template,
            navigation,
            &files[index],
            prev,
            next,
        )?;

        tracing::info!(route = %route, "Rebuilt page");
        Ok(RebuildOutcome::Rebuilt(route))
    }

    /// Copy one static source file into the output directory.
    ///
    /// # Errors
    ///
    /// Returns `FileError::Copy` if the copy fails.
    pub fn copy_asset(&self, path: &Path) -> Result<PathBuf, FileError> {
        let _state = self.lock();
        builder::copy_asset(&self.config, path)
    }

    /// Remove and recreate the output directory, then copy bundled assets.
    fn prepare_output(&self) -> Result<usize, BuildError> {
        let output_dir = &self.config.output_dir;
        if self.config.source_dir.starts_with(output_dir) {
            return Err(BuildError::UnsafeOutput(output_dir.clone()));
        }

        match std::fs::remove_dir_all(output_dir) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(BuildError::io(output_dir, e)),
        }
        std::fs::create_dir_all(output_dir).map_err(|e| BuildError::io(output_dir, e))?;

        gocden_assets::copy_to(output_dir).map_err(|e| BuildError::io(output_dir, e))
    }

    fn write_sitemap(&self, navigation: &Navigation) -> Result<PathBuf, BuildError> {
        let today = chrono::Local::now().date_naive();
        let sitemap = Sitemap::from_navigation(&self.config.metadata.url, navigation, today);
        let path = self.config.output_dir.join(SITEMAP_FILENAME);

        std::fs::write(&path, sitemap.to_xml()).map_err(|e| BuildError::io(&path, e))?;
        tracing::debug!(entries = sitemap.len(), "Wrote sitemap");
        Ok(path)
    }
}

/// Whether two paths name the same file, comparing canonical forms when the
/// paths differ lexically.
fn same_file(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteMetadata;
    use pretty_assertions::assert_eq;

    fn site_config(root: &Path) -> SiteConfig {
        SiteConfig {
            source_dir: root.join("docs"),
            output_dir: root.join("dist"),
            ordering: true,
            metadata: SiteMetadata {
                name: "Handbook".to_owned(),
                url: "https://example.com".to_owned(),
                ..SiteMetadata::default()
            },
        }
    }

    fn write(path: &Path, content: &str) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    fn read(path: &Path) -> String {
        std::fs::read_to_string(path).unwrap()
    }

    /// `docs/a.md` in section Guides and an ungrouped `docs/b.md`.
    fn two_page_site(root: &Path) -> Site {
        let config = site_config(root);
        write(
            &config.source_dir.join("a.md"),
            "---\ntitle: A\nsection: Guides\n---\nAlpha\n",
        );
        write(&config.source_dir.join("b.md"), "---\ntitle: B\n---\nBeta\n");
        Site::new(config).unwrap()
    }

    #[test]
    fn test_build_two_pages() {
        let temp_dir = tempfile::tempdir().unwrap();
        let site = two_page_site(temp_dir.path());

        let report = site.build().unwrap();

        let out = &site.config().output_dir;
        assert_eq!(report.pages, 2);
        assert_eq!(report.sections, 2);
        assert!(report.is_complete());
        assert!(read(&out.join("a.html")).contains("<p>Alpha</p>"));
        assert!(read(&out.join("b.html")).contains("<p>Beta</p>"));
        assert!(out.join("assets/gocden.css").exists());

        let snapshot = site.snapshot();
        let sections: Vec<_> = snapshot
            .navigation
            .sections()
            .iter()
            .map(|s| {
                let pages: Vec<_> = s
                    .pages
                    .iter()
                    .map(|p| (p.title.as_str(), p.href.as_str()))
                    .collect();
                (s.title.as_str(), pages)
            })
            .collect();
        assert_eq!(
            sections,
            vec![("", vec![("B", "/b.html")]), ("Guides", vec![("A", "/a.html")])]
        );

        let sitemap = read(&report.sitemap);
        assert_eq!(sitemap.matches("<url>").count(), 2);
        assert!(sitemap.contains("<loc>https://example.com/a.html</loc>"));
        assert!(sitemap.contains("<loc>https://example.com/b.html</loc>"));
    }

    #[test]
    fn test_build_excludes_invalid_page_and_builds_siblings() {
        let temp_dir = tempfile::tempdir().unwrap();
        let site = two_page_site(temp_dir.path());
        let source_dir = site.config().source_dir.clone();
        write(&source_dir.join("c.md"), "---\nsection: Guides\n---\nNo title\n");

        let report = site.build().unwrap();

        let out = &site.config().output_dir;
        assert_eq!(report.pages, 2);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].path(), source_dir.join("c.md").as_path());
        assert!(out.join("a.html").exists());
        assert!(out.join("b.html").exists());
        assert!(!out.join("c.html").exists());
        assert_eq!(read(&report.sitemap).matches("<url>").count(), 2);

        let err = report.into_result().unwrap_err();
        assert!(matches!(err, BuildError::Incomplete(ref errors) if errors.len() == 1));
    }

    #[test]
    fn test_build_keeps_explicit_path_inside_output_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let site = two_page_site(temp_dir.path());
        let source = site.config().source_dir.join("c.md");
        write(&source, "---\ntitle: C\npath: ../../escaped.html\n---\n");

        let report = site.build().unwrap();

        assert_eq!(report.pages, 2);
        assert!(matches!(report.errors[..], [FileError::InvalidPath { .. }]));
        assert!(!temp_dir.path().join("escaped.html").exists());
        assert!(!temp_dir.path().parent().unwrap().join("escaped.html").exists());
    }

    #[test]
    fn test_build_writes_one_page_per_route() {
        let temp_dir = tempfile::tempdir().unwrap();
        let site = two_page_site(temp_dir.path());
        let source = site.config().source_dir.join("01-a.md");
        write(&source, "---\ntitle: First\nsection: Guides\n---\nFirst\n");

        let report = site.build().unwrap();

        assert_eq!(report.pages, 2);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(
            report.errors[0].path(),
            site.config().source_dir.join("a.md").as_path()
        );
        assert!(read(&site.config().output_dir.join("a.html")).contains("<p>First</p>"));
        assert_eq!(read(&report.sitemap).matches("<url>").count(), 2);
    }

    #[test]
    fn test_build_removes_stale_output() {
        let temp_dir = tempfile::tempdir().unwrap();
        let site = two_page_site(temp_dir.path());
        let stale = site.config().output_dir.join("old.html");
        write(&stale, "stale");

        site.build().unwrap();

        assert!(!stale.exists());
    }

    #[test]
    fn test_build_copies_static_files() {
        let temp_dir = tempfile::tempdir().unwrap();
        let site = two_page_site(temp_dir.path());
        write(&site.config().source_dir.join("01-img/logo.png"), "png");

        let report = site.build().unwrap();

        assert_eq!(report.assets, 1);
        assert_eq!(
            read(&site.config().output_dir.join("01-img/logo.png")),
            "png"
        );
    }

    #[test]
    fn test_build_refuses_output_containing_source() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut config = site_config(temp_dir.path());
        config.output_dir = temp_dir.path().to_path_buf();
        write(&config.source_dir.join("a.md"), "---\ntitle: A\n---\n");
        let site = Site::new(config).unwrap();

        let err = site.build().unwrap_err();

        assert!(matches!(err, BuildError::UnsafeOutput(_)));
        assert!(site.config().source_dir.join("a.md").exists());
    }

    #[test]
    fn test_build_without_source_dir_fails() {
        let temp_dir = tempfile::tempdir().unwrap();
        let site = Site::new(site_config(temp_dir.path())).unwrap();

        let err = site.build().unwrap_err();

        assert!(matches!(err, BuildError::MissingSource(_)));
    }

    #[test]
    fn test_build_is_reproducible() {
        let temp_dir = tempfile::tempdir().unwrap();
        let site = two_page_site(temp_dir.path());

        site.build().unwrap();
        let first = site.snapshot().navigation;
        site.build().unwrap();

        assert_eq!(site.snapshot().navigation, first);
    }

    #[test]
    fn test_prev_next_links() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = site_config(temp_dir.path());
        write(&config.source_dir.join("only.md"), "---\ntitle: Only\n---\n");
        let template =
            PageTemplate::from_source("{{ prev.title }}|{{ next.title }}".to_owned()).unwrap();
        let site = Site::with_template(config, template);

        site.build().unwrap();

        assert_eq!(
            read(&site.config().output_dir.join("only.html")),
            "Only|Only"
        );
    }

    #[test]
    fn test_rebuild_file_touches_only_that_page() {
        let temp_dir = tempfile::tempdir().unwrap();
        let site = two_page_site(temp_dir.path());
        site.build().unwrap();
        let out = site.config().output_dir.clone();
        let b_before = read(&out.join("b.html"));
        let b_mtime = std::fs::metadata(out.join("b.html"))
            .unwrap()
            .modified()
            .unwrap();

        let source = site.config().source_dir.join("a.md");
        write(&source, "---\ntitle: A2\nsection: Guides\n---\nAlpha changed\n");
        let outcome = site.rebuild_file(&source).unwrap();

        assert_eq!(outcome, RebuildOutcome::Rebuilt("/a.html".to_owned()));
        let a_html = read(&out.join("a.html"));
        assert!(a_html.contains("Alpha changed"));
        assert!(a_html.contains("A2"));
        let snapshot = site.snapshot();
        assert_eq!(snapshot.navigation.sections()[1].title, "Guides");
        assert_eq!(snapshot.navigation.sections()[1].pages[0].title, "A2");
        assert_eq!(read(&out.join("b.html")), b_before);
        assert_eq!(
            std::fs::metadata(out.join("b.html"))
                .unwrap()
                .modified()
                .unwrap(),
            b_mtime
        );
    }

    #[test]
    fn test_rebuild_file_renames_navigation_entry() {
        let temp_dir = tempfile::tempdir().unwrap();
        let site = two_page_site(temp_dir.path());
        site.build().unwrap();

        let source = site.config().source_dir.join("a.md");
        write(&source, "---\ntitle: Renamed\nsection: Guides\n---\nAlpha\n");
        site.rebuild_file(&source).unwrap();

        let snapshot = site.snapshot();
        assert_eq!(snapshot.navigation.sections()[1].pages[0].title, "Renamed");
        assert_eq!(snapshot.files[0].title(), "Renamed");
    }

    #[test]
    fn test_rebuild_file_section_change_needs_full_build() {
        let temp_dir = tempfile::tempdir().unwrap();
        let site = two_page_site(temp_dir.path());
        site.build().unwrap();

        let source = site.config().source_dir.join("a.md");
        write(&source, "---\ntitle: A\nsection: Other\n---\nAlpha\n");

        assert_eq!(
            site.rebuild_file(&source).unwrap(),
            RebuildOutcome::NeedsFullBuild
        );
    }

    #[test]
    fn test_rebuild_file_path_change_needs_full_build() {
        let temp_dir = tempfile::tempdir().unwrap();
        let site = two_page_site(temp_dir.path());
        site.build().unwrap();

        let source = site.config().source_dir.join("b.md");
        write(&source, "---\ntitle: B\npath: moved.html\n---\nBeta\n");

        assert_eq!(
            site.rebuild_file(&source).unwrap(),
            RebuildOutcome::NeedsFullBuild
        );
    }

    #[test]
    fn test_rebuild_unknown_file_needs_full_build() {
        let temp_dir = tempfile::tempdir().unwrap();
        let site = two_page_site(temp_dir.path());
        site.build().unwrap();

        let source = site.config().source_dir.join("new.md");
        write(&source, "---\ntitle: New\n---\n");

        assert_eq!(
            site.rebuild_file(&source).unwrap(),
            RebuildOutcome::NeedsFullBuild
        );
    }

    #[test]
    fn test_rebuild_invalid_file_keeps_snapshot() {
        let temp_dir = tempfile::tempdir().unwrap();
        let site = two_page_site(temp_dir.path());
        site.build().unwrap();

        let source = site.config().source_dir.join("a.md");
        write(&source, "---\nsection: Guides\n---\n");
        let err = site.rebuild_file(&source).unwrap_err();

        assert!(matches!(err, FileError::Frontmatter { .. }));
        assert_eq!(site.snapshot().files[0].title(), "A");
    }

    #[test]
    fn test_copy_asset() {
        let temp_dir = tempfile::tempdir().unwrap();
        let site = two_page_site(temp_dir.path());
        site.build().unwrap();

        let source = site.config().source_dir.join("style.css");
        write(&source, "body {}");
        let dest = site.copy_asset(&source).unwrap();

        assert_eq!(dest, site.config().output_dir.join("style.css"));
        assert_eq!(read(&dest), "body {}");
    }
}
