//! Source tree scanning and parallel page rendering.

use std::collections::HashSet;
use std::fmt;
use std::path::{Path, PathBuf};

use gocden_renderer::MarkdownRenderer;
use ignore::WalkBuilder;
use rayon::prelude::*;

use crate::config::SiteConfig;
use crate::doc_file::DocFile;
use crate::error::{BuildError, FileError, RenderError};
use crate::navigation::Navigation;
use crate::paths;
use crate::template::{PageContext, PageTemplate};

/// Stage of a full build, reported in logs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum BuildPhase {
    Idle,
    Scanning,
    Rendering,
    Done,
    Failed,
}

impl fmt::Display for BuildPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Scanning => "scanning",
            Self::Rendering => "rendering",
            Self::Done => "done",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

impl BuildPhase {
    /// Move to `next`, logging the transition.
    pub(crate) fn advance(&mut self, next: Self) {
        tracing::info!(from = %self, to = %next, "Build phase changed");
        *self = next;
    }
}

/// Everything discovered while walking the source tree.
#[derive(Debug, Default)]
pub(crate) struct ScanResult {
    pub files: Vec<DocFile>,
    pub navigation: Navigation,
    pub assets: usize,
    pub errors: Vec<FileError>,
}

/// Walk the source tree in file-name order.
///
/// Markdown files become [`DocFile`]s and navigation entries; every other
/// file is copied verbatim. Per-file failures are collected in
/// [`ScanResult::errors`]. A page whose output path was already claimed by
/// an earlier file is rejected. The output directory is skipped when it lies
/// inside the source tree.
pub(crate) fn scan(
    config: &SiteConfig,
    markdown: &MarkdownRenderer,
) -> Result<ScanResult, BuildError> {
    if !config.source_dir.is_dir() {
        return Err(BuildError::MissingSource(config.source_dir.clone()));
    }

    let output_dir = config.output_dir.clone();
    let mut walker = WalkBuilder::new(&config.source_dir);
    walker
        .standard_filters(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .filter_entry(move |entry| !entry.path().starts_with(&output_dir));

    let mut result = ScanResult::default();
    let mut claimed = HashSet::new();

    for entry in walker.build() {
        let entry = entry.map_err(BuildError::Walk)?;
        if entry.file_type().is_none_or(|t| t.is_dir()) {
            continue;
        }

        let path = entry.path();
        if paths::is_markdown(path) {
            match DocFile::load(config, markdown, path) {
                Ok(file) if !claimed.insert(file.output_path.clone()) => {
                    let e = FileError::DuplicateRoute {
                        path: path.to_path_buf(),
                        route: file.route,
                    };
                    tracing::warn!(error = %e, "Skipping page");
                    result.errors.push(e);
                }
                Ok(file) => {
                    tracing::debug!(source = %path.display(), route = %file.route, "Loaded page");
                    result
                        .navigation
                        .add_page(file.section(), file.title(), &file.route);
                    result.files.push(file);
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping page");
                    result.errors.push(e);
                }
            }
        } else {
            match copy_asset(config, path) {
                Ok(_) => result.assets += 1,
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping asset");
                    result.errors.push(e);
                }
            }
        }
    }

    Ok(result)
}

/// Copy a static source file to the same relative path under the output
/// directory.
pub(crate) fn copy_asset(config: &SiteConfig, source_path: &Path) -> Result<PathBuf, FileError> {
    let relative =
        source_path
            .strip_prefix(&config.source_dir)
            .map_err(|_| FileError::OutsideSource {
                path: source_path.to_path_buf(),
            })?;
    let dest = paths::asset_path(&config.output_dir, relative);

    let copy_error = |source| FileError::Copy {
        path: source_path.to_path_buf(),
        source,
    };
    if let Some(parent) = dest.parent() {
        std::fs::create_dir_all(parent).map_err(copy_error)?;
    }
    std::fs::copy(source_path, &dest).map_err(copy_error)?;

    tracing::debug!(source = %source_path.display(), dest = %dest.display(), "Copied asset");
    Ok(dest)
}

/// Previous and next files of `files[index]`.
///
/// The first file is its own previous and the last file its own next.
pub(crate) fn neighbours(files: &[DocFile], index: usize) -> (&DocFile, &DocFile) {
    let current = &files[index];
    let prev = index
        .checked_sub(1)
        .and_then(|i| files.get(i))
        .unwrap_or(current);
    let next = files.get(index + 1).unwrap_or(current);
    (prev, next)
}

/// Render every file in parallel, returning the failures.
pub(crate) fn render_all(
    config: &SiteConfig,
    template: &PageTemplate,
    files: &[DocFile],
    navigation: &Navigation,
) -> Vec<FileError> {
    files
        .par_iter()
        .enumerate()
        .filter_map(|(index, file)| {
            let (prev, next) = neighbours(files, index);
            render_page(config, template, navigation, file, prev, next).err()
        })
        .collect()
}

/// Render one page and write it to its output path.
pub(crate) fn render_page(
    config: &SiteConfig,
    template: &PageTemplate,
    navigation: &Navigation,
    file: &DocFile,
    prev: &DocFile,
    next: &DocFile,
) -> Result<(), FileError> {
    let context = PageContext::new(&config.metadata, navigation, file, prev, next);

    template
        .render(&context)
        .and_then(|html| write_page(&file.output_path, &html))
        .map_err(|source| {
            tracing::warn!(dest = %file.output_path.display(), error = %source, "Render failed");
            FileError::Render {
                path: file.output_path.clone(),
                source,
            }
        })?;

    tracing::debug!(route = %file.route, "Rendered page");
    Ok(())
}

fn write_page(path: &Path, html: &str) -> Result<(), RenderError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)?;
    Ok(())
}
