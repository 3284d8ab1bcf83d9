//! Build error types.

use std::path::{Path, PathBuf};

use gocden_renderer::FrontmatterError;

/// Error rendering a page through the template.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The page template is not bundled.
    #[error("page template not found")]
    MissingTemplate,
    /// Template compilation or evaluation failed.
    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),
    /// Writing the page failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error confined to a single source file.
///
/// A build records these and keeps going with the remaining files.
#[derive(Debug, thiserror::Error)]
pub enum FileError {
    #[error("could not read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{}: {source}", path.display())]
    Frontmatter {
        path: PathBuf,
        #[source]
        source: FrontmatterError,
    },
    #[error("{} is not inside the source directory", path.display())]
    OutsideSource { path: PathBuf },
    #[error("{}: output path {explicit:?} leaves the output directory", path.display())]
    InvalidPath { path: PathBuf, explicit: String },
    #[error("{}: route {route} is already taken by another page", path.display())]
    DuplicateRoute { path: PathBuf, route: String },
    #[error("could not copy {}: {source}", path.display())]
    Copy {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not render {}: {source}", path.display())]
    Render {
        /// Output path of the page.
        path: PathBuf,
        #[source]
        source: RenderError,
    },
}

impl FileError {
    /// Path of the file the error concerns.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Read { path, .. }
            | Self::Frontmatter { path, .. }
            | Self::OutsideSource { path }
            | Self::InvalidPath { path, .. }
            | Self::DuplicateRoute { path, .. }
            | Self::Copy { path, .. }
            | Self::Render { path, .. } => path,
        }
    }
}

/// Error aborting or failing a build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// The source directory does not exist.
    #[error("source directory {} does not exist", .0.display())]
    MissingSource(PathBuf),
    /// The source tree could not be walked.
    #[error("could not walk the source directory: {0}")]
    Walk(#[source] ignore::Error),
    /// Preparing the output directory failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The output directory contains the source directory, so cleaning it
    /// would delete the sources.
    #[error("output directory {} must not contain the source directory", .0.display())]
    UnsafeOutput(PathBuf),
    /// The build finished but some files failed.
    #[error("{} file(s) failed to build", .0.len())]
    Incomplete(Vec<FileError>),
}

impl BuildError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}
