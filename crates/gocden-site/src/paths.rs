//! Output path and route computation.
//!
//! A markdown file is written either to the explicit path declared in its
//! frontmatter or to the mirror of its source path with an `.html` extension.
//! With ordering enabled, leading `NN-` prefixes are stripped from every
//! segment of the mirrored path, so `01-guide/02-setup.md` becomes
//! `guide/setup.html`.

use std::path::{Component, Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

static ORDERING_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:\d+-)+").expect("invalid ordering prefix regex"));

/// Strip leading `<digits>-` ordering prefixes from a path segment.
///
/// A segment that would become empty or hidden is returned unchanged.
#[must_use]
pub fn strip_ordering_prefix(segment: &str) -> &str {
    let Some(prefix) = ORDERING_PREFIX.find(segment) else {
        return segment;
    };

    let stripped = &segment[prefix.end()..];
    if stripped.is_empty() || stripped.starts_with('.') {
        segment
    } else {
        stripped
    }
}

/// Compute the output path of a markdown file.
///
/// `relative` is the file's path below the source directory.
#[must_use]
pub fn output_path(
    output_dir: &Path,
    relative: &Path,
    explicit: Option<&str>,
    ordering: bool,
) -> PathBuf {
    if let Some(explicit) = explicit {
        return output_dir.join(explicit.trim_start_matches('/'));
    }

    let mut path = output_dir.to_path_buf();
    for component in relative.with_extension("html").components() {
        if let Component::Normal(segment) = component {
            let segment = segment.to_string_lossy();
            if ordering {
                path.push(strip_ordering_prefix(&segment));
            } else {
                path.push(&*segment);
            }
        }
    }
    path
}

/// Whether an explicit frontmatter path stays inside the output directory.
///
/// Leading `/` characters are ignored. Any `..`, root or prefix component
/// rejects the path.
#[must_use]
pub fn is_contained(explicit: &str) -> bool {
    Path::new(explicit.trim_start_matches('/'))
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

/// Destination of a static file copied verbatim into the output directory.
#[must_use]
pub fn asset_path(output_dir: &Path, relative: &Path) -> PathBuf {
    output_dir.join(relative)
}

/// Public route of an output file: its path below `output_dir`, `/`-joined,
/// with a leading `/`.
#[must_use]
pub fn route_for(output_dir: &Path, output_path: &Path) -> String {
    let relative = output_path.strip_prefix(output_dir).unwrap_or(output_path);

    let segments: Vec<_> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy()),
            _ => None,
        })
        .collect();

    format!("/{}", segments.join("/"))
}

/// Whether a path is a markdown source file.
#[must_use]
pub fn is_markdown(path: &Path) -> bool {
    path.extension().is_some_and(|e| e.eq_ignore_ascii_case("md"))
}
