//! Filesystem event classification.

use std::path::Path;

use notify::event::ModifyKind;
use notify::{Event, EventKind};

use super::debouncer::Change;

/// Classify a raw watcher event.
///
/// Creations, removals and renames change the site structure. Content
/// modifications are per file. Access and metadata events are ignored, as
/// are paths inside `output_dir`.
pub(crate) fn classify(event: &Event, output_dir: &Path) -> Vec<Change> {
    let paths = event
        .paths
        .iter()
        .filter(|path| !path.starts_with(output_dir));

    match event.kind {
        EventKind::Create(_) | EventKind::Remove(_) | EventKind::Modify(ModifyKind::Name(_)) => {
            if paths.count() > 0 {
                vec![Change::Structure]
            } else {
                Vec::new()
            }
        }
        EventKind::Modify(ModifyKind::Metadata(_)) => Vec::new(),
        EventKind::Modify(_) => paths
            .filter(|path| !path.is_dir())
            .map(|path| {
                if gocden_site::paths::is_markdown(path) {
                    Change::Page(path.clone())
                } else {
                    Change::Asset(path.clone())
                }
            })
            .collect(),
        _ => Vec::new(),
    }
}
