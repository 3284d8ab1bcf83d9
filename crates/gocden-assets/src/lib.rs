//! Bundled assets for gocden sites.
//!
//! The page template and the default stylesheet live under `bundle/` and are
//! embedded via `rust-embed`:
//!
//! - `templates/page.html`: the page template, read by the site renderer
//! - `assets/*`: static files copied into every generated site

use std::borrow::Cow;
use std::io;
use std::path::Path;

/// Embedded bundle.
#[derive(rust_embed::RustEmbed)]
#[folder = "bundle/"]
struct Bundle;

/// Path of the page template inside the bundle.
pub const PAGE_TEMPLATE: &str = "templates/page.html";

/// Prefix of bundle entries copied into the output directory.
const SITE_ASSETS_PREFIX: &str = "assets/";

/// Get a bundled file by path (relative to `bundle/`).
pub fn get(path: &str) -> Option<Cow<'static, [u8]>> {
    Bundle::get(path).map(|f| f.data)
}

/// Iterate all bundled file paths.
pub fn iter() -> impl Iterator<Item = Cow<'static, str>> {
    Bundle::iter()
}

/// The bundled page template source.
pub fn page_template() -> Option<String> {
    get(PAGE_TEMPLATE).map(|data| String::from_utf8_lossy(&data).into_owned())
}

/// Copy the bundled site assets into `out_dir/assets/`.
///
/// Returns the number of files written.
pub fn copy_to(out_dir: &Path) -> io::Result<usize> {
    let mut count = 0;

    for path in iter().filter(|p| p.starts_with(SITE_ASSETS_PREFIX)) {
        let Some(data) = get(&path) else {
            continue;
        };
        let dest = out_dir.join(&*path);
        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&dest, data)?;
        tracing::debug!(dest = %dest.display(), "Copied bundled asset");
        count += 1;
    }

    Ok(count)
}

/// Return the MIME type string for the given file path.
pub fn mime_for(path: &str) -> String {
    mime_guess::from_path(path)
        .first_or_octet_stream()
        .to_string()
}
