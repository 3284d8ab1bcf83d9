//! `gocden init` command implementation.

use std::path::Path;

use gocden_config::{CONFIG_FILENAME, Config};

use crate::error::CliError;
use crate::output::Output;

/// Report the configuration and make sure the source directory exists.
///
/// The configuration itself has already been loaded or created.
pub(crate) fn execute(config: &Config, cwd: &Path, output: &Output) -> Result<(), CliError> {
    let source_dir = config.source_dir(cwd);
    std::fs::create_dir_all(&source_dir)?;

    output.success(&format!(
        "A configuration is ready in {}.",
        cwd.join(CONFIG_FILENAME).display()
    ));
    output.info("");
    output.info(&format!(
        "You are now ready to build your documentation! Get started by creating a markdown file in `./{}/`.",
        config.build.source.trim_end_matches('/')
    ));
    Ok(())
}
