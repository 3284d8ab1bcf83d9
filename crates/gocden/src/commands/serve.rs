//! `gocden serve` command implementation.

use std::path::Path;

use gocden_config::Config;
use gocden_server::{ServerConfig, run_server};

use crate::error::CliError;
use crate::output::Output;

/// Serve the existing output directory.
pub(crate) async fn execute(config: &Config, cwd: &Path, output: &Output) -> Result<(), CliError> {
    let server_config = ServerConfig::from_config(config, cwd);

    if !server_config.output_dir.is_dir() {
        output.warning(&format!(
            "{} does not exist yet, run `gocden build` first",
            server_config.output_dir.display()
        ));
    }

    print_address(&server_config, output);
    run_server(server_config).await?;
    Ok(())
}

/// Print where the site is reachable.
pub(crate) fn print_address(config: &ServerConfig, output: &Output) {
    output.highlight(&format!(
        "Serving {} on http://localhost:{}{}/",
        config.output_dir.display(),
        config.port,
        config.base_path
    ));
    output.info("Press Ctrl-C to stop");
}
