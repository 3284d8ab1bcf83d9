//! `gocden dev` command implementation.

use std::path::Path;
use std::sync::Arc;

use gocden_config::Config;
use gocden_server::{ServerConfig, run_dev};
use gocden_site::{Site, SiteConfig};

use crate::commands::serve::print_address;
use crate::error::CliError;
use crate::output::Output;

/// Build, serve and rebuild on source changes.
pub(crate) async fn execute(config: &Config, cwd: &Path, output: &Output) -> Result<(), CliError> {
    let site = Arc::new(Site::new(SiteConfig::from_config(config, cwd))?);
    let server_config = ServerConfig::from_config(config, cwd);

    output.info(&format!(
        "Watching {}",
        site.config().source_dir.display()
    ));
    print_address(&server_config, output);

    run_dev(site, server_config).await?;
    Ok(())
}
