//! `gocden build` command implementation.

use std::path::Path;
use std::time::Instant;

use gocden_config::Config;
use gocden_site::{BuildReport, Site, SiteConfig};

use crate::error::CliError;
use crate::output::Output;

/// Build the site, reporting every file that failed.
///
/// Fails if any file failed, after the rest of the site has been written.
pub(crate) fn execute(config: &Config, cwd: &Path, output: &Output) -> Result<(), CliError> {
    let site_config = SiteConfig::from_config(config, cwd);
    output.info(&format!("Source: {}", site_config.source_dir.display()));
    output.info(&format!("Output: {}", site_config.output_dir.display()));

    let site = Site::new(site_config)?;
    let start = Instant::now();
    let report = site.build()?;

    print_summary(&report, output);
    for error in &report.errors {
        output.warning(&format!("  {error}"));
    }

    let report = report.into_result()?;
    output.success(&format!(
        "Built {} page(s) in {:.2?} to {}",
        report.pages,
        start.elapsed(),
        site.config().output_dir.display()
    ));
    Ok(())
}

fn print_summary(report: &BuildReport, output: &Output) {
    output.highlight(&format!(
        "{} page(s) in {} section(s), {} static file(s)",
        report.pages, report.sections, report.assets
    ));
    output.info(&format!("Sitemap: {}", report.sitemap.display()));
    if !report.is_complete() {
        output.warning(&format!("{} file(s) failed:", report.errors.len()));
    }
}
