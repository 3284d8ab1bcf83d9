//! gocden CLI - simple static documentation generator.
//!
//! Provides commands for:
//! - `version`: Print the version
//! - `init`: Create the configuration file if it does not exist
//! - `build`: Build the site into the output directory
//! - `serve`: Serve the built site
//! - `dev`: Build, serve and rebuild on changes

mod commands;
mod error;
mod logging;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use gocden_config::Config;

use error::CliError;
use logging::Logging;
use output::Output;

/// Application version from Cargo.toml.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// gocden - generate simple documentation.
#[derive(Parser)]
#[command(name = "gocden", version, about)]
struct Cli {
    /// Also write logs to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Project directory (default: current directory).
    #[arg(long, global = true)]
    cwd: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, Subcommand)]
enum Commands {
    /// Print the version.
    Version,
    /// Create a configuration file if one does not exist.
    Init,
    /// Build the documentation.
    Build,
    /// Serve the built documentation.
    Serve,
    /// Start a development server and rebuild on changes.
    Dev,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let output = Output::new();
    let logging = Logging::init(cli.verbose);

    match run(cli, &output) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output.error(&format!("Error: {err}"));
            if let Some(path) = logging.log_path() {
                output.info(&format!("See the log file for details: {}", path.display()));
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli, output: &Output) -> Result<(), CliError> {
    if matches!(cli.command, Commands::Version) {
        output.print(&format!("gocden.{VERSION}"));
        return Ok(());
    }

    let cwd = match cli.cwd {
        Some(dir) => std::path::absolute(dir)?,
        None => std::env::current_dir()?,
    };
    let config = Config::load_or_create(&cwd)?;
    tracing::info!(cwd = %cwd.display(), command = ?cli.command, "Running command");

    match cli.command {
        Commands::Version => Ok(()),
        Commands::Init => commands::init::execute(&config, &cwd, output),
        Commands::Build => commands::build::execute(&config, &cwd, output),
        Commands::Serve => runtime()?.block_on(commands::serve::execute(&config, &cwd, output)),
        Commands::Dev => runtime()?.block_on(commands::dev::execute(&config, &cwd, output)),
    }
}

fn runtime() -> Result<tokio::runtime::Runtime, CliError> {
    Ok(tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?)
}
