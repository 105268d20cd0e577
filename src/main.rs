//! dirsort — copy a directory tree into per-extension folders.
//!
//! Thin binary entry point. All logic lives in the `dirsort-core` crate.

use anyhow::Context;
use clap::{ArgAction, Parser};
use dirsort_core::report::summary::render_summary;
use dirsort_core::{ConfigError, OrganizeConfig, Organizer};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

const USAGE: &str = "Usage: dirsort <SOURCE> [DESTINATION]\nExample: dirsort ./input ./dist";

#[derive(Debug, Parser)]
#[command(
    name = "dirsort",
    version,
    about = "Copy every file under SOURCE into DESTINATION/<extension>/"
)]
struct Cli {
    /// Directory to read files from.
    source: Option<PathBuf>,

    /// Directory that receives the per-extension folders [default: dist]
    destination: Option<PathBuf>,

    /// Write the run report as JSON to this path.
    #[arg(long, value_name = "PATH")]
    report: Option<PathBuf>,

    /// Write a CSV manifest of copied files to this path.
    #[arg(long, value_name = "PATH")]
    manifest: Option<PathBuf>,

    /// More log output (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Only log errors and skip the summary.
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            println!("{err:#}");
            if matches!(
                err.downcast_ref::<ConfigError>(),
                Some(ConfigError::MissingSource)
            ) {
                println!("{USAGE}");
            }
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => tracing::Level::ERROR,
        (false, 0) => tracing::Level::INFO,
        (false, 1) => tracing::Level::DEBUG,
        (false, _) => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_ansi(std::io::stdout().is_terminal())
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = OrganizeConfig::resolve(cli.source, cli.destination)?;
    let report = Organizer::new(config)?.run();

    if !cli.quiet {
        print!("{}", render_summary(&report));
    }

    if let Some(path) = &cli.report {
        report
            .write_json(path)
            .with_context(|| format!("Could not save report to {}", path.display()))?;
    }
    if let Some(path) = &cli.manifest {
        report
            .write_manifest(path)
            .with_context(|| format!("Could not save manifest to {}", path.display()))?;
    }

    Ok(())
}
