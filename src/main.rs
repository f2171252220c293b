mod config;
mod document;
mod docx;
mod error;
mod words;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use crate::config::{Config, ConfigOverrides};
use crate::error::CountError;
use crate::words::WordCount;

/// Exit status for failures that are not user mistakes: capability missing,
/// unreadable or corrupt input, bad configuration.
const FATAL_EXIT: u8 = 2;

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Count words in a .txt, .md, or .docx file"
)]
struct Cli {
    /// Path to input document
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Optional path to a configuration TOML file overriding defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Additional extensions to read as plain text for this run
    #[arg(long = "text-ext", value_delimiter = ',')]
    text_ext: Vec<String>,

    /// Enable verbose logging
    #[arg(long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = init_tracing(cli.verbose) {
        eprintln!("Error: {err:#}");
        return ExitCode::from(FATAL_EXIT);
    }

    match run(cli) {
        Ok(report) => {
            println!("{report}");
            ExitCode::SUCCESS
        }
        Err(err) => report_failure(&err),
    }
}

fn init_tracing(verbose: bool) -> Result<()> {
    let level = if verbose { LevelFilter::DEBUG } else { LevelFilter::WARN };
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|err| anyhow::anyhow!("Failed to set tracing subscriber: {err}"))
}

fn run(cli: Cli) -> Result<WordCount> {
    let overrides = ConfigOverrides {
        extra_text_extensions: if cli.text_ext.is_empty() {
            None
        } else {
            Some(cli.text_ext)
        },
    };
    let config = Config::load(cli.config, overrides).context("failed to load configuration")?;

    let text = document::extract(&cli.file, &config)?;
    let report = WordCount::new(&cli.file, &text);
    tracing::info!("counted {} words in {}", report.words, cli.file.display());

    Ok(report)
}

/// Misuse gets a one-line message and exit 1; anything else is reported with
/// its full cause chain.
fn report_failure(err: &anyhow::Error) -> ExitCode {
    match err.downcast_ref::<CountError>() {
        Some(count_err) if count_err.is_usage() => {
            match count_err {
                CountError::UnsupportedExtension { path, .. } => {
                    tracing::debug!("rejected {}", path.display());
                    eprintln!("{count_err}");
                }
                _ => eprintln!("Error: {count_err}"),
            }
            ExitCode::from(count_err.exit_code())
        }
        Some(count_err) => {
            eprintln!("Error: {err:#}");
            ExitCode::from(count_err.exit_code())
        }
        None => {
            eprintln!("Error: {err:#}");
            ExitCode::from(FATAL_EXIT)
        }
    }
}
