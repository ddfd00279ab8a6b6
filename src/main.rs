//! bbndk - NDK installation discovery
//!
//! Command-line entry point: loads configuration, sets up logging and runs
//! one command against the manifest root.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use bbndk::commands::{DevicesCommand, ListCommand, ShowCommand};
use bbndk::core::config::LoggingConfig;
use bbndk::core::AppConfig;

#[derive(Parser)]
#[command(name = "bbndk", version, about = "Find installed BlackBerry Native SDKs")]
struct Cli {
    /// Folder holding installation manifests
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    /// Read configuration from this file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// List every installation, oldest first
    List,
    /// Show one installation (the preferred or latest by default)
    Show {
        /// Installation name or version
        selector: Option<String>,
    },
    /// List the devices and simulators an installation supports
    Devices {
        /// Installation name or version
        selector: Option<String>,
    },
}

/// Main entry point
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path)
            .await
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => AppConfig::load().await.context("failed to load config")?,
    };

    init_logging(&config.logging);
    debug!("bbndk v{} starting", bbndk::VERSION);

    let root = cli
        .root
        .clone()
        .or_else(|| config.config_root())
        .context("cannot determine the NDK configuration folder; pass --root")?;
    let preferred = config.registry.preferred.clone();

    let output = match cli.command.unwrap_or(Command::List) {
        Command::List => {
            ListCommand {
                root,
                preferred,
                json: cli.json,
            }
            .execute()
            .await?
        }
        Command::Show { selector } => {
            ShowCommand {
                root,
                selector,
                preferred,
                json: cli.json,
            }
            .execute()
            .await?
        }
        Command::Devices { selector } => {
            DevicesCommand {
                root,
                selector,
                preferred,
                json: cli.json,
            }
            .execute()
            .await?
        }
    };

    print!("{}", output);
    if cli.json {
        println!();
    }
    Ok(())
}

/// Initialize logging; `RUST_LOG` overrides the configured level
fn init_logging(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_file(logging.with_file)
        .with_line_number(logging.with_file)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}
