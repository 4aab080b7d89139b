//! linksync CLI
//!
//! Command-line interface for linksync - keeps short links in line with a YAML file.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "linksync")]
#[command(about = "linksync - Declarative short link management")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Log debug details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use an alternate settings file
    #[arg(long, global = true, value_name = "PATH")]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Make the remote links match the links file
    Sync {
        /// Links file (defaults to the configured links_file)
        file: Option<PathBuf>,
        /// Show what would change without writing anything
        #[arg(long)]
        dry_run: bool,
        /// Maximum concurrent requests per phase
        #[arg(long, value_parser = clap::value_parser!(u16).range(1..))]
        concurrency: Option<u16>,
    },
    /// Show the changes a sync would make
    Diff {
        /// Links file (defaults to the configured links_file)
        file: Option<PathBuf>,
    },
    /// Check a links file without contacting the service
    Validate {
        /// Links file (defaults to the configured links_file)
        file: Option<PathBuf>,
    },
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (api_url, api_key, links_file, concurrency, timeout_secs)
        key: String,
        /// Configuration value
        value: String,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));
    let settings = cli.settings.as_ref();

    match cli.command {
        Commands::Sync {
            file,
            dry_run,
            concurrency,
        } => {
            let concurrency = concurrency.map(usize::from);
            commands::sync::run(settings, file, dry_run, concurrency, &output).await
        }
        Commands::Diff { file } => {
            commands::diff::run(settings, file, &output).await?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Validate { file } => {
            commands::validate::run(settings, file, &output)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Config { command } => {
            handle_config_command(command, settings, &output)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn handle_config_command(
    command: Option<ConfigCommands>,
    settings: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::show(settings, output),
        Some(ConfigCommands::Set { key, value }) => {
            commands::config::set(key, value, settings, output)
        }
    }
}

/// Initialize stderr logging
///
/// RUST_LOG replaces the default filter entirely when set.
fn init_logging(verbose: bool) {
    let log_level = if verbose { "debug" } else { "warn" };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "linksync_core={},linksync_cli={}",
            log_level, log_level
        ))
    });

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
