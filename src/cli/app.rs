//! Main CLI application structure

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use super::demo::{self, DemoSettings};
use super::output::{Output, OutputFormat};
use crate::storage::{Config, ExportFormat};

#[derive(Parser)]
#[command(name = "taskboard")]
#[command(author, version, about = "In-memory task board demo")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (defaults to the configured format)
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Config file to use instead of ./taskboard.toml
    #[arg(long, global = true, env = "TASKBOARD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Command to run (defaults to `demo`)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Seed sample data and walk through every board operation
    Demo(DemoArgs),

    /// Show the effective configuration
    Config,
}

/// Overrides for the demo run
#[derive(Debug, Default, Args)]
pub struct DemoArgs {
    /// File to export tasks to
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Export line format
    #[arg(long)]
    pub export_format: Option<ExportFormat>,

    /// Seconds to wait before stopping the reporter
    #[arg(long)]
    pub linger: Option<u64>,

    /// Seconds between background reports
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub report_interval: Option<u64>,
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    let format = cli.format.unwrap_or(config.board.default_format);
    let output = Output::new(format);

    output.verbose("taskboard starting");
    for source in &config.sources {
        output.verbose_ctx("config", &format!("Loaded {}", source.display()));
    }

    match cli.command.unwrap_or_else(|| Commands::Demo(DemoArgs::default())) {
        Commands::Demo(args) => {
            let settings = DemoSettings::resolve(&config.board, args);
            output.verbose_ctx("demo", &format!("Running with {:?}", settings));
            demo::run(&output, &settings)?
        }

        Commands::Config => show_config(&output, &config)?,
    }

    output.verbose("Command completed successfully");
    Ok(())
}

/// Routes diagnostics to stderr; `RUST_LOG` takes precedence over `--verbose`
fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "taskboard=debug" } else { "taskboard=warn" };

    // A subscriber may already be installed when running under a test harness.
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}

fn show_config(output: &Output, config: &Config) -> Result<()> {
    if output.is_json() {
        output.data(&serde_json::json!({
            "config": config.board,
            "sources": config.sources,
        }));
        return Ok(());
    }

    if config.sources.is_empty() {
        println!("# defaults (no config files found)");
    } else {
        for source in &config.sources {
            println!("# from {}", source.display());
        }
    }
    print!("{}", config.to_toml().context("Failed to render configuration")?);
    Ok(())
}
