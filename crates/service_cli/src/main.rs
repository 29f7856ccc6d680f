//! Greekscope CLI - European Option Pricing from the Command Line
//!
//! # Commands
//!
//! - `greekscope price` - Premium and Greeks for one option
//! - `greekscope payoff` - Buyer/seller profit-and-loss curve at expiry
//! - `greekscope live-vol --asset BTC` - Stream live volatility samples
//! - `greekscope check` - Print the resolved configuration
//!
//! # Architecture
//!
//! As part of the **S**ervice layer, this crate wires the pricing kernel
//! (`pricer_core`, `pricer_models`) to the volatility feed adapter
//! (`adapter_feeds`) behind a single binary.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::{debug, error};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;

pub use error::{CliError, Result};

use commands::ContractArgs;
use config::CliConfig;

/// Greekscope option pricing CLI
#[derive(Parser)]
#[command(name = "greekscope")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path [default: greekscope.toml if present]
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price an option and compute its Greeks
    Price {
        #[command(flatten)]
        contract: ContractArgs,

        /// Output format (json, table)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Generate the profit-and-loss curve at expiry
    Payoff {
        #[command(flatten)]
        contract: ContractArgs,

        /// Output format (json, csv, table)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Poll live volatility for an asset
    LiveVol {
        /// Asset symbol (e.g. BTC, ETH)
        #[arg(short, long)]
        asset: String,

        /// Stop after this many samples
        #[arg(short = 'n', long)]
        cycles: Option<usize>,
    },

    /// Check system configuration
    Check,
}

fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match CliConfig::resolve(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("greekscope: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let level = if cli.verbose {
        "debug"
    } else {
        config.log_level.as_filter_str()
    };
    init_tracing(level);
    debug!(log_level = %level, feed_url = %config.feed.url, "Configuration loaded");

    match run(cli.command, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Command failed");
            eprintln!("greekscope: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(command: Commands, config: &CliConfig) -> Result<()> {
    let feed = config.feed.to_feed_config();
    match command {
        Commands::Price { contract, format } => {
            commands::price::run(&contract, &format, &feed).await
        }
        Commands::Payoff { contract, format } => {
            commands::payoff::run(&contract, &format, &feed).await
        }
        Commands::LiveVol { asset, cycles } => commands::live_vol::run(&asset, cycles, feed).await,
        Commands::Check => commands::check::run(config),
    }
}
