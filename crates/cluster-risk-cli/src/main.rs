mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use commands::cluster::AnalyzeClusterArgs;
use commands::risk_scoring::{ClassifyArgs, WeightedRiskArgs};

/// Structural anomaly scoring for transaction clusters
#[derive(Parser)]
#[command(
    name = "crisk",
    version,
    about = "Structural anomaly scoring for transaction clusters",
    long_about = "A CLI for scoring batches of inter-entity transfers for layering \
                  structure: density spikes, repetition, circular flow and closed \
                  groups, with a legitimacy dampener for broadly connected entities."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log analyzer decisions to stderr (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a batch of transaction records for structural anomalies
    AnalyzeCluster(AnalyzeClusterArgs),
    /// Combine transaction, company, network and confidence sub-scores
    WeightedRisk(WeightedRiskArgs),
    /// Map a 0-100 score onto its risk classification
    Classify(ClassifyArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::AnalyzeCluster(args) => commands::cluster::run_analyze_cluster(args),
        Commands::WeightedRisk(args) => commands::risk_scoring::run_weighted_risk(args),
        Commands::Classify(args) => commands::risk_scoring::run_classify(args),
        Commands::Version => {
            println!("crisk {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
