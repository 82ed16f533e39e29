mod commands;
mod input;
mod output;
mod telemetry;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::feasibility::{DefaultsArgs, FeasibilityArgs, MaxPurchaseArgs};
use commands::sensitivity::DealSensitivityArgs;

/// Purchase-renovate-resell deal feasibility
#[derive(Parser)]
#[command(
    name = "feas",
    version,
    about = "Purchase-renovate-resell deal feasibility",
    long_about = "A CLI for costing a property flip from purchase to resale with decimal \
                  precision. Produces a full cost breakdown, profitability metrics, and the \
                  maximum purchase price that still hits a profit target, with optional \
                  narrative commentary from an external collaborator."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log filter used when RUST_LOG is unset (logs go to stderr)
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a full deal feasibility (cost stages, profitability, max purchase)
    Feasibility(FeasibilityArgs),
    /// Maximum purchase price that still meets the profit target
    MaxPurchase(MaxPurchaseArgs),
    /// Net profit grid over sale price and renovation budget changes
    DealSensitivity(DealSensitivityArgs),
    /// Print the resolved cost model
    Defaults(DefaultsArgs),
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

fn main() {
    let cli = Cli::parse();

    if let Err(e) = telemetry::init(&cli.log_level) {
        eprintln!("{}: {}", "error".red().bold(), e);
        process::exit(1);
    }

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Feasibility(args) => commands::feasibility::run_feasibility(args),
        Commands::MaxPurchase(args) => commands::feasibility::run_max_purchase(args),
        Commands::DealSensitivity(args) => commands::sensitivity::run_deal_sensitivity(args),
        Commands::Defaults(args) => commands::feasibility::run_defaults(args),
        Commands::Version => {
            println!("feas {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
